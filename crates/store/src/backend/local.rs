//! Local fallback store.
//!
//! A deliberately tiny key/value surface (`get`/`set` with a byte quota)
//! mirroring browser local storage, used for single-tenant offline-first
//! sessions. [`LocalBackend`] adapts any [`LocalStore`] to the
//! [`DocumentBackend`] trait under a fixed document key.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tracing::warn;

use vitrine_core::TenantKey;

use crate::document::RawShopDocument;
use crate::error::StoreError;

use super::DocumentBackend;

/// Fixed key under which the single local document lives.
pub const LOCAL_DOCUMENT_KEY: &str = "vitrine.shop";

/// Default quota, matching what browsers typically allow for local storage.
pub const DEFAULT_QUOTA_BYTES: usize = 5_000_000;

/// Minimal key/value store with a write quota.
pub trait LocalStore: Send + Sync + 'static {
    /// Read a value; `None` when the key was never written.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value, failing with [`StoreError::QuotaExceeded`] when the
    /// value does not fit the quota.
    ///
    /// # Errors
    ///
    /// Returns an error if the quota is exceeded or the write fails.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Directory-backed local store, one file per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
    quota_bytes: usize,
}

impl FileStore {
    /// Create a store rooted at `dir` with the given byte quota.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(dir: impl Into<PathBuf>, quota_bytes: usize) -> Result<Self, StoreError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir, quota_bytes })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys are dotted identifiers, not paths.
        let safe: String = key
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '.' || c == '-' { c } else { '_' })
            .collect();
        self.dir.join(format!("{safe}.json"))
    }
}

impl LocalStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if value.len() > self.quota_bytes {
            return Err(StoreError::QuotaExceeded {
                needed: value.len(),
                quota: self.quota_bytes,
            });
        }
        // Write via a temp file so a torn write cannot corrupt the document.
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        {
            let mut file = std::fs::File::create(&tmp)?;
            file.write_all(value.as_bytes())?;
            file.sync_all()?;
        }
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// In-memory local store for tests and previews.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryStoreInner>>,
}

#[derive(Debug)]
struct MemoryStoreInner {
    values: BTreeMap<String, String>,
    quota_bytes: usize,
    writes: u64,
}

impl Default for MemoryStoreInner {
    fn default() -> Self {
        Self {
            values: BTreeMap::new(),
            quota_bytes: DEFAULT_QUOTA_BYTES,
            writes: 0,
        }
    }
}

impl MemoryStore {
    /// Store with the default quota.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with an explicit quota (tests shrink this to force the
    /// storage-full path).
    #[must_use]
    pub fn with_quota(quota_bytes: usize) -> Self {
        let store = Self::default();
        store.set_quota(quota_bytes);
        store
    }

    /// Change the quota of a live store.
    pub fn set_quota(&self, quota_bytes: usize) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.quota_bytes = quota_bytes;
        }
    }

    /// Number of successful writes so far.
    #[must_use]
    pub fn write_count(&self) -> u64 {
        self.inner.lock().map(|inner| inner.writes).unwrap_or(0)
    }

    /// Current value under a key, if any.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<String> {
        self.inner
            .lock()
            .ok()
            .and_then(|inner| inner.values.get(key).cloned())
    }
}

impl LocalStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self
            .inner
            .lock()
            .ok()
            .and_then(|inner| inner.values.get(key).cloned()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let Ok(mut inner) = self.inner.lock() else {
            return Err(StoreError::Io(std::io::Error::other("store poisoned")));
        };
        if value.len() > inner.quota_bytes {
            return Err(StoreError::QuotaExceeded {
                needed: value.len(),
                quota: inner.quota_bytes,
            });
        }
        inner.values.insert(key.to_string(), value.to_string());
        inner.writes += 1;
        Ok(())
    }
}

/// Adapter exposing a [`LocalStore`] as a [`DocumentBackend`].
///
/// Local sessions are single-tenant, so the tenant key does not select the
/// storage key; the document always lives under [`LOCAL_DOCUMENT_KEY`].
#[derive(Debug, Clone)]
pub struct LocalBackend<S> {
    store: S,
}

impl<S: LocalStore> LocalBackend<S> {
    /// Wrap a local store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    fn write(&self, document: &RawShopDocument) -> Result<(), StoreError> {
        let encoded = serde_json::to_string(document)?;
        self.store.set(LOCAL_DOCUMENT_KEY, &encoded)
    }
}

impl<S: LocalStore> DocumentBackend for LocalBackend<S> {
    async fn read(&self, _tenant: &TenantKey) -> Result<Option<RawShopDocument>, StoreError> {
        let Some(encoded) = self.store.get(LOCAL_DOCUMENT_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str(&encoded) {
            Ok(document) => Ok(Some(document)),
            Err(error) => {
                // A corrupt local blob reads as "no document yet"; the next
                // save overwrites it.
                warn!(%error, "unparsable local document, treating as absent");
                Ok(None)
            }
        }
    }

    async fn insert(&self, _tenant: &TenantKey, document: &RawShopDocument) -> Result<(), StoreError> {
        self.write(document)
    }

    async fn update(&self, _tenant: &TenantKey, document: &RawShopDocument) -> Result<(), StoreError> {
        self.write(document)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_quota() {
        let store = MemoryStore::with_quota(10);
        assert!(store.set("k", "short").is_ok());
        let err = store.set("k", "much too long for ten bytes").unwrap_err();
        assert!(err.is_storage_full());
        // The old value is untouched by the failed write.
        assert_eq!(store.value("k").unwrap(), "short");
    }

    #[tokio::test]
    async fn test_local_backend_roundtrip() {
        let backend = LocalBackend::new(MemoryStore::new());
        let tenant = TenantKey::new("ignored");

        assert!(backend.read(&tenant).await.unwrap().is_none());

        let doc = RawShopDocument::default();
        backend.insert(&tenant, &doc).await.unwrap();
        assert_eq!(backend.read(&tenant).await.unwrap().unwrap(), doc);
    }

    #[tokio::test]
    async fn test_corrupt_local_blob_reads_as_absent() {
        let store = MemoryStore::new();
        store.set(LOCAL_DOCUMENT_KEY, "{definitely not json").unwrap();
        let backend = LocalBackend::new(store);
        assert!(backend.read(&TenantKey::new("t")).await.unwrap().is_none());
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = std::env::temp_dir().join(format!("vitrine-test-{}", uuid::Uuid::new_v4()));
        let store = FileStore::new(&dir, 1024).unwrap();

        assert!(store.get("vitrine.shop").unwrap().is_none());
        store.set("vitrine.shop", "{\"id\":null}").unwrap();
        assert_eq!(store.get("vitrine.shop").unwrap().unwrap(), "{\"id\":null}");

        let err = store.set("vitrine.shop", &"x".repeat(2048)).unwrap_err();
        assert!(err.is_storage_full());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
