//! Integration tests for Vitrine.
//!
//! The tests exercise the full stack below the UI: raw documents through
//! normalization, merge, the autosave synchronizer and the document
//! backends. Everything runs against in-process backends, so no database
//! or network is required.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p vitrine-integration-tests
//! ```
//!
//! This crate also hosts [`RecordingBackend`], a scriptable
//! [`DocumentBackend`] double shared by the test files.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use vitrine_core::TenantKey;
use vitrine_store::DocumentBackend;
use vitrine_store::document::RawShopDocument;
use vitrine_store::error::StoreError;

/// How the next scripted write should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailKind {
    /// Transient I/O failure.
    Io,
    /// Storage quota exhausted.
    Quota,
}

#[derive(Debug, Default)]
struct Inner {
    document: Option<RawShopDocument>,
    inserts: u64,
    updates: u64,
    fail_next: Option<FailKind>,
}

/// In-memory [`DocumentBackend`] that records every call and can be
/// scripted to fail the next write.
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    inner: Arc<Mutex<Inner>>,
}

impl RecordingBackend {
    /// Empty backend with no stored document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend pre-loaded with a stored document.
    #[must_use]
    pub fn with_document(document: RawShopDocument) -> Self {
        let backend = Self::default();
        backend.lock().document = Some(document);
        backend
    }

    /// Script the next write to fail.
    pub fn fail_next_write(&self, kind: FailKind) {
        self.lock().fail_next = Some(kind);
    }

    /// Number of successful inserts.
    #[must_use]
    pub fn inserts(&self) -> u64 {
        self.lock().inserts
    }

    /// Number of successful updates.
    #[must_use]
    pub fn updates(&self) -> u64 {
        self.lock().updates
    }

    /// The currently stored document, if any.
    #[must_use]
    pub fn document(&self) -> Option<RawShopDocument> {
        self.lock().document.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn take_failure(&self) -> Option<StoreError> {
        self.lock().fail_next.take().map(|kind| match kind {
            FailKind::Io => StoreError::Io(std::io::Error::other("connection reset")),
            FailKind::Quota => StoreError::QuotaExceeded {
                needed: 2048,
                quota: 1024,
            },
        })
    }
}

impl DocumentBackend for RecordingBackend {
    async fn read(&self, _tenant: &TenantKey) -> Result<Option<RawShopDocument>, StoreError> {
        Ok(self.lock().document.clone())
    }

    async fn insert(
        &self,
        _tenant: &TenantKey,
        document: &RawShopDocument,
    ) -> Result<(), StoreError> {
        if let Some(error) = self.take_failure() {
            return Err(error);
        }
        let mut inner = self.lock();
        inner.document = Some(document.clone());
        inner.inserts += 1;
        Ok(())
    }

    async fn update(
        &self,
        _tenant: &TenantKey,
        document: &RawShopDocument,
    ) -> Result<(), StoreError> {
        if let Some(error) = self.take_failure() {
            return Err(error);
        }
        let mut inner = self.lock();
        inner.document = Some(document.clone());
        inner.updates += 1;
        Ok(())
    }
}
