//! Newtype IDs for type-safe entity references.
//!
//! Stored documents have carried IDs in several shapes over their lifetime
//! (JSON strings, JSON numbers, missing entirely), so both types here are
//! string-backed rather than integer-backed and offer a lossy coercion from
//! arbitrary JSON values.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Opaque tenant/session identity used to select the document-store key.
///
/// Supplied by the identity provider; this layer performs no authentication
/// logic and never inspects the contents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantKey(String);

impl TenantKey {
    /// Create a tenant key from any string-like value.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Get the underlying string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TenantKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TenantKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

/// Stable ID of a record inside a content collection (product, service,
/// testimonial, ...).
///
/// Unique within its collection, assigned at creation time and never reused
/// after deletion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Create a record ID from an existing string value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh, unique record ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Coerce a raw JSON value into a record ID.
    ///
    /// Older documents stored IDs as numbers; both string and number values
    /// are accepted. Anything else (including the empty string) yields
    /// `None`, signalling the normalizer to assign a fresh ID.
    #[must_use]
    pub fn coerce(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) if !s.is_empty() => Some(Self(s.clone())),
            Value::Number(n) => Some(Self(n.to_string())),
            _ => None,
        }
    }

    /// Get the underlying string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_id_coerce_string() {
        let id = RecordId::coerce(&json!("abc-123")).unwrap();
        assert_eq!(id.as_str(), "abc-123");
    }

    #[test]
    fn test_record_id_coerce_number() {
        let id = RecordId::coerce(&json!(1_694_000_123_456_u64)).unwrap();
        assert_eq!(id.as_str(), "1694000123456");
    }

    #[test]
    fn test_record_id_coerce_rejects_other_shapes() {
        assert!(RecordId::coerce(&json!("")).is_none());
        assert!(RecordId::coerce(&json!(null)).is_none());
        assert!(RecordId::coerce(&json!({"id": 1})).is_none());
        assert!(RecordId::coerce(&json!([1])).is_none());
    }

    #[test]
    fn test_record_id_generate_is_unique() {
        assert_ne!(RecordId::generate(), RecordId::generate());
    }

    #[test]
    fn test_tenant_key_roundtrip() {
        let key = TenantKey::new("tenant-42");
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"tenant-42\"");
        let back: TenantKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }
}
