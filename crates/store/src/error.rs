//! Error types for the persistence layer.
//!
//! Recoverable conditions (wrong-shape fields, malformed double-encoded
//! visibility) never surface as errors; the normalizer and codec fall back
//! to defaults and log. What remains is the genuinely fallible surface:
//! storage I/O, serialization of the raw document, and local-storage quota
//! exhaustion - the last kept distinct so callers can suggest removing
//! large embedded media instead of showing a generic failure.

use thiserror::Error;

/// Error type for storage backends and the synchronizer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Remote document store failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Raw document could not be serialized or deserialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Local store I/O failed.
    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),

    /// Local store write exceeded the configured quota.
    #[error("local storage quota exceeded: {needed} bytes needed, {quota} byte limit")]
    QuotaExceeded { needed: usize, quota: usize },
}

impl StoreError {
    /// Whether this failure is the distinct "storage full" condition.
    #[must_use]
    pub const fn is_storage_full(&self) -> bool {
        matches!(self, Self::QuotaExceeded { .. })
    }
}

/// Result type alias for `StoreError`.
pub type Result<T> = std::result::Result<T, StoreError>;
