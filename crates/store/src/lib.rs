//! Vitrine Store - Shop configuration persistence and reconciliation.
//!
//! Everything between the canonical model in `vitrine-core` and durable
//! storage lives here:
//!
//! - [`document`] - The raw, untrusted stored document shape
//! - [`codec`] - Reserved-key packing inside the shared social-links blob
//! - [`normalize`] - Stored document -> canonical model (and back)
//! - [`merge`] - Partial updates applied group-by-group
//! - [`sync`] - Debounced, coalescing autosave state machine
//! - [`session`] - Per-tenant editing session tying the above together
//! - [`backend`] - Postgres and local-file document stores
//! - [`config`] - Environment-driven configuration
//!
//! # Architecture
//!
//! Reads are lenient: any stored document, however malformed, normalizes to
//! a usable model. Writes are canonical: every save re-encodes the full
//! model, so a single round trip repairs legacy and hand-edited documents.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod backend;
pub mod codec;
pub mod config;
pub mod document;
pub mod error;
pub mod merge;
pub mod normalize;
pub mod session;
pub mod sync;

pub use backend::DocumentBackend;
pub use config::{BackendChoice, ConfigError, StoreConfig};
pub use document::RawShopDocument;
pub use error::StoreError;
pub use merge::ShopPatch;
pub use session::EditorSession;
pub use sync::{SyncEvent, SyncHandle, SyncOptions, SyncState};
