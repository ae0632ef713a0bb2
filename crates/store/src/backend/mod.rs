//! Storage backends for raw shop documents.
//!
//! Two interchangeable backends sit behind [`DocumentBackend`]: the remote
//! Postgres document store ([`postgres::PostgresBackend`]) and the local
//! quota-limited store ([`local::LocalBackend`]) for single-tenant
//! offline-first sessions. The synchronizer is generic over the trait and
//! never knows which one it is talking to; the choice is configuration, not
//! ambient state.

pub mod local;
pub mod postgres;

use std::future::Future;

use vitrine_core::TenantKey;

use crate::document::RawShopDocument;
use crate::error::StoreError;

/// A key/value document service with read, insert and update-by-key
/// operations over JSON-valued columns.
///
/// Insert and update are distinct because an unknown tenant is not an
/// error: the first save after "use defaults" performs an insert.
pub trait DocumentBackend: Send + Sync + 'static {
    /// Read the document for a tenant; `None` when none exists yet.
    fn read(
        &self,
        tenant: &TenantKey,
    ) -> impl Future<Output = Result<Option<RawShopDocument>, StoreError>> + Send;

    /// Insert a fresh document for a tenant.
    fn insert(
        &self,
        tenant: &TenantKey,
        document: &RawShopDocument,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Replace the existing document for a tenant.
    fn update(
        &self,
        tenant: &TenantKey,
        document: &RawShopDocument,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}
