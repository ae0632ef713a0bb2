//! Postgres document store.
//!
//! One `shops` table: a `tenant_key` column and a `JSONB` document column.
//! The document is read fully and written fully; there are no partial-field
//! remote updates, so the only inter-session shared resource is the row
//! itself.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::instrument;

use vitrine_core::TenantKey;

use crate::document::RawShopDocument;
use crate::error::StoreError;

use super::DocumentBackend;

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Run the embedded migrations for the shops table.
///
/// # Errors
///
/// Returns an error if a migration fails to apply.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Remote document store backed by the `shops` table.
#[derive(Debug, Clone)]
pub struct PostgresBackend {
    pool: PgPool,
}

impl PostgresBackend {
    /// Wrap an existing connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl DocumentBackend for PostgresBackend {
    #[instrument(skip(self), fields(tenant = %tenant))]
    async fn read(&self, tenant: &TenantKey) -> Result<Option<RawShopDocument>, StoreError> {
        let document: Option<Value> =
            sqlx::query_scalar("SELECT document FROM shops WHERE tenant_key = $1")
                .bind(tenant.as_str())
                .fetch_optional(&self.pool)
                .await?;

        document
            .map(|value| serde_json::from_value(value).map_err(StoreError::from))
            .transpose()
    }

    #[instrument(skip(self, document), fields(tenant = %tenant))]
    async fn insert(&self, tenant: &TenantKey, document: &RawShopDocument) -> Result<(), StoreError> {
        let value = serde_json::to_value(document)?;
        sqlx::query("INSERT INTO shops (tenant_key, document) VALUES ($1, $2)")
            .bind(tenant.as_str())
            .bind(value)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    #[instrument(skip(self, document), fields(tenant = %tenant))]
    async fn update(&self, tenant: &TenantKey, document: &RawShopDocument) -> Result<(), StoreError> {
        let value = serde_json::to_value(document)?;
        sqlx::query("UPDATE shops SET document = $2, updated_at = NOW() WHERE tenant_key = $1")
            .bind(tenant.as_str())
            .bind(value)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
