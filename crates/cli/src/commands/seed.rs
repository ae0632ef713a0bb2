//! Seed a tenant with a default shop document.

use tracing::info;

use vitrine_core::model::ShopConfig;
use vitrine_core::types::TenantKey;
use vitrine_store::backend::{DocumentBackend, postgres::PostgresBackend};
use vitrine_store::normalize;

/// Insert a default configuration for `tenant` under the given alias.
///
/// # Errors
///
/// Returns an error if the tenant already has a document or the insert
/// fails.
pub async fn shop(tenant: &str, alias: &str) -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;
    let backend = PostgresBackend::new(pool);
    let tenant = TenantKey::new(tenant);

    if backend.read(&tenant).await?.is_some() {
        return Err(format!("tenant '{tenant}' already has a shop document").into());
    }

    let mut config = ShopConfig::defaults();
    config.identity.alias = alias.to_string();

    backend.insert(&tenant, &normalize::encode(&config)).await?;

    info!(%tenant, alias, "Seeded default shop document");
    Ok(())
}
