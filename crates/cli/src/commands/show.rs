//! Print a tenant's configuration after normalization.

use vitrine_core::types::TenantKey;
use vitrine_store::backend::{DocumentBackend, postgres::PostgresBackend};
use vitrine_store::normalize;

/// Look up `tenant`, normalize its stored document, and print the canonical
/// model as JSON.
///
/// # Errors
///
/// Returns an error if the tenant has no document or the read fails.
pub async fn shop(tenant: &str) -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;
    let backend = PostgresBackend::new(pool);
    let tenant = TenantKey::new(tenant);

    let Some(document) = backend.read(&tenant).await? else {
        return Err(format!("no shop document for tenant '{tenant}'").into());
    };

    let config = normalize::normalize(&document);

    #[allow(clippy::print_stdout)]
    {
        println!("{}", serde_json::to_string_pretty(&config)?);
    }
    Ok(())
}
