//! CLI command implementations.

pub mod migrate;
pub mod seed;
pub mod show;

use secrecy::SecretString;
use sqlx::PgPool;

use vitrine_store::backend::postgres;

/// Connect to the database named by `VITRINE_DATABASE_URL` (falling back to
/// `DATABASE_URL`).
pub(crate) async fn connect() -> Result<PgPool, Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("VITRINE_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| "VITRINE_DATABASE_URL not set")?;

    Ok(postgres::create_pool(&database_url).await?)
}
