//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! vitrine migrate
//! ```
//!
//! # Environment Variables
//!
//! - `VITRINE_DATABASE_URL` - `PostgreSQL` connection string (falls back to
//!   `DATABASE_URL`)

use tracing::info;

use vitrine_store::backend::postgres;

/// Run the embedded migrations against the configured database.
///
/// # Errors
///
/// Returns an error if the connection fails or a migration fails to apply.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    info!("Connecting to database...");
    let pool = super::connect().await?;

    info!("Running migrations...");
    postgres::run_migrations(&pool).await?;

    info!("Migrations complete!");
    Ok(())
}
