//! Store configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required (Postgres backend)
//! - `VITRINE_DATABASE_URL` - `PostgreSQL` connection string (falls back to
//!   `DATABASE_URL`)
//!
//! ## Optional
//! - `VITRINE_BACKEND` - `postgres` or `local` (default: postgres)
//! - `VITRINE_DATA_DIR` - Directory for the local backend (default: ./data)
//! - `VITRINE_LOCAL_QUOTA_BYTES` - Local store quota (default: 5000000)
//! - `VITRINE_AUTOSAVE_DEBOUNCE_MS` - Autosave debounce window (default: 300)

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

use crate::backend::local::DEFAULT_QUOTA_BYTES;
use crate::sync::{DEFAULT_DEBOUNCE, SyncOptions};

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Which document backend to run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendChoice {
    /// Shared `PostgreSQL` store, one row per tenant.
    Postgres,
    /// Single-tenant local file store.
    Local,
}

impl BackendChoice {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.to_ascii_lowercase().as_str() {
            "postgres" => Ok(Self::Postgres),
            "local" => Ok(Self::Local),
            other => Err(ConfigError::InvalidEnvVar(
                "VITRINE_BACKEND".to_string(),
                format!("expected 'postgres' or 'local', got '{other}'"),
            )),
        }
    }
}

/// Store configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Selected backend.
    pub backend: BackendChoice,
    /// `PostgreSQL` connection URL (contains password). `None` when the
    /// local backend is selected.
    pub database_url: Option<SecretString>,
    /// Directory for the local file store.
    pub data_dir: PathBuf,
    /// Byte quota for the local store.
    pub local_quota_bytes: usize,
    /// Autosave debounce window.
    pub autosave_debounce: Duration,
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let backend = match get_optional_env("VITRINE_BACKEND") {
            Some(value) => BackendChoice::parse(&value)?,
            None => BackendChoice::Postgres,
        };

        let database_url = match backend {
            BackendChoice::Postgres => Some(get_database_url("VITRINE_DATABASE_URL")?),
            BackendChoice::Local => None,
        };

        let data_dir = PathBuf::from(get_env_or_default("VITRINE_DATA_DIR", "./data"));

        let local_quota_bytes = match get_optional_env("VITRINE_LOCAL_QUOTA_BYTES") {
            Some(value) => value.parse::<usize>().map_err(|e| {
                ConfigError::InvalidEnvVar("VITRINE_LOCAL_QUOTA_BYTES".to_string(), e.to_string())
            })?,
            None => DEFAULT_QUOTA_BYTES,
        };

        let autosave_debounce = match get_optional_env("VITRINE_AUTOSAVE_DEBOUNCE_MS") {
            Some(value) => {
                let ms = value.parse::<u64>().map_err(|e| {
                    ConfigError::InvalidEnvVar(
                        "VITRINE_AUTOSAVE_DEBOUNCE_MS".to_string(),
                        e.to_string(),
                    )
                })?;
                Duration::from_millis(ms)
            }
            None => DEFAULT_DEBOUNCE,
        };

        Ok(Self {
            backend,
            database_url,
            data_dir,
            local_quota_bytes,
            autosave_debounce,
        })
    }

    /// Synchronizer options derived from this configuration.
    #[must_use]
    pub const fn sync_options(&self) -> SyncOptions {
        SyncOptions {
            debounce: self.autosave_debounce,
        }
    }
}

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
