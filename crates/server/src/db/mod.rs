//! Database operations for the slot configuration `PostgreSQL` schema.
//!
//! # Schema: `pagecraft`
//!
//! ## Tables
//!
//! - `store` - Tenants (name, slug, settings JSONB)
//! - `slot_configuration_draft` - One editable draft per (store, page type)
//! - `slot_configuration_version` - Publish history; the highest version is live
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p pagecraft-cli -- migrate
//! ```

pub mod slot_configurations;
pub mod stores;

use std::time::Duration;

use pagecraft_core::ServiceError;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use slot_configurations::PgSlotStore;
pub use stores::StoreRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Constraint violation (e.g., unique slug).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(what) => Self::NotFound(what),
            RepositoryError::Conflict(msg) => Self::Validation(msg),
            RepositoryError::Database(_) | RepositoryError::DataCorruption(_) => {
                Self::Storage(err.to_string())
            }
        }
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Run the embedded migrations against `pool`.
///
/// # Errors
///
/// Returns `sqlx::migrate::MigrateError` if a migration fails to apply.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Convert a stored version number, rejecting values outside `u32`.
pub(crate) fn version_from_db(version: i32) -> Result<u32, RepositoryError> {
    u32::try_from(version)
        .map_err(|_| RepositoryError::DataCorruption(format!("negative version {version}")))
}

/// Convert a version number for binding, rejecting values above `i32::MAX`.
pub(crate) fn version_to_db(version: u32) -> Result<i32, RepositoryError> {
    i32::try_from(version)
        .map_err(|_| RepositoryError::DataCorruption(format!("version {version} overflows")))
}
