//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! pc-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `PAGECRAFT_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! Migrations live in `crates/server/migrations/` and are embedded in the
//! server crate.

use pagecraft_server::config::{ConfigError, ServerConfig};
use pagecraft_server::db;
use sqlx::PgPool;
use thiserror::Error;

/// Errors that can occur while migrating.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Connect using the server's database settings.
///
/// # Errors
///
/// Returns an error if configuration is missing or the connection fails.
pub async fn connect() -> Result<PgPool, MigrationError> {
    let config = ServerConfig::from_env()?;
    tracing::info!("Connecting to database...");
    Ok(db::create_pool(&config.database_url).await?)
}

/// Apply all pending migrations.
///
/// # Errors
///
/// Returns an error if the connection fails or a migration cannot be applied.
pub async fn run() -> Result<(), MigrationError> {
    let pool = connect().await?;

    tracing::info!("Running migrations...");
    db::run_migrations(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
