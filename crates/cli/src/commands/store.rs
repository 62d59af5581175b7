//! Store management commands.
//!
//! # Usage
//!
//! ```bash
//! # Create a store
//! pc-cli store create -n "Demo Store" -s demo-store
//!
//! # List stores
//! pc-cli store list
//! ```

use pagecraft_core::Store;
use pagecraft_server::db::RepositoryError;
use pagecraft_server::db::stores::StoreRepository;
use thiserror::Error;

use super::migrate::{self, MigrationError};

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Connection(#[from] MigrationError),

    #[error("Store already exists or slug is invalid: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Repository(RepositoryError),
}

impl From<RepositoryError> for StoreError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Conflict(message) => Self::Conflict(message),
            other => Self::Repository(other),
        }
    }
}

/// Create a store and return it.
///
/// # Errors
///
/// Returns `StoreError::Conflict` if the slug is taken or malformed.
pub async fn create(name: &str, slug: &str) -> Result<Store, StoreError> {
    let pool = migrate::connect().await?;

    tracing::info!("Creating store: {name} ({slug})");
    let store = StoreRepository::new(&pool).create(name, slug).await?;

    tracing::info!(store_id = %store.id, "Store created");
    Ok(store)
}

/// All stores, ordered by name.
///
/// # Errors
///
/// Returns an error if the database cannot be reached.
pub async fn list() -> Result<Vec<Store>, StoreError> {
    let pool = migrate::connect().await?;
    Ok(StoreRepository::new(&pool).list().await?)
}
