//! Store (tenant) repository.

use chrono::{DateTime, Utc};
use pagecraft_core::{Store, StoreId, StoreSettings};
use sqlx::PgPool;
use sqlx::types::Json;

use super::RepositoryError;

#[derive(sqlx::FromRow)]
struct StoreRow {
    id: StoreId,
    name: String,
    slug: String,
    settings: Json<StoreSettings>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<StoreRow> for Store {
    fn from(row: StoreRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            slug: row.slug,
            settings: row.settings.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for store database operations.
pub struct StoreRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> StoreRepository<'a> {
    /// Create a new store repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a store with default settings.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the slug is taken or invalid.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, name: &str, slug: &str) -> Result<Store, RepositoryError> {
        pagecraft_core::types::store::validate_slug(slug).map_err(RepositoryError::Conflict)?;

        let row = sqlx::query_as::<_, StoreRow>(
            r"
            INSERT INTO pagecraft.store (id, name, slug, settings)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, slug, settings, created_at, updated_at
            ",
        )
        .bind(StoreId::generate())
        .bind(name)
        .bind(slug)
        .bind(Json(StoreSettings::default()))
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict(format!("slug '{slug}' already exists"));
            }
            RepositoryError::Database(e)
        })?;

        Ok(row.into())
    }

    /// Get a store by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: StoreId) -> Result<Option<Store>, RepositoryError> {
        let row = sqlx::query_as::<_, StoreRow>(
            r"
            SELECT id, name, slug, settings, created_at, updated_at
            FROM pagecraft.store
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Store::from))
    }

    /// Get a store by slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Store>, RepositoryError> {
        let row = sqlx::query_as::<_, StoreRow>(
            r"
            SELECT id, name, slug, settings, created_at, updated_at
            FROM pagecraft.store
            WHERE slug = $1
            ",
        )
        .bind(slug)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Store::from))
    }

    /// Replace a store's settings.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the store does not exist.
    pub async fn update_settings(
        &self,
        id: StoreId,
        settings: &StoreSettings,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE pagecraft.store
            SET settings = $2, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(Json(settings))
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("store {id}")));
        }
        Ok(())
    }

    /// List all stores ordered by name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Store>, RepositoryError> {
        let rows = sqlx::query_as::<_, StoreRow>(
            r"
            SELECT id, name, slug, settings, created_at, updated_at
            FROM pagecraft.store
            ORDER BY name
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Store::from).collect())
    }
}
