//! `PostgreSQL` implementation of the slot configuration service.
//!
//! Drafts live in `slot_configuration_draft` (one row per store and page
//! type, overwritten on save). Publishing copies the draft into a new
//! `slot_configuration_version` row inside a transaction that locks the
//! draft row, so a failed publish leaves both tables untouched.

use chrono::{DateTime, Utc};
use pagecraft_core::lifecycle;
use pagecraft_core::{
    PageType, PublishedVersion, ServiceError, ServiceResult, SlotConfiguration,
    SlotConfigurationService, StoreId, VersionSummary,
};
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::instrument;

use super::{RepositoryError, version_from_db, version_to_db};

/// Slot configurations stored in `PostgreSQL`.
#[derive(Debug, Clone)]
pub struct PgSlotStore {
    pool: PgPool,
    history_limit: usize,
}

impl PgSlotStore {
    /// Create a store over `pool` keeping `history_limit` versions per page.
    #[must_use]
    pub fn new(pool: PgPool, history_limit: usize) -> Self {
        Self {
            pool,
            history_limit: history_limit.max(1),
        }
    }

    /// The underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn locked_draft(
        tx: &mut Transaction<'static, Postgres>,
        store_id: StoreId,
        page_type: PageType,
    ) -> Result<Option<SlotConfiguration>, RepositoryError> {
        let draft = sqlx::query_scalar::<_, Json<SlotConfiguration>>(
            r"
            SELECT configuration
            FROM pagecraft.slot_configuration_draft
            WHERE store_id = $1 AND page_type = $2
            FOR UPDATE
            ",
        )
        .bind(store_id)
        .bind(page_type.as_str())
        .fetch_optional(&mut **tx)
        .await?;

        Ok(draft.map(|Json(doc)| doc))
    }

    async fn upsert_draft(
        tx: &mut Transaction<'static, Postgres>,
        store_id: StoreId,
        page_type: PageType,
        draft: &SlotConfiguration,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO pagecraft.slot_configuration_draft (store_id, page_type, configuration)
            VALUES ($1, $2, $3)
            ON CONFLICT (store_id, page_type)
            DO UPDATE SET configuration = EXCLUDED.configuration, updated_at = NOW()
            ",
        )
        .bind(store_id)
        .bind(page_type.as_str())
        .bind(Json(draft))
        .execute(&mut **tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_foreign_key_violation()
            {
                return RepositoryError::NotFound(format!("store {store_id}"));
            }
            RepositoryError::Database(e)
        })?;

        Ok(())
    }

    async fn save_draft_inner(
        &self,
        store_id: StoreId,
        configuration: &SlotConfiguration,
        page_type: PageType,
    ) -> Result<SlotConfiguration, RepositoryError> {
        let mut tx = self.pool.begin().await?;
        let previous = Self::locked_draft(&mut tx, store_id, page_type).await?;
        let draft =
            lifecycle::stamp_draft(configuration, previous.as_ref(), page_type, Utc::now());
        Self::upsert_draft(&mut tx, store_id, page_type, &draft).await?;
        tx.commit().await?;
        Ok(draft)
    }

    async fn publish_inner(
        &self,
        store_id: StoreId,
        page_type: PageType,
    ) -> Result<Option<PublishedVersion>, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        // Dropping the transaction without commit rolls back.
        let Some(draft) = Self::locked_draft(&mut tx, store_id, page_type).await? else {
            return Ok(None);
        };

        let latest = sqlx::query_scalar::<_, Option<i32>>(
            r"
            SELECT MAX(version)
            FROM pagecraft.slot_configuration_version
            WHERE store_id = $1 AND page_type = $2
            ",
        )
        .bind(store_id)
        .bind(page_type.as_str())
        .fetch_one(&mut *tx)
        .await?
        .map(version_from_db)
        .transpose()?;

        let version = lifecycle::next_version(latest);
        let now = Utc::now();
        let configuration = lifecycle::stamp_published(&draft, version, now);

        sqlx::query(
            r"
            INSERT INTO pagecraft.slot_configuration_version
                (store_id, page_type, version, configuration, published_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(store_id)
        .bind(page_type.as_str())
        .bind(version_to_db(version)?)
        .bind(Json(&configuration))
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let limit = u32::try_from(self.history_limit).unwrap_or(u32::MAX);
        if let Some(cutoff) = version.checked_sub(limit) {
            sqlx::query(
                r"
                DELETE FROM pagecraft.slot_configuration_version
                WHERE store_id = $1 AND page_type = $2 AND version <= $3
                ",
            )
            .bind(store_id)
            .bind(page_type.as_str())
            .bind(version_to_db(cutoff)?)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(Some(PublishedVersion {
            version,
            published_at: now,
            configuration,
        }))
    }

    async fn revert_inner(
        &self,
        store_id: StoreId,
        page_type: PageType,
        version: u32,
    ) -> Result<Option<SlotConfiguration>, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let historical = sqlx::query_scalar::<_, Json<SlotConfiguration>>(
            r"
            SELECT configuration
            FROM pagecraft.slot_configuration_version
            WHERE store_id = $1 AND page_type = $2 AND version = $3
            ",
        )
        .bind(store_id)
        .bind(page_type.as_str())
        .bind(version_to_db(version)?)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(Json(historical)) = historical else {
            return Ok(None);
        };

        let previous = Self::locked_draft(&mut tx, store_id, page_type).await?;
        let draft =
            lifecycle::stamp_reverted(&historical, previous.as_ref(), page_type, Utc::now());
        Self::upsert_draft(&mut tx, store_id, page_type, &draft).await?;
        tx.commit().await?;

        Ok(Some(draft))
    }
}

impl SlotConfigurationService for PgSlotStore {
    #[instrument(skip(self))]
    async fn get_draft(
        &self,
        store_id: StoreId,
        page_type: PageType,
    ) -> ServiceResult<Option<SlotConfiguration>> {
        let draft = sqlx::query_scalar::<_, Json<SlotConfiguration>>(
            r"
            SELECT configuration
            FROM pagecraft.slot_configuration_draft
            WHERE store_id = $1 AND page_type = $2
            ",
        )
        .bind(store_id)
        .bind(page_type.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::from)?;

        Ok(draft.map(|Json(doc)| doc))
    }

    #[instrument(skip(self))]
    async fn get_published(
        &self,
        store_id: StoreId,
        page_type: PageType,
    ) -> ServiceResult<Option<SlotConfiguration>> {
        let published = sqlx::query_scalar::<_, Json<SlotConfiguration>>(
            r"
            SELECT configuration
            FROM pagecraft.slot_configuration_version
            WHERE store_id = $1 AND page_type = $2
            ORDER BY version DESC
            LIMIT 1
            ",
        )
        .bind(store_id)
        .bind(page_type.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::from)?;

        Ok(published.map(|Json(doc)| doc))
    }

    #[instrument(skip(self, configuration), fields(slots = configuration.slots.len()))]
    async fn save_draft(
        &self,
        store_id: StoreId,
        configuration: &SlotConfiguration,
        page_type: PageType,
    ) -> ServiceResult<SlotConfiguration> {
        configuration.validate()?;
        Ok(self
            .save_draft_inner(store_id, configuration, page_type)
            .await?)
    }

    #[instrument(skip(self))]
    async fn publish(
        &self,
        store_id: StoreId,
        page_type: PageType,
    ) -> ServiceResult<PublishedVersion> {
        let published = self
            .publish_inner(store_id, page_type)
            .await?
            .ok_or_else(|| ServiceError::no_draft(store_id, page_type))?;

        tracing::info!(version = published.version, "Published slot configuration");
        Ok(published)
    }

    #[instrument(skip(self))]
    async fn discard_draft(&self, store_id: StoreId, page_type: PageType) -> ServiceResult<()> {
        sqlx::query(
            r"
            DELETE FROM pagecraft.slot_configuration_draft
            WHERE store_id = $1 AND page_type = $2
            ",
        )
        .bind(store_id)
        .bind(page_type.as_str())
        .execute(&self.pool)
        .await
        .map_err(RepositoryError::from)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_versions(
        &self,
        store_id: StoreId,
        page_type: PageType,
    ) -> ServiceResult<Vec<VersionSummary>> {
        let rows = sqlx::query_as::<_, (i32, DateTime<Utc>)>(
            r"
            SELECT version, published_at
            FROM pagecraft.slot_configuration_version
            WHERE store_id = $1 AND page_type = $2
            ORDER BY version DESC
            ",
        )
        .bind(store_id)
        .bind(page_type.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(RepositoryError::from)?;

        let versions = rows
            .into_iter()
            .map(|(version, published_at)| {
                Ok(VersionSummary {
                    version: version_from_db(version)?,
                    published_at,
                })
            })
            .collect::<Result<Vec<_>, RepositoryError>>()?;

        Ok(versions)
    }

    #[instrument(skip(self))]
    async fn revert_to_version(
        &self,
        store_id: StoreId,
        page_type: PageType,
        version: u32,
    ) -> ServiceResult<SlotConfiguration> {
        self.revert_inner(store_id, page_type, version)
            .await?
            .ok_or_else(|| ServiceError::no_version(store_id, page_type, version))
    }
}
