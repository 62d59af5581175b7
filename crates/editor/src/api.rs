//! Slot configuration resource.
//!
//! Implements [`SlotConfigurationService`] over the server's
//! `/api/slot-configurations` routes. Default documents rarely change, so
//! they are held in a [`TtlCache`] shared by every editor using this API.

use std::time::Duration;

use pagecraft_core::{
    PageType, PublishedVersion, ServiceError, ServiceResult, SlotConfiguration,
    SlotConfigurationService, StoreId, VersionSummary,
};
use tracing::instrument;

use crate::cache::TtlCache;
use crate::client::{ApiClient, Resource};
use crate::config::EditorConfig;

/// Base path of the slot configuration routes.
pub const BASE_PATH: &str = "api/slot-configurations";

/// HTTP client for the slot configuration server.
#[derive(Debug, Clone)]
pub struct SlotConfigurationsApi {
    resource: Resource,
    defaults: TtlCache<PageType, SlotConfiguration>,
}

/// The HTTP-backed service used by editors outside tests.
pub type HttpSlotConfigurationService = SlotConfigurationsApi;

impl SlotConfigurationsApi {
    #[must_use]
    pub fn new(client: &ApiClient, defaults_ttl: Duration) -> Self {
        Self {
            resource: client.resource(BASE_PATH),
            defaults: TtlCache::new(defaults_ttl),
        }
    }

    #[must_use]
    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new(&ApiClient::from_config(config), config.defaults_cache_ttl)
    }

    /// Drop cached default documents so the next lookup refetches them.
    pub fn clear_defaults_cache(&self) {
        self.defaults.clear();
    }

    async fn fetch_defaults(&self, page_type: PageType) -> ServiceResult<SlotConfiguration> {
        self.resource
            .get(&defaults_path(page_type))
            .await?
            .ok_or_else(|| empty_response("defaults"))
    }
}

fn target_path(store_id: StoreId, page_type: PageType, action: &str) -> String {
    format!("{store_id}/{page_type}/{action}")
}

fn defaults_path(page_type: PageType) -> String {
    format!("defaults/{page_type}")
}

fn empty_response(what: &str) -> ServiceError {
    ServiceError::Transport(format!("empty response for {what}"))
}

impl SlotConfigurationService for SlotConfigurationsApi {
    #[instrument(skip(self))]
    async fn get_draft(
        &self,
        store_id: StoreId,
        page_type: PageType,
    ) -> ServiceResult<Option<SlotConfiguration>> {
        self.resource
            .get(&target_path(store_id, page_type, "draft"))
            .await
    }

    #[instrument(skip(self))]
    async fn get_published(
        &self,
        store_id: StoreId,
        page_type: PageType,
    ) -> ServiceResult<Option<SlotConfiguration>> {
        self.resource
            .get(&target_path(store_id, page_type, "published"))
            .await
    }

    #[instrument(skip(self, configuration), fields(slots = configuration.slots.len()))]
    async fn save_draft(
        &self,
        store_id: StoreId,
        configuration: &SlotConfiguration,
        page_type: PageType,
    ) -> ServiceResult<SlotConfiguration> {
        self.resource
            .put(&target_path(store_id, page_type, "draft"), configuration)
            .await?
            .ok_or_else(|| empty_response("save"))
    }

    #[instrument(skip(self))]
    async fn publish(
        &self,
        store_id: StoreId,
        page_type: PageType,
    ) -> ServiceResult<PublishedVersion> {
        self.resource
            .post(&target_path(store_id, page_type, "publish"))
            .await?
            .ok_or_else(|| empty_response("publish"))
    }

    #[instrument(skip(self))]
    async fn discard_draft(&self, store_id: StoreId, page_type: PageType) -> ServiceResult<()> {
        self.resource
            .delete(&target_path(store_id, page_type, "draft"))
            .await
    }

    #[instrument(skip(self))]
    async fn list_versions(
        &self,
        store_id: StoreId,
        page_type: PageType,
    ) -> ServiceResult<Vec<VersionSummary>> {
        Ok(self
            .resource
            .get(&target_path(store_id, page_type, "versions"))
            .await?
            .unwrap_or_default())
    }

    #[instrument(skip(self))]
    async fn revert_to_version(
        &self,
        store_id: StoreId,
        page_type: PageType,
        version: u32,
    ) -> ServiceResult<SlotConfiguration> {
        self.resource
            .post(&target_path(
                store_id,
                page_type,
                &format!("versions/{version}/revert"),
            ))
            .await?
            .ok_or_else(|| empty_response("revert"))
    }

    #[instrument(skip(self))]
    async fn get_defaults(&self, page_type: PageType) -> ServiceResult<SlotConfiguration> {
        self.defaults
            .get_or_fetch(page_type, self.fetch_defaults(page_type))
            .await
    }
}
