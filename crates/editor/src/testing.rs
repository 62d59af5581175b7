//! Test double for the configuration service.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use pagecraft_core::{
    MemorySlotStore, PageType, PublishedVersion, ServiceError, ServiceResult, SlotConfiguration,
    SlotConfigurationService, StoreId, VersionSummary, defaults,
};

/// In-memory service whose saves and defaults lookups can be made to fail.
#[derive(Debug, Default)]
pub struct FlakyService {
    inner: MemorySlotStore,
    fail_saves: AtomicBool,
    fail_defaults: AtomicBool,
    saves: AtomicUsize,
}

impl FlakyService {
    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    pub fn fail_defaults(&self, fail: bool) {
        self.fail_defaults.store(fail, Ordering::SeqCst);
    }

    /// Number of successful saves.
    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

fn offline() -> ServiceError {
    ServiceError::Transport("connection reset".to_owned())
}

impl SlotConfigurationService for FlakyService {
    async fn get_draft(
        &self,
        store_id: StoreId,
        page_type: PageType,
    ) -> ServiceResult<Option<SlotConfiguration>> {
        self.inner.get_draft(store_id, page_type).await
    }

    async fn get_published(
        &self,
        store_id: StoreId,
        page_type: PageType,
    ) -> ServiceResult<Option<SlotConfiguration>> {
        self.inner.get_published(store_id, page_type).await
    }

    async fn save_draft(
        &self,
        store_id: StoreId,
        configuration: &SlotConfiguration,
        page_type: PageType,
    ) -> ServiceResult<SlotConfiguration> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(offline());
        }
        let saved = self.inner.save_draft(store_id, configuration, page_type).await?;
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(saved)
    }

    async fn publish(
        &self,
        store_id: StoreId,
        page_type: PageType,
    ) -> ServiceResult<PublishedVersion> {
        self.inner.publish(store_id, page_type).await
    }

    async fn discard_draft(&self, store_id: StoreId, page_type: PageType) -> ServiceResult<()> {
        self.inner.discard_draft(store_id, page_type).await
    }

    async fn list_versions(
        &self,
        store_id: StoreId,
        page_type: PageType,
    ) -> ServiceResult<Vec<VersionSummary>> {
        self.inner.list_versions(store_id, page_type).await
    }

    async fn revert_to_version(
        &self,
        store_id: StoreId,
        page_type: PageType,
        version: u32,
    ) -> ServiceResult<SlotConfiguration> {
        self.inner
            .revert_to_version(store_id, page_type, version)
            .await
    }

    async fn get_defaults(&self, page_type: PageType) -> ServiceResult<SlotConfiguration> {
        if self.fail_defaults.load(Ordering::SeqCst) {
            return Err(offline());
        }
        Ok(defaults::for_page(page_type))
    }
}
