//! In-process configuration store.
//!
//! Used by tests and local tooling. Behaves like the database store: drafts
//! are overwritten on save, publishing appends to a bounded history, and the
//! live document is always the newest version.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use chrono::Utc;

use crate::configuration::{PublishedVersion, SlotConfiguration, VersionSummary};
use crate::error::{ServiceError, ServiceResult};
use crate::lifecycle::{self, DEFAULT_HISTORY_LIMIT};
use crate::service::SlotConfigurationService;
use crate::types::{PageType, StoreId};

#[derive(Debug, Default)]
struct PageEntry {
    draft: Option<SlotConfiguration>,
    /// Oldest first.
    versions: Vec<PublishedVersion>,
}

/// A [`SlotConfigurationService`] holding everything in memory.
#[derive(Debug)]
pub struct MemorySlotStore {
    pages: RwLock<HashMap<(StoreId, PageType), PageEntry>>,
    history_limit: usize,
}

impl Default for MemorySlotStore {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<T>(_: PoisonError<T>) -> ServiceError {
    ServiceError::Storage("configuration store lock poisoned".to_owned())
}

impl MemorySlotStore {
    /// Create an empty store keeping the default number of versions.
    #[must_use]
    pub fn new() -> Self {
        Self::with_history_limit(DEFAULT_HISTORY_LIMIT)
    }

    /// Create an empty store keeping at most `limit` versions per page (minimum 1).
    #[must_use]
    pub fn with_history_limit(limit: usize) -> Self {
        Self {
            pages: RwLock::new(HashMap::new()),
            history_limit: limit.max(1),
        }
    }
}

impl SlotConfigurationService for MemorySlotStore {
    async fn get_draft(
        &self,
        store_id: StoreId,
        page_type: PageType,
    ) -> ServiceResult<Option<SlotConfiguration>> {
        let pages = self.pages.read().map_err(poisoned)?;
        Ok(pages
            .get(&(store_id, page_type))
            .and_then(|entry| entry.draft.clone()))
    }

    async fn get_published(
        &self,
        store_id: StoreId,
        page_type: PageType,
    ) -> ServiceResult<Option<SlotConfiguration>> {
        let pages = self.pages.read().map_err(poisoned)?;
        Ok(pages
            .get(&(store_id, page_type))
            .and_then(|entry| entry.versions.last())
            .map(|v| v.configuration.clone()))
    }

    async fn save_draft(
        &self,
        store_id: StoreId,
        configuration: &SlotConfiguration,
        page_type: PageType,
    ) -> ServiceResult<SlotConfiguration> {
        configuration.validate()?;
        let mut pages = self.pages.write().map_err(poisoned)?;
        let entry = pages.entry((store_id, page_type)).or_default();
        let draft =
            lifecycle::stamp_draft(configuration, entry.draft.as_ref(), page_type, Utc::now());
        entry.draft = Some(draft.clone());
        Ok(draft)
    }

    async fn publish(
        &self,
        store_id: StoreId,
        page_type: PageType,
    ) -> ServiceResult<PublishedVersion> {
        let mut pages = self.pages.write().map_err(poisoned)?;
        let Some(entry) = pages.get_mut(&(store_id, page_type)) else {
            return Err(ServiceError::no_draft(store_id, page_type));
        };
        let Some(draft) = entry.draft.as_ref() else {
            return Err(ServiceError::no_draft(store_id, page_type));
        };

        let now = Utc::now();
        let version = lifecycle::next_version(entry.versions.last().map(|v| v.version));
        let published = PublishedVersion {
            version,
            published_at: now,
            configuration: lifecycle::stamp_published(draft, version, now),
        };
        entry.versions.push(published.clone());

        let overflow = entry.versions.len().saturating_sub(self.history_limit);
        entry.versions.drain(..overflow);

        Ok(published)
    }

    async fn discard_draft(&self, store_id: StoreId, page_type: PageType) -> ServiceResult<()> {
        let mut pages = self.pages.write().map_err(poisoned)?;
        if let Some(entry) = pages.get_mut(&(store_id, page_type)) {
            entry.draft = None;
        }
        Ok(())
    }

    async fn list_versions(
        &self,
        store_id: StoreId,
        page_type: PageType,
    ) -> ServiceResult<Vec<VersionSummary>> {
        let pages = self.pages.read().map_err(poisoned)?;
        Ok(pages
            .get(&(store_id, page_type))
            .map(|entry| {
                entry
                    .versions
                    .iter()
                    .rev()
                    .map(PublishedVersion::summary)
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn revert_to_version(
        &self,
        store_id: StoreId,
        page_type: PageType,
        version: u32,
    ) -> ServiceResult<SlotConfiguration> {
        let mut pages = self.pages.write().map_err(poisoned)?;
        let entry = pages
            .get_mut(&(store_id, page_type))
            .ok_or_else(|| ServiceError::no_version(store_id, page_type, version))?;
        let historical = entry
            .versions
            .iter()
            .find(|v| v.version == version)
            .ok_or_else(|| ServiceError::no_version(store_id, page_type, version))?;

        let draft = lifecycle::stamp_reverted(
            &historical.configuration,
            entry.draft.as_ref(),
            page_type,
            Utc::now(),
        );
        entry.draft = Some(draft.clone());
        Ok(draft)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::configuration::{Slot, SlotKind};

    fn doc(content: &str) -> SlotConfiguration {
        serde_json::from_value(json!({"slots": {"a": {"content": content}}})).unwrap()
    }

    #[tokio::test]
    async fn test_save_then_publish_round_trip() {
        let store = MemorySlotStore::new();
        let id = StoreId::generate();

        store.save_draft(id, &doc("x"), PageType::Cart).await.unwrap();
        let published = store.publish(id, PageType::Cart).await.unwrap();
        assert_eq!(published.version, 1);

        let live = store.get_published(id, PageType::Cart).await.unwrap().unwrap();
        assert!(live.same_layout(&doc("x")));
        assert_eq!(live.metadata.version, Some(1));

        // The draft remains editable after publishing.
        assert!(store.get_draft(id, PageType::Cart).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_draft_saved_from_published_is_not_stamped_live() {
        let store = MemorySlotStore::new();
        let id = StoreId::generate();

        store.save_draft(id, &doc("x"), PageType::Cart).await.unwrap();
        store.publish(id, PageType::Cart).await.unwrap();
        store.discard_draft(id, PageType::Cart).await.unwrap();

        let live = store.get_published(id, PageType::Cart).await.unwrap().unwrap();
        let saved = store.save_draft(id, &live, PageType::Cart).await.unwrap();
        assert_eq!(saved.metadata.version, None);
        assert_eq!(saved.metadata.published_at, None);

        let draft = store.get_draft(id, PageType::Cart).await.unwrap().unwrap();
        assert_eq!(draft.metadata.version, None);
    }

    #[tokio::test]
    async fn test_save_overwrites_instead_of_merging() {
        let store = MemorySlotStore::new();
        let id = StoreId::generate();

        let mut first = doc("x");
        first.insert_slot(Slot::new("b", SlotKind::Text));
        store.save_draft(id, &first, PageType::Cart).await.unwrap();
        store.save_draft(id, &doc("y"), PageType::Cart).await.unwrap();

        let draft = store.get_draft(id, PageType::Cart).await.unwrap().unwrap();
        assert_eq!(draft.slots.len(), 1);
        assert_eq!(draft.slot("a").unwrap().content.as_deref(), Some("y"));
    }

    #[tokio::test]
    async fn test_publish_without_draft_fails_and_changes_nothing() {
        let store = MemorySlotStore::new();
        let id = StoreId::generate();

        let err = store.publish(id, PageType::Product).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert!(store.get_published(id, PageType::Product).await.unwrap().is_none());
        assert!(store.list_versions(id, PageType::Product).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_stores_are_isolated() {
        let store = MemorySlotStore::new();
        let a = StoreId::generate();
        let b = StoreId::generate();

        store.save_draft(a, &doc("x"), PageType::Cart).await.unwrap();
        assert!(store.get_draft(b, PageType::Cart).await.unwrap().is_none());
        assert!(store.get_draft(a, PageType::Product).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_history_is_trimmed_but_keeps_latest() {
        let store = MemorySlotStore::with_history_limit(2);
        let id = StoreId::generate();

        for content in ["a", "b", "c"] {
            store.save_draft(id, &doc(content), PageType::Cart).await.unwrap();
            store.publish(id, PageType::Cart).await.unwrap();
        }

        let versions: Vec<u32> = store
            .list_versions(id, PageType::Cart)
            .await
            .unwrap()
            .into_iter()
            .map(|v| v.version)
            .collect();
        assert_eq!(versions, vec![3, 2]);
    }

    #[tokio::test]
    async fn test_revert_copies_version_into_draft_only() {
        let store = MemorySlotStore::new();
        let id = StoreId::generate();

        store.save_draft(id, &doc("one"), PageType::Cart).await.unwrap();
        store.publish(id, PageType::Cart).await.unwrap();
        store.save_draft(id, &doc("two"), PageType::Cart).await.unwrap();
        store.publish(id, PageType::Cart).await.unwrap();

        let draft = store.revert_to_version(id, PageType::Cart, 1).await.unwrap();
        assert!(draft.same_layout(&doc("one")));
        assert_eq!(draft.metadata.version, None);

        let live = store.get_published(id, PageType::Cart).await.unwrap().unwrap();
        assert_eq!(live.metadata.version, Some(2));

        let err = store.revert_to_version(id, PageType::Cart, 9).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_save_rejects_invalid_document() {
        let store = MemorySlotStore::new();
        let mut bad = doc("x");
        bad.insert_slot(Slot::new("orphan", SlotKind::Text).with_parent("missing"));

        let err = store
            .save_draft(StoreId::generate(), &bad, PageType::Cart)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn test_default_method_returns_builtin_defaults() {
        let store = MemorySlotStore::new();
        let defaults = store.get_defaults(PageType::Login).await.unwrap();
        assert_eq!(defaults, crate::defaults::for_page(PageType::Login));
    }
}
