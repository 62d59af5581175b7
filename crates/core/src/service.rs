//! The slot configuration service contract.
//!
//! Editors consume configurations only through this trait: fetch the
//! current draft, fetch the published document, save a draft, publish.
//! Reset, history and revert build on the same storage.
//!
//! There are no concurrency guarantees beyond last write wins. Saving
//! overwrites the previous draft (it is never merged), and publishing either
//! promotes the draft completely or leaves everything untouched.

use std::future::Future;

use crate::configuration::{PublishedVersion, SlotConfiguration, VersionSummary};
use crate::defaults;
use crate::error::ServiceResult;
use crate::types::{PageType, StoreId};

/// Storage and lifecycle operations for slot configurations.
pub trait SlotConfigurationService: Send + Sync {
    /// The most recent unpublished document, or `None` if there is no draft.
    fn get_draft(
        &self,
        store_id: StoreId,
        page_type: PageType,
    ) -> impl Future<Output = ServiceResult<Option<SlotConfiguration>>> + Send;

    /// The live document, or `None` if the page was never published.
    fn get_published(
        &self,
        store_id: StoreId,
        page_type: PageType,
    ) -> impl Future<Output = ServiceResult<Option<SlotConfiguration>>> + Send;

    /// Persist `configuration` as the new draft, replacing any previous one.
    ///
    /// Returns the stored document with server-maintained metadata applied.
    fn save_draft(
        &self,
        store_id: StoreId,
        configuration: &SlotConfiguration,
        page_type: PageType,
    ) -> impl Future<Output = ServiceResult<SlotConfiguration>> + Send;

    /// Promote the current draft to published.
    ///
    /// The draft stays in place and remains editable. Fails with
    /// `ServiceError::NotFound` if no draft exists.
    fn publish(
        &self,
        store_id: StoreId,
        page_type: PageType,
    ) -> impl Future<Output = ServiceResult<PublishedVersion>> + Send;

    /// Delete the draft. Succeeds when there is nothing to delete.
    fn discard_draft(
        &self,
        store_id: StoreId,
        page_type: PageType,
    ) -> impl Future<Output = ServiceResult<()>> + Send;

    /// Publish history, newest first.
    fn list_versions(
        &self,
        store_id: StoreId,
        page_type: PageType,
    ) -> impl Future<Output = ServiceResult<Vec<VersionSummary>>> + Send;

    /// Copy a published version into the draft and return the new draft.
    fn revert_to_version(
        &self,
        store_id: StoreId,
        page_type: PageType,
        version: u32,
    ) -> impl Future<Output = ServiceResult<SlotConfiguration>> + Send;

    /// The system default document for `page_type`.
    fn get_defaults(
        &self,
        page_type: PageType,
    ) -> impl Future<Output = ServiceResult<SlotConfiguration>> + Send {
        async move { Ok(defaults::for_page(page_type)) }
    }
}
