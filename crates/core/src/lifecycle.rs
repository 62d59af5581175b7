//! Metadata stamping shared by every storage backend.
//!
//! Keeping these rules in one place means the in-memory store and the
//! database store produce identical documents for the same calls.

use chrono::{DateTime, Utc};

use crate::configuration::SlotConfiguration;
use crate::types::PageType;

/// Default number of published versions kept per page.
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

/// Prepare an incoming document for storage as the draft.
///
/// Sets `lastModified` and `pageType`, and keeps the `created` timestamp
/// of the draft being replaced (or of the incoming document) so it survives
/// overwrites. Publish stamps are cleared: a draft is never live, even when
/// it was loaded from a published document.
#[must_use]
pub fn stamp_draft(
    incoming: &SlotConfiguration,
    previous: Option<&SlotConfiguration>,
    page_type: PageType,
    now: DateTime<Utc>,
) -> SlotConfiguration {
    let mut draft = incoming.clone();
    draft.metadata.created = previous
        .and_then(|p| p.metadata.created)
        .or(incoming.metadata.created)
        .or(Some(now));
    draft.metadata.last_modified = Some(now);
    draft.metadata.page_type = Some(page_type);
    draft.metadata.version = None;
    draft.metadata.published_at = None;
    draft
}

/// Build the published copy of `draft` as `version`.
#[must_use]
pub fn stamp_published(
    draft: &SlotConfiguration,
    version: u32,
    now: DateTime<Utc>,
) -> SlotConfiguration {
    let mut published = draft.clone();
    published.metadata.version = Some(version);
    published.metadata.published_at = Some(now);
    published
}

/// Build the draft that results from reverting to a historical version.
#[must_use]
pub fn stamp_reverted(
    historical: &SlotConfiguration,
    previous: Option<&SlotConfiguration>,
    page_type: PageType,
    now: DateTime<Utc>,
) -> SlotConfiguration {
    stamp_draft(historical, previous, page_type, now)
}

/// Next version number after `latest`.
#[must_use]
pub fn next_version(latest: Option<u32>) -> u32 {
    latest.map_or(1, |v| v.saturating_add(1))
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn test_stamp_draft_keeps_original_created() {
        let first = Utc::now();
        let later = first + Duration::minutes(5);
        let doc = SlotConfiguration::empty(PageType::Cart);

        let v1 = stamp_draft(&doc, None, PageType::Cart, first);
        assert_eq!(v1.metadata.created, Some(first));

        let v2 = stamp_draft(&doc, Some(&v1), PageType::Cart, later);
        assert_eq!(v2.metadata.created, Some(first));
        assert_eq!(v2.metadata.last_modified, Some(later));
    }

    #[test]
    fn test_stamp_draft_overrides_page_type() {
        let doc = SlotConfiguration::empty(PageType::Cart);
        let draft = stamp_draft(&doc, None, PageType::Product, Utc::now());
        assert_eq!(draft.metadata.page_type, Some(PageType::Product));
    }

    #[test]
    fn test_stamp_reverted_clears_publish_stamps() {
        let now = Utc::now();
        let published = stamp_published(&SlotConfiguration::empty(PageType::Cart), 3, now);
        let draft = stamp_reverted(&published, None, PageType::Cart, now);
        assert_eq!(draft.metadata.version, None);
        assert_eq!(draft.metadata.published_at, None);
    }

    #[test]
    fn test_stamp_draft_from_published_clears_publish_stamps() {
        let now = Utc::now();
        let published = stamp_published(&SlotConfiguration::empty(PageType::Cart), 1, now);
        let draft = stamp_draft(&published, None, PageType::Cart, now + Duration::seconds(1));
        assert_eq!(draft.metadata.version, None);
        assert_eq!(draft.metadata.published_at, None);
        assert_eq!(draft.metadata.last_modified, Some(now + Duration::seconds(1)));
    }

    #[test]
    fn test_next_version() {
        assert_eq!(next_version(None), 1);
        assert_eq!(next_version(Some(4)), 5);
        assert_eq!(next_version(Some(u32::MAX)), u32::MAX);
    }
}
