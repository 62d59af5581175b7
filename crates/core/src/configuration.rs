//! The slot configuration document.
//!
//! A configuration is a JSON document describing the layout of one page for
//! one store. Its shape is dictated by the storefront renderer:
//!
//! ```json
//! {
//!   "slots": { "header_title": { "id": "header_title", "type": "text", "content": "Shoes" } },
//!   "metadata": { "pageType": "category", "version": 3 },
//!   "cmsBlocks": ["category_above_products"],
//!   "views": [{ "id": "grid", "label": "Grid" }]
//! }
//! ```
//!
//! Fields this crate does not model are kept in `extra` maps so that a
//! load/save cycle never drops data the renderer relies on.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::{PageType, TranslationMap};

/// A page layout document: slots plus page-level metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotConfiguration {
    /// Slots keyed by slot id. Required on the wire, may be empty.
    pub slots: BTreeMap<String, Slot>,
    #[serde(default)]
    pub metadata: ConfigurationMetadata,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cms_blocks: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub views: Vec<ViewMode>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Server-maintained bookkeeping about a document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    /// Published version number; absent on drafts that were never published.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_type: Option<PageType>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A named layout region.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    /// Slot id. Empty means "same as the map key".
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<SlotKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_class_name: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub styles: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub col_span: Option<ColSpan>,
    /// View ids in which the slot is visible. Empty means all views.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub view_mode: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    /// Explicit group for mirrored styling across repeated elements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mirror_group: Option<String>,
    #[serde(default, skip_serializing_if = "TranslationMap::is_empty")]
    pub translations: TranslationMap<SlotTranslation>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Localized slot content.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SlotTranslation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// The renderer component a slot maps to.
///
/// Unknown kinds are preserved as [`SlotKind::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SlotKind {
    Container,
    Grid,
    Flex,
    Text,
    Image,
    Button,
    Link,
    Html,
    Component,
    Other(String),
}

impl SlotKind {
    /// Wire name of the kind.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Container => "container",
            Self::Grid => "grid",
            Self::Flex => "flex",
            Self::Text => "text",
            Self::Image => "image",
            Self::Button => "button",
            Self::Link => "link",
            Self::Html => "html",
            Self::Component => "component",
            Self::Other(other) => other,
        }
    }
}

impl From<String> for SlotKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "container" => Self::Container,
            "grid" => Self::Grid,
            "flex" => Self::Flex,
            "text" => Self::Text,
            "image" => Self::Image,
            "button" => Self::Button,
            "link" => Self::Link,
            "html" => Self::Html,
            "component" => Self::Component,
            _ => Self::Other(value),
        }
    }
}

impl From<SlotKind> for String {
    fn from(kind: SlotKind) -> Self {
        match kind {
            SlotKind::Other(other) => other,
            known => known.as_str().to_owned(),
        }
    }
}

/// Column span: a fixed count, a per-view-mode map, or raw grid classes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColSpan {
    Columns(u16),
    PerView(BTreeMap<String, ColSpan>),
    Classes(String),
}

impl ColSpan {
    /// Column span applied in `view`, looking through per-view maps.
    #[must_use]
    pub fn for_view(&self, view: &str) -> Option<&Self> {
        match self {
            Self::PerView(map) => map.get(view).and_then(|span| span.for_view(view)),
            other => Some(other),
        }
    }
}

/// Grid coordinates of a slot within its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    #[serde(default)]
    pub col: u16,
    #[serde(default)]
    pub row: u16,
}

/// A view mode offered by the page (e.g. grid vs. list on category pages).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewMode {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// One entry in a page's publish history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedVersion {
    pub version: u32,
    pub published_at: DateTime<Utc>,
    pub configuration: SlotConfiguration,
}

impl PublishedVersion {
    /// Summary without the document body.
    #[must_use]
    pub const fn summary(&self) -> VersionSummary {
        VersionSummary {
            version: self.version,
            published_at: self.published_at,
        }
    }
}

/// A publish history entry without its document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionSummary {
    pub version: u32,
    pub published_at: DateTime<Utc>,
}

/// Structural problems found by [`SlotConfiguration::validate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("slot key must not be empty")]
    EmptySlotKey,

    #[error("slot '{key}' declares mismatched id '{id}'")]
    IdMismatch { key: String, id: String },

    #[error("slot '{slot}' refers to missing parent '{parent}'")]
    UnknownParent { slot: String, parent: String },

    #[error("slot '{0}' is its own ancestor")]
    ParentCycle(String),
}

impl Slot {
    /// Create a slot of `kind` with the given id.
    #[must_use]
    pub fn new(id: impl Into<String>, kind: SlotKind) -> Self {
        Self {
            id: id.into(),
            kind: Some(kind),
            ..Self::default()
        }
    }

    /// Builder: set the content.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Builder: set the class name.
    #[must_use]
    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// Builder: set the parent slot.
    #[must_use]
    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Builder: set the column span.
    #[must_use]
    pub fn with_col_span(mut self, col_span: ColSpan) -> Self {
        self.col_span = Some(col_span);
        self
    }

    /// Builder: set the grid position.
    #[must_use]
    pub fn at(mut self, col: u16, row: u16) -> Self {
        self.position = Some(Position { col, row });
        self
    }

    /// Content for `language`, falling back to English and then to the
    /// untranslated content.
    #[must_use]
    pub fn localized_content(&self, language: &str) -> Option<&str> {
        self.translations
            .resolve(language)
            .and_then(|t| t.content.as_deref())
            .or(self.content.as_deref())
    }
}

impl SlotConfiguration {
    /// An empty document for `page_type`.
    #[must_use]
    pub fn empty(page_type: PageType) -> Self {
        Self {
            slots: BTreeMap::new(),
            metadata: ConfigurationMetadata {
                page_type: Some(page_type),
                ..ConfigurationMetadata::default()
            },
            cms_blocks: Vec::new(),
            views: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Look up a slot by id.
    #[must_use]
    pub fn slot(&self, id: &str) -> Option<&Slot> {
        self.slots.get(id)
    }

    /// Mutable lookup by id.
    pub fn slot_mut(&mut self, id: &str) -> Option<&mut Slot> {
        self.slots.get_mut(id)
    }

    /// Insert a slot under its own id, replacing any previous slot.
    pub fn insert_slot(&mut self, slot: Slot) -> Option<Slot> {
        self.slots.insert(slot.id.clone(), slot)
    }

    /// Remove a slot and all of its descendants. Returns the removed ids.
    pub fn remove_slot(&mut self, id: &str) -> Vec<String> {
        let mut removed = Vec::new();
        let mut pending = vec![id.to_owned()];
        while let Some(current) = pending.pop() {
            if self.slots.remove(&current).is_some() {
                pending.extend(self.children(&current).map(|(key, _)| key.to_owned()));
                removed.push(current);
            }
        }
        removed
    }

    /// Direct children of `parent_id`, keyed by slot id.
    pub fn children<'a>(&'a self, parent_id: &'a str) -> impl Iterator<Item = (&'a str, &'a Slot)> {
        self.slots
            .iter()
            .filter(move |(_, slot)| slot.parent_id.as_deref() == Some(parent_id))
            .map(|(key, slot)| (key.as_str(), slot))
    }

    /// Whether two documents have the same editable content.
    ///
    /// Metadata is ignored because the server stamps it on every save.
    #[must_use]
    pub fn same_layout(&self, other: &Self) -> bool {
        self.slots == other.slots
            && self.cms_blocks == other.cms_blocks
            && self.views == other.views
            && self.extra == other.extra
    }

    /// Check slot ids and parent links.
    ///
    /// # Errors
    ///
    /// Returns the first structural problem found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (key, slot) in &self.slots {
            if key.is_empty() {
                return Err(ValidationError::EmptySlotKey);
            }
            if !slot.id.is_empty() && slot.id != *key {
                return Err(ValidationError::IdMismatch {
                    key: key.clone(),
                    id: slot.id.clone(),
                });
            }
            if let Some(parent) = &slot.parent_id
                && !self.slots.contains_key(parent)
            {
                return Err(ValidationError::UnknownParent {
                    slot: key.clone(),
                    parent: parent.clone(),
                });
            }
        }

        for key in self.slots.keys() {
            let mut seen = BTreeSet::new();
            let mut current = key.as_str();
            while let Some(parent) = self.slots.get(current).and_then(|s| s.parent_id.as_deref())
            {
                if parent == key || !seen.insert(parent) {
                    return Err(ValidationError::ParentCycle(key.clone()));
                }
                current = parent;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_minimal_document_deserializes() {
        let doc: SlotConfiguration =
            serde_json::from_value(json!({"slots": {"a": {"content": "x"}}})).unwrap();
        assert_eq!(doc.slot("a").unwrap().content.as_deref(), Some("x"));
        assert!(doc.cms_blocks.is_empty());
        assert_eq!(doc.metadata, ConfigurationMetadata::default());
    }

    #[test]
    fn test_missing_slots_is_rejected() {
        let result = serde_json::from_value::<SlotConfiguration>(json!({"metadata": {}}));
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_fields_survive_round_trip() {
        let input = json!({
            "slots": {
                "hero": {
                    "id": "hero",
                    "type": "carousel",
                    "content": "Hi",
                    "animation": {"kind": "fade"}
                }
            },
            "metadata": {"pageType": "product", "editor": "v2"},
            "theme": "dark"
        });
        let doc: SlotConfiguration = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(
            doc.slot("hero").unwrap().kind,
            Some(SlotKind::Other("carousel".to_owned()))
        );
        assert_eq!(serde_json::to_value(&doc).unwrap(), input);
    }

    #[test]
    fn test_col_span_variants() {
        let fixed: ColSpan = serde_json::from_value(json!(6)).unwrap();
        assert_eq!(fixed, ColSpan::Columns(6));

        let per_view: ColSpan = serde_json::from_value(json!({"grid": 4, "list": 12})).unwrap();
        assert_eq!(per_view.for_view("list"), Some(&ColSpan::Columns(12)));
        assert_eq!(per_view.for_view("table"), None);

        let classes: ColSpan = serde_json::from_value(json!("col-span-12 md:col-span-6")).unwrap();
        assert!(matches!(classes, ColSpan::Classes(_)));
    }

    #[test]
    fn test_localized_content_fallbacks() {
        let mut slot = Slot::new("title", SlotKind::Text).with_content("raw");
        assert_eq!(slot.localized_content("nl"), Some("raw"));

        slot.translations.insert(
            "en",
            SlotTranslation {
                content: Some("Title".to_owned()),
            },
        );
        slot.translations.insert(
            "nl",
            SlotTranslation {
                content: Some("Titel".to_owned()),
            },
        );
        assert_eq!(slot.localized_content("nl"), Some("Titel"));
        assert_eq!(slot.localized_content("fr"), Some("Title"));
    }

    #[test]
    fn test_remove_slot_takes_descendants() {
        let mut doc = SlotConfiguration::empty(PageType::Cart);
        doc.insert_slot(Slot::new("root", SlotKind::Container));
        doc.insert_slot(Slot::new("row", SlotKind::Flex).with_parent("root"));
        doc.insert_slot(Slot::new("cell", SlotKind::Text).with_parent("row"));
        doc.insert_slot(Slot::new("other", SlotKind::Text));

        let mut removed = doc.remove_slot("root");
        removed.sort();
        assert_eq!(removed, vec!["cell", "root", "row"]);
        assert_eq!(doc.slots.len(), 1);
        assert!(doc.slot("other").is_some());
    }

    #[test]
    fn test_same_layout_ignores_metadata() {
        let mut a = SlotConfiguration::empty(PageType::Cart);
        a.insert_slot(Slot::new("x", SlotKind::Text));
        let mut b = a.clone();
        b.metadata.version = Some(7);
        b.metadata.last_modified = Some(Utc::now());
        assert!(a.same_layout(&b));

        b.slot_mut("x").unwrap().content = Some("changed".to_owned());
        assert!(!a.same_layout(&b));
    }

    #[test]
    fn test_validate_rejects_mismatched_id() {
        let mut doc = SlotConfiguration::empty(PageType::Cart);
        doc.slots
            .insert("a".to_owned(), Slot::new("b", SlotKind::Text));
        assert_eq!(
            doc.validate(),
            Err(ValidationError::IdMismatch {
                key: "a".to_owned(),
                id: "b".to_owned()
            })
        );
    }

    #[test]
    fn test_validate_rejects_missing_parent_and_cycles() {
        let mut doc = SlotConfiguration::empty(PageType::Cart);
        doc.insert_slot(Slot::new("child", SlotKind::Text).with_parent("ghost"));
        assert!(matches!(
            doc.validate(),
            Err(ValidationError::UnknownParent { .. })
        ));

        let mut doc = SlotConfiguration::empty(PageType::Cart);
        doc.insert_slot(Slot::new("a", SlotKind::Container).with_parent("b"));
        doc.insert_slot(Slot::new("b", SlotKind::Container).with_parent("a"));
        assert!(matches!(doc.validate(), Err(ValidationError::ParentCycle(_))));
    }

    #[test]
    fn test_validate_accepts_keyed_slots_without_ids() {
        let doc: SlotConfiguration =
            serde_json::from_value(json!({"slots": {"a": {"content": "x"}}})).unwrap();
        assert!(doc.validate().is_ok());
    }
}
