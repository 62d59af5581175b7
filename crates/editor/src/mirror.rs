//! Mirrored styling across repeated elements.
//!
//! Repeated page elements (product cards in a grid, cart rows) share their
//! styling: editing `product_1_price` restyles `product_2_price`,
//! `product_3_price` and so on. Slots are grouped by an explicit
//! `mirrorGroup` when one is set, otherwise by the `<family>_<index>_<role>`
//! pattern of their id. Only styling and layout properties are mirrored;
//! content and position always stay per slot.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use pagecraft_core::{ColSpan, Position, Slot, SlotConfiguration};
use regex::Regex;
use serde_json::Value;

/// Regex for ids of repeated elements: `product_3_add_to_cart`.
///
/// Family segments start with a letter so the numeric index is never
/// swallowed by the family.
static REPEATED_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-z][a-z0-9]*(?:_[a-z][a-z0-9]*)*)_(\d+)_([a-z][a-z0-9_]*)$")
        .expect("Invalid regex")
});

/// The parts of a repeated element id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepeatedId<'a> {
    pub family: &'a str,
    pub index: u32,
    pub role: &'a str,
}

/// Split `product_3_add_to_cart` into family, index and role.
#[must_use]
pub fn parse_repeated_id(id: &str) -> Option<RepeatedId<'_>> {
    let caps = REPEATED_ID_RE.captures(id)?;
    Some(RepeatedId {
        family: caps.get(1)?.as_str(),
        index: caps.get(2)?.as_str().parse().ok()?,
        role: caps.get(3)?.as_str(),
    })
}

/// Identity shared by slots that mirror each other.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MirrorKey {
    /// Explicit `mirrorGroup`.
    Group(String),
    /// Inferred from the id: same family, same role.
    Role { family: String, role: String },
}

/// A slot property copied between mirrored slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MirroredProperty {
    ClassName,
    ParentClassName,
    /// The whole inline style map.
    Styles,
    /// One inline style key. Other keys on the sibling are left alone.
    Style(String),
    ColSpan,
}

impl MirroredProperty {
    /// Everything that makes up a slot's styling.
    #[must_use]
    pub fn all() -> Vec<Self> {
        vec![
            Self::ClassName,
            Self::ParentClassName,
            Self::Styles,
            Self::ColSpan,
        ]
    }

    /// Copy this property from `from` onto `to`. Returns whether `to` changed.
    fn copy(&self, from: &Slot, to: &mut Slot) -> bool {
        match self {
            Self::ClassName => replace(&mut to.class_name, &from.class_name),
            Self::ParentClassName => replace(&mut to.parent_class_name, &from.parent_class_name),
            Self::Styles => replace(&mut to.styles, &from.styles),
            Self::Style(key) => {
                let value = from.styles.get(key);
                if to.styles.get(key) == value {
                    return false;
                }
                match value {
                    Some(value) => to.styles.insert(key.clone(), value.clone()),
                    None => to.styles.remove(key),
                };
                true
            }
            Self::ColSpan => replace(&mut to.col_span, &from.col_span),
        }
    }
}

fn replace<T: Clone + PartialEq>(target: &mut T, source: &T) -> bool {
    if target == source {
        false
    } else {
        target.clone_from(source);
        true
    }
}

/// A single user edit to one slot.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotEdit {
    /// Replace the slot's classes.
    ClassName(Option<String>),
    /// Replace the wrapper classes.
    ParentClassName(Option<String>),
    /// Set (`Some`) or remove (`None`) one inline style.
    Style {
        property: String,
        value: Option<Value>,
    },
    /// Change the column span.
    Resize(Option<ColSpan>),
    /// Replace the slot's content. Never mirrored.
    Content(Option<String>),
    /// Move the slot. Position is never mirrored, but the moved slot's
    /// styling is re-synced to its group.
    Drop {
        position: Position,
        parent_id: Option<String>,
    },
}

impl SlotEdit {
    fn apply(self, slot: &mut Slot) {
        match self {
            Self::ClassName(class_name) => slot.class_name = class_name,
            Self::ParentClassName(class_name) => slot.parent_class_name = class_name,
            Self::Style {
                property,
                value: Some(value),
            } => {
                slot.styles.insert(property, value);
            }
            Self::Style {
                property,
                value: None,
            } => {
                slot.styles.remove(&property);
            }
            Self::Resize(col_span) => slot.col_span = col_span,
            Self::Content(content) => slot.content = content,
            Self::Drop {
                position,
                parent_id,
            } => {
                slot.position = Some(position);
                if parent_id.is_some() {
                    slot.parent_id = parent_id;
                }
            }
        }
    }

    /// Properties to push to mirrored siblings after this edit.
    #[must_use]
    pub fn mirrored_properties(&self) -> Vec<MirroredProperty> {
        match self {
            Self::ClassName(_) => vec![MirroredProperty::ClassName],
            Self::ParentClassName(_) => vec![MirroredProperty::ParentClassName],
            Self::Style { property, .. } => vec![MirroredProperty::Style(property.clone())],
            Self::Resize(_) => vec![MirroredProperty::ColSpan],
            Self::Content(_) => Vec::new(),
            Self::Drop { .. } => MirroredProperty::all(),
        }
    }
}

/// Which repeated families mirror their styling.
///
/// Explicit `mirrorGroup`s always mirror, whatever the rules.
#[derive(Debug, Clone, Default)]
pub struct MirrorRules {
    /// Families whose ids are grouped by pattern. `None` means every family.
    families: Option<Vec<String>>,
}

impl MirrorRules {
    /// Mirror every repeated family.
    #[must_use]
    pub const fn all() -> Self {
        Self { families: None }
    }

    /// Mirror only the given families. An empty list leaves only explicit
    /// groups.
    #[must_use]
    pub fn for_families<I, S>(families: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            families: Some(families.into_iter().map(Into::into).collect()),
        }
    }

    /// The mirror key of a slot, if it belongs to a group.
    #[must_use]
    pub fn key(&self, id: &str, slot: &Slot) -> Option<MirrorKey> {
        if let Some(group) = slot.mirror_group.as_deref()
            && !group.is_empty()
        {
            return Some(MirrorKey::Group(group.to_owned()));
        }

        let repeated = parse_repeated_id(id)?;
        if let Some(families) = &self.families
            && !families.iter().any(|f| f == repeated.family)
        {
            return None;
        }
        Some(MirrorKey::Role {
            family: repeated.family.to_owned(),
            role: repeated.role.to_owned(),
        })
    }

    /// Ids of the other slots mirrored with `id`.
    #[must_use]
    pub fn siblings(&self, config: &SlotConfiguration, id: &str) -> Vec<String> {
        let Some(key) = config.slot(id).and_then(|slot| self.key(id, slot)) else {
            return Vec::new();
        };
        config
            .slots
            .iter()
            .filter(|(other, slot)| {
                other.as_str() != id && self.key(other, slot).as_ref() == Some(&key)
            })
            .map(|(other, _)| other.clone())
            .collect()
    }

    /// Every mirror group in the document with its member ids.
    #[must_use]
    pub fn groups(&self, config: &SlotConfiguration) -> BTreeMap<MirrorKey, Vec<String>> {
        let mut groups: BTreeMap<MirrorKey, Vec<String>> = BTreeMap::new();
        for (id, slot) in &config.slots {
            if let Some(key) = self.key(id, slot) {
                groups.entry(key).or_default().push(id.clone());
            }
        }
        groups
    }

    /// Copy `properties` from `source_id` to its siblings.
    ///
    /// Returns the ids of siblings that changed.
    pub fn propagate(
        &self,
        config: &mut SlotConfiguration,
        source_id: &str,
        properties: &[MirroredProperty],
    ) -> Vec<String> {
        if properties.is_empty() {
            return Vec::new();
        }
        let Some(source) = config.slot(source_id).cloned() else {
            return Vec::new();
        };

        let mut changed = Vec::new();
        for sibling_id in self.siblings(config, source_id) {
            if let Some(sibling) = config.slot_mut(&sibling_id) {
                let mut touched = false;
                for property in properties {
                    touched |= property.copy(&source, sibling);
                }
                if touched {
                    changed.push(sibling_id);
                }
            }
        }
        changed
    }

    /// Apply `edit` to `id` and mirror it to the slot's group.
    ///
    /// Returns the ids that changed (the edited slot first), or `None` if
    /// `id` is not in the document.
    pub fn apply(
        &self,
        config: &mut SlotConfiguration,
        id: &str,
        edit: SlotEdit,
    ) -> Option<Vec<String>> {
        let properties = edit.mirrored_properties();
        edit.apply(config.slot_mut(id)?);

        let mut changed = vec![id.to_owned()];
        changed.extend(self.propagate(config, id, &properties));
        Some(changed)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pagecraft_core::{PageType, SlotKind, defaults};
    use serde_json::json;

    use super::*;

    fn category() -> SlotConfiguration {
        defaults::for_page(PageType::Category)
    }

    #[test]
    fn test_parse_repeated_id() {
        let parsed = parse_repeated_id("product_3_add_to_cart").unwrap();
        assert_eq!(parsed.family, "product");
        assert_eq!(parsed.index, 3);
        assert_eq!(parsed.role, "add_to_cart");

        let parsed = parse_repeated_id("related_product_2_price").unwrap();
        assert_eq!(parsed.family, "related_product");
        assert_eq!(parsed.role, "price");

        assert!(parse_repeated_id("product_grid").is_none());
        assert!(parse_repeated_id("header").is_none());
    }

    #[test]
    fn test_class_edit_mirrors_to_same_role_only() {
        let mut doc = category();
        let before_name = doc.slot("product_1_name").cloned();

        let changed = MirrorRules::all()
            .apply(
                &mut doc,
                "product_1_price",
                SlotEdit::ClassName(Some("text-lg font-bold".to_owned())),
            )
            .unwrap();

        assert_eq!(changed.first().map(String::as_str), Some("product_1_price"));
        for id in ["product_2_price", "product_3_price"] {
            assert!(changed.iter().any(|c| c == id));
            assert_eq!(
                doc.slot(id).unwrap().class_name.as_deref(),
                Some("text-lg font-bold")
            );
        }
        assert_eq!(doc.slot("product_1_name").cloned(), before_name);
    }

    #[test]
    fn test_content_is_not_mirrored() {
        let mut doc = category();
        let before = doc.slot("product_2_name").unwrap().content.clone();

        let changed = MirrorRules::all()
            .apply(&mut doc, "product_1_name", SlotEdit::Content(Some("Hat".to_owned())))
            .unwrap();

        assert_eq!(changed, vec!["product_1_name".to_owned()]);
        assert_eq!(doc.slot("product_2_name").unwrap().content, before);
    }

    #[test]
    fn test_style_and_resize_mirror() {
        let mut doc = category();
        let rules = MirrorRules::all();

        rules.apply(
            &mut doc,
            "product_2_image",
            SlotEdit::Style {
                property: "borderRadius".to_owned(),
                value: Some(json!("8px")),
            },
        );
        rules.apply(&mut doc, "product_2_card", SlotEdit::Resize(Some(ColSpan::Columns(2))));

        assert_eq!(
            doc.slot("product_4_image").unwrap().styles.get("borderRadius"),
            Some(&json!("8px"))
        );
        assert_eq!(
            doc.slot("product_1_card").unwrap().col_span,
            Some(ColSpan::Columns(2))
        );
    }

    #[test]
    fn test_style_edit_keeps_sibling_only_styles() {
        let mut doc = category();
        let rules = MirrorRules::all();
        doc.slot_mut("product_3_image")
            .unwrap()
            .styles
            .insert("opacity".to_owned(), json!("0.5"));

        let changed = rules
            .apply(
                &mut doc,
                "product_1_image",
                SlotEdit::Style {
                    property: "borderRadius".to_owned(),
                    value: Some(json!("8px")),
                },
            )
            .unwrap();
        assert!(changed.iter().any(|c| c == "product_3_image"));

        let third = doc.slot("product_3_image").unwrap();
        assert_eq!(third.styles.get("borderRadius"), Some(&json!("8px")));
        assert_eq!(third.styles.get("opacity"), Some(&json!("0.5")));
        assert!(!doc.slot("product_2_image").unwrap().styles.contains_key("opacity"));

        // Removing a style removes that key from every sibling.
        rules.apply(
            &mut doc,
            "product_2_image",
            SlotEdit::Style {
                property: "borderRadius".to_owned(),
                value: None,
            },
        );
        let third = doc.slot("product_3_image").unwrap();
        assert!(!third.styles.contains_key("borderRadius"));
        assert_eq!(third.styles.get("opacity"), Some(&json!("0.5")));
    }

    #[test]
    fn test_drop_resyncs_whole_style_map_to_group() {
        let mut doc = category();
        doc.slot_mut("product_2_card")
            .unwrap()
            .styles
            .insert("opacity".to_owned(), json!("0.5"));

        MirrorRules::all().apply(
            &mut doc,
            "product_1_card",
            SlotEdit::Drop {
                position: Position { col: 3, row: 2 },
                parent_id: None,
            },
        );

        assert_eq!(
            doc.slot("product_2_card").unwrap().styles,
            doc.slot("product_1_card").unwrap().styles
        );
    }

    #[test]
    fn test_drop_moves_only_the_dropped_slot() {
        let mut doc = category();
        let rules = MirrorRules::all();
        let other_position = doc.slot("product_2_card").unwrap().position;

        rules.apply(
            &mut doc,
            "product_1_card",
            SlotEdit::Drop {
                position: Position { col: 3, row: 2 },
                parent_id: None,
            },
        );

        assert_eq!(
            doc.slot("product_1_card").unwrap().position,
            Some(Position { col: 3, row: 2 })
        );
        assert_eq!(doc.slot("product_2_card").unwrap().position, other_position);
    }

    #[test]
    fn test_explicit_group_takes_precedence() {
        let mut doc = SlotConfiguration::empty(PageType::Header);
        let mut promo = Slot::new("promo_1_banner", SlotKind::Text);
        promo.mirror_group = Some("banners".to_owned());
        let mut hero = Slot::new("hero", SlotKind::Text);
        hero.mirror_group = Some("banners".to_owned());
        doc.insert_slot(promo);
        doc.insert_slot(hero);
        doc.insert_slot(Slot::new("promo_2_banner", SlotKind::Text));

        let rules = MirrorRules::all();
        assert_eq!(rules.siblings(&doc, "promo_1_banner"), vec!["hero".to_owned()]);
        assert!(rules.siblings(&doc, "promo_2_banner").is_empty());
    }

    #[test]
    fn test_family_filter() {
        let doc = category();
        let rules = MirrorRules::for_families(["cart_item"]);
        assert!(rules.siblings(&doc, "product_1_price").is_empty());

        let groups = MirrorRules::all().groups(&doc);
        let prices = groups
            .get(&MirrorKey::Role {
                family: "product".to_owned(),
                role: "price".to_owned(),
            })
            .unwrap();
        assert_eq!(prices.len(), usize::from(defaults::DEFAULT_PRODUCT_CARDS));
    }

    #[test]
    fn test_unknown_slot() {
        let mut doc = category();
        assert!(
            MirrorRules::all()
                .apply(&mut doc, "missing", SlotEdit::ClassName(None))
                .is_none()
        );
    }
}
