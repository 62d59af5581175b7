//! Per-language translation maps.
//!
//! Translatable entities carry a `translations` object keyed by language
//! code. The `en` entry is the canonical fallback when a requested language
//! is missing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Language code used as the fallback for every lookup.
pub const FALLBACK_LANGUAGE: &str = "en";

/// Translations of `T` keyed by language code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslationMap<T>(BTreeMap<String, T>);

impl<T> Default for TranslationMap<T> {
    fn default() -> Self {
        Self(BTreeMap::new())
    }
}

impl<T> TranslationMap<T> {
    /// Create an empty translation map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the entry for `language`.
    pub fn insert(&mut self, language: impl Into<String>, value: T) -> Option<T> {
        self.0.insert(language.into(), value)
    }

    /// Exact lookup without fallback.
    #[must_use]
    pub fn get(&self, language: &str) -> Option<&T> {
        self.0.get(language)
    }

    /// Look up `language`, falling back to the `en` entry.
    #[must_use]
    pub fn resolve(&self, language: &str) -> Option<&T> {
        self.0
            .get(language)
            .or_else(|| self.0.get(FALLBACK_LANGUAGE))
    }

    /// Language codes present in the map.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Whether the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T> FromIterator<(String, T)> for TranslationMap<T> {
    fn from_iter<I: IntoIterator<Item = (String, T)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TranslationMap<&'static str> {
        let mut map = TranslationMap::new();
        map.insert("en", "Add to cart");
        map.insert("nl", "In winkelwagen");
        map
    }

    #[test]
    fn test_resolve_prefers_requested_language() {
        assert_eq!(sample().resolve("nl"), Some(&"In winkelwagen"));
    }

    #[test]
    fn test_resolve_falls_back_to_english() {
        assert_eq!(sample().resolve("de"), Some(&"Add to cart"));
        assert_eq!(sample().get("de"), None);
    }

    #[test]
    fn test_resolve_without_english_is_none() {
        let mut map = TranslationMap::new();
        map.insert("fr", "Ajouter");
        assert_eq!(map.resolve("de"), None);
    }
}
