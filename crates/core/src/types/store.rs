//! Store (tenant) records and their settings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::StoreId;

/// A tenant owning its own catalog, content and configuration documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub id: StoreId,
    pub name: String,
    /// URL-safe unique handle.
    pub slug: String,
    pub settings: StoreSettings,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Settings stored as JSON alongside the store row.
///
/// Missing keys deserialize to their defaults so older rows stay readable.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreSettings {
    pub cache_policy: CachePolicy,
    pub sales_automation: SalesAutomation,
    pub seo: SeoDefaults,
}

/// Storefront response caching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CachePolicy {
    pub enabled: bool,
    pub ttl_seconds: u32,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_seconds: 300,
        }
    }
}

/// Order automation flags.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SalesAutomation {
    pub auto_invoice: bool,
    pub auto_ship: bool,
}

/// SEO fallbacks used when a page has no explicit metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeoDefaults {
    pub default_title: Option<String>,
    pub default_description: Option<String>,
    /// Title template; `{title}` is replaced with the page title.
    pub title_template: String,
}

impl Default for SeoDefaults {
    fn default() -> Self {
        Self {
            default_title: None,
            default_description: None,
            title_template: "{title}".to_owned(),
        }
    }
}

impl SeoDefaults {
    /// Render a page title through the template.
    #[must_use]
    pub fn render_title(&self, title: &str) -> String {
        self.title_template.replace("{title}", title)
    }
}

/// Validate a store slug: lowercase ASCII letters, digits and dashes.
///
/// # Errors
///
/// Returns a description of the problem if the slug is invalid.
pub fn validate_slug(slug: &str) -> Result<(), String> {
    if slug.is_empty() {
        return Err("slug must not be empty".to_owned());
    }
    if slug.starts_with('-') || slug.ends_with('-') {
        return Err("slug must not start or end with '-'".to_owned());
    }
    if let Some(c) = slug
        .chars()
        .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-'))
    {
        return Err(format!("slug contains invalid character '{c}'"));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_fill_missing_keys_with_defaults() {
        let settings: StoreSettings =
            serde_json::from_str(r#"{"salesAutomation":{"autoShip":true}}"#).unwrap();
        assert!(settings.sales_automation.auto_ship);
        assert!(!settings.sales_automation.auto_invoice);
        assert_eq!(settings.cache_policy, CachePolicy::default());
        assert_eq!(settings.seo.title_template, "{title}");
    }

    #[test]
    fn test_render_title() {
        let seo = SeoDefaults {
            title_template: "{title} | Acme".to_owned(),
            ..SeoDefaults::default()
        };
        assert_eq!(seo.render_title("Shoes"), "Shoes | Acme");
    }

    #[test]
    fn test_validate_slug() {
        assert!(validate_slug("acme-shop-2").is_ok());
        assert!(validate_slug("").is_err());
        assert!(validate_slug("-acme").is_err());
        assert!(validate_slug("Acme").is_err());
        assert!(validate_slug("acme shop").is_err());
    }
}
