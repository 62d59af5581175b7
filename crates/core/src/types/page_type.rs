//! Page types that own a slot configuration.

use serde::{Deserialize, Serialize};

/// Error returned when a page type string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown page type: {0}")]
pub struct UnknownPageType(pub String);

/// A storefront page whose layout is described by slots.
///
/// Each store has at most one draft and one live configuration per page type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageType {
    /// Category listing with a product grid.
    Category,
    /// Product detail page.
    Product,
    /// Shopping cart.
    Cart,
    /// Checkout flow.
    Checkout,
    /// Order confirmation.
    Success,
    /// Customer account dashboard.
    Account,
    /// Customer login and registration.
    Login,
    /// Site-wide header.
    Header,
}

impl PageType {
    /// Every page type, in display order.
    pub const ALL: [Self; 8] = [
        Self::Category,
        Self::Product,
        Self::Cart,
        Self::Checkout,
        Self::Success,
        Self::Account,
        Self::Login,
        Self::Header,
    ];

    /// Lowercase identifier used in URLs and database rows.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Product => "product",
            Self::Cart => "cart",
            Self::Checkout => "checkout",
            Self::Success => "success",
            Self::Account => "account",
            Self::Login => "login",
            Self::Header => "header",
        }
    }
}

impl std::fmt::Display for PageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PageType {
    type Err = UnknownPageType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|page| page.as_str() == s)
            .ok_or_else(|| UnknownPageType(s.to_owned()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_page_type_parse_matches_display() {
        for page in PageType::ALL {
            assert_eq!(page.to_string().parse::<PageType>().unwrap(), page);
        }
    }

    #[test]
    fn test_page_type_rejects_unknown() {
        assert!("homepage".parse::<PageType>().is_err());
        assert!("Category".parse::<PageType>().is_err());
    }

    #[test]
    fn test_page_type_serde_uses_lowercase() {
        let json = serde_json::to_string(&PageType::Checkout).unwrap();
        assert_eq!(json, "\"checkout\"");
    }
}
