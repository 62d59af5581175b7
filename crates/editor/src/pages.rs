//! Per-page editor profiles.
//!
//! Each page editor is the generic [`SlotEditor`] plus a profile: the page's
//! default slot set, which repeated families mirror their styling, and the
//! mock data the preview renders with.

use std::sync::Arc;

use pagecraft_core::defaults::{
    self, DEFAULT_CART_ITEMS, DEFAULT_PRODUCT_CARDS, DEFAULT_RELATED_PRODUCTS,
};
use pagecraft_core::{
    CurrencyCode, PageType, Price, SlotConfiguration, SlotConfigurationService, StoreId,
};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::editor::SlotEditor;
use crate::mirror::MirrorRules;

/// Page-specific settings for an editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageEditorProfile {
    pub page_type: PageType,
    /// Heading shown above the editor.
    pub title: &'static str,
    /// Repeated element families mirrored on this page.
    pub mirror_families: &'static [&'static str],
}

impl PageEditorProfile {
    /// The profile for `page_type`.
    #[must_use]
    pub const fn for_page(page_type: PageType) -> Self {
        let (title, mirror_families): (&'static str, &'static [&'static str]) = match page_type {
            PageType::Category => ("Category page", &["product"]),
            PageType::Product => ("Product page", &["related_product"]),
            PageType::Cart => ("Cart", &["cart_item"]),
            PageType::Checkout => ("Checkout", &[]),
            PageType::Success => ("Order confirmation", &[]),
            PageType::Account => ("Customer account", &[]),
            PageType::Login => ("Sign in", &[]),
            PageType::Header => ("Header", &[]),
        };
        Self {
            page_type,
            title,
            mirror_families,
        }
    }

    /// Profiles for every page type.
    pub fn all() -> impl Iterator<Item = Self> {
        PageType::ALL.into_iter().map(Self::for_page)
    }

    /// The built-in default document.
    #[must_use]
    pub fn default_configuration(&self) -> SlotConfiguration {
        defaults::for_page(self.page_type)
    }

    /// Mirror rules for this page. Pages without repeated families only
    /// mirror explicit groups.
    #[must_use]
    pub fn mirror_rules(&self) -> MirrorRules {
        MirrorRules::for_families(self.mirror_families.iter().copied())
    }

    /// Create an editing session for `store_id`.
    #[must_use]
    pub fn editor<S: SlotConfigurationService>(
        &self,
        service: Arc<S>,
        store_id: StoreId,
    ) -> SlotEditor<S> {
        SlotEditor::with_mirror_rules(service, store_id, self.page_type, self.mirror_rules())
    }

    /// Mock data for previewing this page.
    #[must_use]
    pub fn context(&self) -> PreviewContext {
        let mut context = PreviewContext {
            page_type: self.page_type,
            store_name: "Demo Store".to_owned(),
            category: None,
            products: Vec::new(),
            product: None,
            cart: None,
            customer: None,
            order: None,
        };

        match self.page_type {
            PageType::Category => {
                context.category = Some(MockCategory {
                    name: "New Arrivals".to_owned(),
                    slug: "new-arrivals".to_owned(),
                    description: "The latest additions to the catalog.".to_owned(),
                });
                context.products = mock_products(DEFAULT_PRODUCT_CARDS);
            }
            PageType::Product => {
                context.product = mock_products(1).into_iter().next();
                context.products = mock_products(DEFAULT_RELATED_PRODUCTS + 1)
                    .into_iter()
                    .skip(1)
                    .collect();
            }
            PageType::Cart | PageType::Checkout => {
                context.cart = Some(MockCart::new(mock_products(DEFAULT_CART_ITEMS)));
            }
            PageType::Success => {
                let cart = MockCart::new(mock_products(DEFAULT_CART_ITEMS));
                context.order = Some(MockOrder {
                    number: "#100042".to_owned(),
                    total: cart.subtotal,
                });
                context.customer = Some(MockCustomer::demo());
            }
            PageType::Account => context.customer = Some(MockCustomer::demo()),
            PageType::Header => {
                context.cart = Some(MockCart::new(mock_products(1)));
            }
            PageType::Login => {}
        }

        context
    }
}

/// Data the preview renders a page with.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewContext {
    pub page_type: PageType,
    pub store_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<MockCategory>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub products: Vec<MockProduct>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<MockProduct>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cart: Option<MockCart>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<MockCustomer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<MockOrder>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MockCategory {
    pub name: String,
    pub slug: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MockProduct {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub sku: String,
    pub price: Price,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compare_at_price: Option<Price>,
    pub image_url: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MockCartItem {
    pub product: MockProduct,
    pub quantity: u32,
    pub line_total: Price,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MockCart {
    pub items: Vec<MockCartItem>,
    pub subtotal: Price,
}

impl MockCart {
    /// A cart holding `products`, quantities 1, 2, 3...
    fn new(products: Vec<MockProduct>) -> Self {
        let items: Vec<MockCartItem> = products
            .into_iter()
            .zip(1u32..)
            .map(|(product, quantity)| MockCartItem {
                line_total: Price::new(
                    product.price.amount * Decimal::from(quantity),
                    product.price.currency_code,
                ),
                product,
                quantity,
            })
            .collect();
        let subtotal = Price::new(
            items.iter().map(|item| item.line_total.amount).sum(),
            CurrencyCode::USD,
        );
        Self { items, subtotal }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MockCustomer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl MockCustomer {
    fn demo() -> Self {
        Self {
            first_name: "Alex".to_owned(),
            last_name: "Rivera".to_owned(),
            email: "alex@example.com".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MockOrder {
    pub number: String,
    pub total: Price,
}

const SAMPLE_NAMES: [&str; 6] = [
    "Linen Shirt",
    "Canvas Tote",
    "Wool Beanie",
    "Leather Belt",
    "Denim Jacket",
    "Cotton Socks",
];

fn mock_products(count: u16) -> Vec<MockProduct> {
    SAMPLE_NAMES
        .iter()
        .cycle()
        .zip(1..=i64::from(count))
        .map(|(name, n)| {
            let slug = name.to_lowercase().replace(' ', "-");
            MockProduct {
                id: format!("mock-{n}"),
                name: (*name).to_owned(),
                sku: format!("SKU-{n:04}"),
                price: Price::from_minor(1499 + n * 500, CurrencyCode::USD),
                compare_at_price: (n % 2 == 0)
                    .then(|| Price::from_minor(2499 + n * 500, CurrencyCode::USD)),
                image_url: format!("/static/placeholder/{slug}.jpg"),
                slug,
            }
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pagecraft_core::MemorySlotStore;

    use super::*;

    #[test]
    fn test_every_page_has_a_valid_default() {
        for profile in PageEditorProfile::all() {
            let doc = profile.default_configuration();
            assert!(doc.validate().is_ok(), "{:?}", profile.page_type);
            assert_eq!(doc.metadata.page_type, Some(profile.page_type));
        }
    }

    #[test]
    fn test_category_context_matches_grid() {
        let context = PageEditorProfile::for_page(PageType::Category).context();
        assert_eq!(context.products.len(), usize::from(DEFAULT_PRODUCT_CARDS));
        assert!(context.category.is_some());
        assert_eq!(context.products.first().unwrap().price.display(), "$19.99");
    }

    #[test]
    fn test_cart_subtotal() {
        let cart = PageEditorProfile::for_page(PageType::Cart)
            .context()
            .cart
            .unwrap();
        // 19.99 * 1 + 24.99 * 2
        assert_eq!(cart.subtotal.display(), "$69.97");
    }

    #[test]
    fn test_product_context_has_related_products() {
        let context = PageEditorProfile::for_page(PageType::Product).context();
        assert_eq!(context.product.unwrap().id, "mock-1");
        assert_eq!(context.products.len(), usize::from(DEFAULT_RELATED_PRODUCTS));
        assert!(context.products.iter().all(|p| p.id != "mock-1"));
    }

    #[test]
    fn test_mirror_rules_follow_profile() {
        let category = PageEditorProfile::for_page(PageType::Category);
        let doc = category.default_configuration();
        assert_eq!(category.mirror_rules().siblings(&doc, "product_1_price").len(), 3);

        let login = PageEditorProfile::for_page(PageType::Login);
        let doc = login.default_configuration();
        assert!(login.mirror_rules().groups(&doc).is_empty());
    }

    #[tokio::test]
    async fn test_profile_editor_loads_page_defaults() {
        let profile = PageEditorProfile::for_page(PageType::Cart);
        let mut editor = profile.editor(Arc::new(MemorySlotStore::new()), StoreId::generate());
        editor.load().await.unwrap();
        assert!(
            editor
                .configuration()
                .unwrap()
                .same_layout(&profile.default_configuration())
        );
        let doc = editor.configuration().unwrap();
        assert_eq!(
            editor.mirror_rules().siblings(doc, "cart_item_1_row"),
            vec!["cart_item_2_row".to_owned()]
        );
    }
}
