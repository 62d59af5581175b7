//! Built-in default slot sets, one per page type.
//!
//! These are the documents an editor falls back to when a store has neither
//! a draft nor a published configuration for a page. Content uses
//! `{{placeholder}}` tokens that the storefront renderer fills in.

use crate::configuration::{ColSpan, Slot, SlotConfiguration, SlotKind, ViewMode};
use crate::types::PageType;

/// Number of repeated product cards in the default category grid.
pub const DEFAULT_PRODUCT_CARDS: u16 = 4;

/// Number of related products on the default product page.
pub const DEFAULT_RELATED_PRODUCTS: u16 = 3;

/// Number of sample line items on the default cart page.
pub const DEFAULT_CART_ITEMS: u16 = 2;

/// Default document for `page_type`.
#[must_use]
pub fn for_page(page_type: PageType) -> SlotConfiguration {
    let mut doc = SlotConfiguration::empty(page_type);
    match page_type {
        PageType::Category => category(&mut doc),
        PageType::Product => product(&mut doc),
        PageType::Cart => cart(&mut doc),
        PageType::Checkout => checkout(&mut doc),
        PageType::Success => success(&mut doc),
        PageType::Account => account(&mut doc),
        PageType::Login => login(&mut doc),
        PageType::Header => header(&mut doc),
    }
    doc
}

fn container(id: &str, parent: Option<&str>, class_name: &str) -> Slot {
    let slot = Slot::new(id, SlotKind::Container).with_class(class_name);
    match parent {
        Some(parent) => slot.with_parent(parent),
        None => slot,
    }
}

fn leaf(id: &str, kind: SlotKind, parent: &str, content: &str, class_name: &str) -> Slot {
    Slot::new(id, kind)
        .with_parent(parent)
        .with_content(content)
        .with_class(class_name)
}

fn component(id: &str, parent: &str, name: &str) -> Slot {
    leaf(id, SlotKind::Component, parent, name, "")
}

fn category(doc: &mut SlotConfiguration) {
    doc.views = vec![
        ViewMode {
            id: "grid".to_owned(),
            label: "Grid".to_owned(),
            icon: Some("Grid".to_owned()),
        },
        ViewMode {
            id: "list".to_owned(),
            label: "List".to_owned(),
            icon: Some("List".to_owned()),
        },
    ];
    doc.cms_blocks = vec![
        "category_above_products".to_owned(),
        "category_below_products".to_owned(),
    ];

    doc.insert_slot(container("page_header", None, "mb-6").at(1, 1));
    doc.insert_slot(leaf(
        "category_title",
        SlotKind::Text,
        "page_header",
        "{{category.name}}",
        "text-3xl font-bold",
    ));
    doc.insert_slot(leaf(
        "category_description",
        SlotKind::Html,
        "page_header",
        "{{category.description}}",
        "text-gray-600",
    ));
    doc.insert_slot(component("breadcrumbs", "page_header", "Breadcrumbs"));

    doc.insert_slot(
        container("filters", None, "space-y-4")
            .with_col_span(ColSpan::Columns(3))
            .at(1, 2),
    );
    doc.insert_slot(component("layered_navigation", "filters", "LayeredNavigation"));

    let mut grid = Slot::new("product_grid", SlotKind::Grid)
        .with_class("grid gap-4")
        .with_col_span(ColSpan::PerView(
            [
                ("grid".to_owned(), ColSpan::Columns(9)),
                ("list".to_owned(), ColSpan::Columns(12)),
            ]
            .into_iter()
            .collect(),
        ))
        .at(4, 2);
    grid.styles
        .insert("gridTemplateColumns".to_owned(), "repeat(4, 1fr)".into());
    doc.insert_slot(grid);

    for n in 1..=DEFAULT_PRODUCT_CARDS {
        let card = format!("product_{n}_card");
        doc.insert_slot(container(&card, Some("product_grid"), "rounded border p-3").at(n, 1));
        doc.insert_slot(leaf(
            &format!("product_{n}_image"),
            SlotKind::Image,
            &card,
            "{{product.image}}",
            "aspect-square w-full object-cover",
        ));
        doc.insert_slot(leaf(
            &format!("product_{n}_name"),
            SlotKind::Text,
            &card,
            "{{product.name}}",
            "font-medium",
        ));
        doc.insert_slot(leaf(
            &format!("product_{n}_price"),
            SlotKind::Text,
            &card,
            "{{product.price}}",
            "text-lg",
        ));
        doc.insert_slot(leaf(
            &format!("product_{n}_add_to_cart"),
            SlotKind::Button,
            &card,
            "Add to cart",
            "btn btn-primary w-full",
        ));
    }

    doc.insert_slot(container("pagination_container", None, "mt-8").at(1, 3));
    doc.insert_slot(component("pagination", "pagination_container", "Pagination"));
}

fn product(doc: &mut SlotConfiguration) {
    doc.cms_blocks = vec![
        "product_above_price".to_owned(),
        "product_below_cart_button".to_owned(),
    ];

    doc.insert_slot(
        container("gallery_container", None, "")
            .with_col_span(ColSpan::Columns(6))
            .at(1, 1),
    );
    doc.insert_slot(component("product_gallery", "gallery_container", "ProductGallery"));

    doc.insert_slot(
        container("info_container", None, "space-y-4")
            .with_col_span(ColSpan::Columns(6))
            .at(7, 1),
    );
    doc.insert_slot(leaf(
        "product_title",
        SlotKind::Text,
        "info_container",
        "{{product.name}}",
        "text-3xl font-bold",
    ));
    doc.insert_slot(leaf(
        "product_price",
        SlotKind::Text,
        "info_container",
        "{{product.price}}",
        "text-2xl",
    ));
    doc.insert_slot(leaf(
        "product_sku",
        SlotKind::Text,
        "info_container",
        "SKU: {{product.sku}}",
        "text-sm text-gray-500",
    ));
    doc.insert_slot(leaf(
        "product_description",
        SlotKind::Html,
        "info_container",
        "{{product.description}}",
        "prose",
    ));
    doc.insert_slot(component("quantity_selector", "info_container", "QuantitySelector"));
    doc.insert_slot(leaf(
        "add_to_cart_button",
        SlotKind::Button,
        "info_container",
        "Add to cart",
        "btn btn-primary",
    ));

    doc.insert_slot(container("related_products", None, "grid grid-cols-3 gap-4").at(1, 2));
    for n in 1..=DEFAULT_RELATED_PRODUCTS {
        let card = format!("related_product_{n}_card");
        doc.insert_slot(container(&card, Some("related_products"), "border p-2").at(n, 1));
        doc.insert_slot(leaf(
            &format!("related_product_{n}_image"),
            SlotKind::Image,
            &card,
            "{{product.image}}",
            "w-full",
        ));
        doc.insert_slot(leaf(
            &format!("related_product_{n}_name"),
            SlotKind::Text,
            &card,
            "{{product.name}}",
            "text-sm",
        ));
        doc.insert_slot(leaf(
            &format!("related_product_{n}_price"),
            SlotKind::Text,
            &card,
            "{{product.price}}",
            "text-sm font-semibold",
        ));
    }
}

fn cart(doc: &mut SlotConfiguration) {
    doc.insert_slot(container("cart_header", None, "mb-4").at(1, 1));
    doc.insert_slot(leaf(
        "cart_title",
        SlotKind::Text,
        "cart_header",
        "Your cart",
        "text-2xl font-bold",
    ));

    doc.insert_slot(
        container("cart_items", None, "divide-y")
            .with_col_span(ColSpan::Columns(8))
            .at(1, 2),
    );
    for n in 1..=DEFAULT_CART_ITEMS {
        let row = format!("cart_item_{n}_row");
        doc.insert_slot(container(&row, Some("cart_items"), "flex gap-4 py-4").at(1, n));
        doc.insert_slot(leaf(
            &format!("cart_item_{n}_image"),
            SlotKind::Image,
            &row,
            "{{item.image}}",
            "h-20 w-20",
        ));
        doc.insert_slot(leaf(
            &format!("cart_item_{n}_name"),
            SlotKind::Text,
            &row,
            "{{item.name}}",
            "flex-1",
        ));
        doc.insert_slot(leaf(
            &format!("cart_item_{n}_price"),
            SlotKind::Text,
            &row,
            "{{item.price}}",
            "font-medium",
        ));
        doc.insert_slot(component(&format!("cart_item_{n}_quantity"), &row, "QuantitySelector"));
    }

    doc.insert_slot(
        container("cart_summary", None, "rounded bg-gray-50 p-4")
            .with_col_span(ColSpan::Columns(4))
            .at(9, 2),
    );
    doc.insert_slot(component("cart_totals", "cart_summary", "CartTotals"));
    doc.insert_slot(component("coupon_form", "cart_summary", "CouponForm"));
    doc.insert_slot(leaf(
        "checkout_button",
        SlotKind::Button,
        "cart_summary",
        "Proceed to checkout",
        "btn btn-primary w-full",
    ));
    doc.insert_slot(
        Slot::new("empty_cart_message", SlotKind::Text)
            .with_content("Your cart is empty")
            .with_class("text-center text-gray-500")
            .at(1, 3),
    );
}

fn checkout(doc: &mut SlotConfiguration) {
    doc.insert_slot(component("checkout_steps", "checkout_main", "CheckoutSteps"));
    doc.insert_slot(
        container("checkout_main", None, "space-y-6")
            .with_col_span(ColSpan::Columns(8))
            .at(1, 1),
    );
    doc.insert_slot(component("shipping_address_form", "checkout_main", "ShippingAddressForm"));
    doc.insert_slot(component("shipping_methods", "checkout_main", "ShippingMethods"));
    doc.insert_slot(component("payment_methods", "checkout_main", "PaymentMethods"));
    doc.insert_slot(
        container("checkout_sidebar", None, "rounded bg-gray-50 p-4")
            .with_col_span(ColSpan::Columns(4))
            .at(9, 1),
    );
    doc.insert_slot(component("order_summary", "checkout_sidebar", "OrderSummary"));
    doc.insert_slot(leaf(
        "place_order_button",
        SlotKind::Button,
        "checkout_sidebar",
        "Place order",
        "btn btn-primary w-full",
    ));
}

fn success(doc: &mut SlotConfiguration) {
    doc.insert_slot(container("success_header", None, "text-center").at(1, 1));
    doc.insert_slot(leaf(
        "success_title",
        SlotKind::Text,
        "success_header",
        "Thank you for your order!",
        "text-3xl font-bold",
    ));
    doc.insert_slot(leaf(
        "order_number",
        SlotKind::Text,
        "success_header",
        "Order #{{order.number}}",
        "text-gray-600",
    ));
    doc.insert_slot(container("success_body", None, "mt-8").at(1, 2));
    doc.insert_slot(component("order_details", "success_body", "OrderDetails"));
    doc.insert_slot(leaf(
        "continue_shopping_button",
        SlotKind::Link,
        "success_body",
        "Continue shopping",
        "btn btn-secondary",
    ));
}

fn account(doc: &mut SlotConfiguration) {
    doc.insert_slot(container("account_header", None, "mb-6").at(1, 1));
    doc.insert_slot(leaf(
        "account_welcome",
        SlotKind::Text,
        "account_header",
        "Welcome back, {{customer.first_name}}",
        "text-2xl font-bold",
    ));
    doc.insert_slot(
        container("account_sidebar", None, "")
            .with_col_span(ColSpan::Columns(3))
            .at(1, 2),
    );
    doc.insert_slot(component("account_navigation", "account_sidebar", "AccountNavigation"));
    doc.insert_slot(
        container("account_content", None, "space-y-6")
            .with_col_span(ColSpan::Columns(9))
            .at(4, 2),
    );
    doc.insert_slot(component("account_profile", "account_content", "ProfileCard"));
    doc.insert_slot(component("account_orders", "account_content", "RecentOrders"));
    doc.insert_slot(component("account_addresses", "account_content", "AddressBook"));
}

fn login(doc: &mut SlotConfiguration) {
    doc.insert_slot(
        container("login_column", None, "space-y-4")
            .with_col_span(ColSpan::Columns(6))
            .at(1, 1),
    );
    doc.insert_slot(leaf(
        "login_title",
        SlotKind::Text,
        "login_column",
        "Sign in",
        "text-2xl font-bold",
    ));
    doc.insert_slot(component("login_form", "login_column", "LoginForm"));
    doc.insert_slot(leaf(
        "forgot_password_link",
        SlotKind::Link,
        "login_column",
        "Forgot your password?",
        "text-sm underline",
    ));
    doc.insert_slot(
        container("register_column", None, "space-y-4")
            .with_col_span(ColSpan::Columns(6))
            .at(7, 1),
    );
    doc.insert_slot(leaf(
        "register_title",
        SlotKind::Text,
        "register_column",
        "Create an account",
        "text-2xl font-bold",
    ));
    doc.insert_slot(component("register_form", "register_column", "RegisterForm"));
}

fn header(doc: &mut SlotConfiguration) {
    doc.insert_slot(
        Slot::new("header_container", SlotKind::Flex)
            .with_class("flex items-center justify-between px-4 py-3")
            .at(1, 1),
    );
    doc.insert_slot(leaf(
        "header_logo",
        SlotKind::Image,
        "header_container",
        "{{store.logo}}",
        "h-8",
    ));
    doc.insert_slot(component("header_navigation", "header_container", "CategoryNavigation"));
    doc.insert_slot(component("header_search", "header_container", "SearchBar"));
    doc.insert_slot(component("header_account_menu", "header_container", "AccountMenu"));
    doc.insert_slot(component("header_cart_icon", "header_container", "MiniCart"));
}
