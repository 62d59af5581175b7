//! Core types for Pagecraft.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod page_type;
pub mod price;
pub mod store;
pub mod translations;

pub use id::*;
pub use page_type::{PageType, UnknownPageType};
pub use price::{CurrencyCode, Price};
pub use store::{CachePolicy, SalesAutomation, SeoDefaults, Store, StoreSettings};
pub use translations::{FALLBACK_LANGUAGE, TranslationMap};
