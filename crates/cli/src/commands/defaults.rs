//! Print built-in default layouts.
//!
//! # Usage
//!
//! ```bash
//! pc-cli defaults category
//! ```

use pagecraft_core::{PageType, defaults};

/// Pretty-printed default document for `page_type`.
///
/// # Errors
///
/// Returns `UnknownPageType` if `page_type` is not a known page.
pub fn render(page_type: &str) -> Result<String, Box<dyn std::error::Error>> {
    let page_type: PageType = page_type.parse()?;
    Ok(serde_json::to_string_pretty(&defaults::for_page(page_type))?)
}
