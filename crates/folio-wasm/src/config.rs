//! Page configuration embedded in the document.

use folio_core::config::CONFIG_ELEMENT_ID;
use folio_core::{PageConfig, Result};
use web_sys::Document;

/// Read `<script type="application/json" id="folio-config">`.
///
/// A page without the block gets the defaults.
pub(crate) fn load(document: &Document) -> Result<PageConfig> {
    let Some(block) = document.get_element_by_id(CONFIG_ELEMENT_ID) else {
        return Ok(PageConfig::default());
    };
    let text = block.text_content().unwrap_or_default();
    if text.trim().is_empty() {
        return Ok(PageConfig::default());
    }
    PageConfig::from_json(&text)
}
