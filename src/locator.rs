//! Main-content location.
//!
//! Documentation pages mark their body with a fixed structural container,
//! `div.md-content`. Policy: take the first match; never guess among
//! multiple candidates.

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use tracing::{debug, warn};

use crate::error::{ExportError, ExportResult};

static CONTENT_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("div.md-content")
        .expect("BUG: hardcoded CSS selector 'div.md-content' is invalid")
});

/// Find the single content container in a parsed document.
pub fn find_content_root(document: &Html) -> ExportResult<ElementRef<'_>> {
    match document.select(&CONTENT_SELECTOR).next() {
        Some(element) => {
            debug!("located main content container");
            Ok(element)
        }
        None => {
            warn!("no 'div.md-content' container in fetched page");
            Err(ExportError::ContentNotFound)
        }
    }
}
