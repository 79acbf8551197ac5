//! Paginated-document renderer: block sequence + style registry in, PDF
//! bytes out.

pub mod layout;
pub mod pdf;
pub mod rich_text;

use anyhow::{Context, Result};
use tracing::debug;

use crate::blocks::Block;
use crate::styles::StyleRegistry;

/// Render the ordered block sequence into a complete PDF byte buffer.
pub fn render(blocks: &[Block], styles: &StyleRegistry) -> Result<Vec<u8>> {
    let laid = layout::lay_out(blocks, styles);
    debug!(
        blocks = blocks.len(),
        pages = laid.pages.len(),
        bookmarks = laid.bookmarks.len(),
        "laid out document"
    );
    let bytes = pdf::write_pdf(&laid).context("failed to serialize PDF object stream")?;
    Ok(bytes)
}
