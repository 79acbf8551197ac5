//! docpress: export a single HTML documentation page as a paginated PDF.
//!
//! Pipeline: fetch the page, locate the `div.md-content` container, walk it
//! into typed layout blocks, and render those blocks with a fixed style
//! registry into a PDF byte buffer offered as a download artifact.

pub mod blocks;
pub mod cleanup;
pub mod error;
pub mod exporter;
pub mod fetcher;
pub mod inline;
pub mod locator;
pub mod renderer;
pub mod styles;
pub mod walker;

pub use blocks::Block;
pub use error::{ExportError, ExportResult};
pub use exporter::{
    export_docs_to_pdf, DownloadArtifact, DEFAULT_DOCS_URL, DEFAULT_OUTPUT_FILENAME,
};
pub use fetcher::PageFetcher;
pub use locator::find_content_root;
pub use styles::{ParagraphStyle, StyleRegistry};
pub use walker::walk_content;
