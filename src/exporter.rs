//! Conversion orchestrator: fetch, locate, walk, render.
//!
//! All-or-nothing: any stage failure aborts the whole conversion, so the
//! caller either receives a complete document artifact or an error.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use scraper::Html;
use tracing::{info, instrument};

use crate::error::ExportResult;
use crate::fetcher::PageFetcher;
use crate::locator;
use crate::renderer;
use crate::styles::StyleRegistry;
use crate::walker;

/// Documentation root exported when no URL is given.
pub const DEFAULT_DOCS_URL: &str = "https://docs.llamaindex.ai/en/stable/";

/// Fixed name the generated document is offered under.
pub const DEFAULT_OUTPUT_FILENAME: &str = "llamaindex_documentation.pdf";

/// A finished in-memory document, ready to hand to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadArtifact {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl DownloadArtifact {
    /// Encode the document as a base64 data URI.
    #[must_use]
    pub fn data_uri(&self) -> String {
        format!(
            "data:application/octet-stream;base64,{}",
            STANDARD.encode(&self.bytes)
        )
    }

    /// An HTML download anchor wrapping the data URI.
    #[must_use]
    pub fn download_link_html(&self, label: &str) -> String {
        format!(
            r#"<a href="{}" download="{}">Download {label}</a>"#,
            self.data_uri(),
            self.filename
        )
    }
}

/// Convert the documentation page at `url` into a paginated PDF artifact.
///
/// The style registry and all dedup state are created fresh for this call
/// and dropped at its end; nothing carries over between invocations.
#[instrument]
pub fn export_docs_to_pdf(url: &str) -> ExportResult<DownloadArtifact> {
    let html = PageFetcher::new().fetch(url)?;
    let document = Html::parse_document(&html);
    let content = locator::find_content_root(&document)?;

    let styles = StyleRegistry::builtin();
    let blocks = walker::walk_content(content);
    let bytes = renderer::render(&blocks, &styles)?;

    info!(
        blocks = blocks.len(),
        bytes = bytes.len(),
        "documentation page exported"
    );
    Ok(DownloadArtifact {
        filename: DEFAULT_OUTPUT_FILENAME.to_string(),
        bytes,
    })
}
