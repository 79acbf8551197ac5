//! Error types for the export pipeline.
//!
//! Every failure surfaces to the caller as one of three terminal categories;
//! there is no partial output and no automatic retry.

use thiserror::Error;

/// Result type alias for export operations
pub type ExportResult<T> = Result<T, ExportError>;

/// Error types for the export pipeline
#[derive(Debug, Error)]
pub enum ExportError {
    /// Page retrieval failed: transport error, timeout, or non-success status
    #[error("failed to retrieve {url}: {reason}")]
    Fetch {
        url: String,
        reason: String,
        timed_out: bool,
    },

    /// The designated main-content container is absent from the parsed page
    #[error("main content region 'div.md-content' not found in page")]
    ContentNotFound,

    /// Any other failure during block generation or rendering
    #[error("document conversion failed: {0}")]
    Conversion(String),
}

impl From<anyhow::Error> for ExportError {
    fn from(error: anyhow::Error) -> Self {
        ExportError::Conversion(error.to_string())
    }
}

impl ExportError {
    /// Build a fetch error from a reqwest failure, preserving the timeout cause.
    pub fn fetch(url: &str, error: &reqwest::Error) -> Self {
        ExportError::Fetch {
            url: url.to_string(),
            reason: error.to_string(),
            timed_out: error.is_timeout(),
        }
    }

    /// Whether this failure was a fetch timeout
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, ExportError::Fetch { timed_out: true, .. })
    }

    /// The single user-facing message category all failures collapse into
    #[must_use]
    pub fn user_message(&self) -> String {
        format!("An error occurred while generating the PDF: {self}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_wraps_every_variant() {
        let err = ExportError::ContentNotFound;
        assert!(
            err.user_message()
                .starts_with("An error occurred while generating the PDF:")
        );

        let err = ExportError::Conversion("boom".into());
        assert!(err.user_message().contains("boom"));
    }

    #[test]
    fn timeout_flag_is_reported() {
        let err = ExportError::Fetch {
            url: "http://example.invalid".into(),
            reason: "operation timed out".into(),
            timed_out: true,
        };
        assert!(err.is_timeout());
        assert!(!ExportError::ContentNotFound.is_timeout());
    }
}
