//! Page retrieval.
//!
//! One blocking GET per conversion, bounded by a fixed timeout. Transport
//! errors, timeouts, and non-success statuses all surface as the fetch
//! failure category; nothing is retried.

use reqwest::blocking::Client;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use crate::error::{ExportError, ExportResult};

/// Bounded wait for the whole request, connect included.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("docpress/", env!("CARGO_PKG_VERSION"));

/// Blocking HTTP fetcher for documentation pages.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
}

impl Default for PageFetcher {
    fn default() -> Self {
        let client = Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .expect("BUG: HTTP client construction with static configuration failed");
        Self { client }
    }
}

impl PageFetcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the raw markup text behind `url`.
    #[instrument(skip(self))]
    pub fn fetch(&self, url: &str) -> ExportResult<String> {
        let target = Url::parse(url).map_err(|err| ExportError::Fetch {
            url: url.to_string(),
            reason: format!("invalid URL: {err}"),
            timed_out: false,
        })?;

        let response = self
            .client
            .get(target)
            .send()
            .map_err(|err| ExportError::fetch(url, &err))?
            .error_for_status()
            .map_err(|err| ExportError::fetch(url, &err))?;

        let body = response
            .text()
            .map_err(|err| ExportError::fetch(url, &err))?;
        debug!(bytes = body.len(), "fetched documentation page");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_urls_before_any_network_io() {
        let fetcher = PageFetcher::new();
        let err = fetcher.fetch("not a url").expect_err("should fail");
        match err {
            ExportError::Fetch { reason, timed_out, .. } => {
                assert!(reason.contains("invalid URL"));
                assert!(!timed_out);
            }
            other => panic!("expected fetch error, got {other:?}"),
        }
    }
}
