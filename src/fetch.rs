use reqwest::blocking::Client;
use reqwest::StatusCode;
use thiserror::Error;

use crate::text;

/// Why one link produced no page block. Recorded per link and reported at the
/// end of the run; never fatal to the batch.
#[derive(Debug, Error)]
pub enum FetchFailure {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(StatusCode),
}

/// One successfully fetched and converted link. Lives only until its text is
/// written out.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub url: String,
    pub text: String,
}

/// Seam between the pipeline and the network, so tests can drive the batch
/// with canned pages.
pub trait PageSource {
    fn fetch(&self, url: &str) -> Result<FetchedPage, FetchFailure>;
}

/// Blocking HTTP fetcher. One GET per link, no retries, client-default
/// timeouts; callers sequence requests themselves.
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new() -> Self {
        PageFetcher {
            client: Client::new(),
        }
    }
}

impl Default for PageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl PageSource for PageFetcher {
    fn fetch(&self, url: &str) -> Result<FetchedPage, FetchFailure> {
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchFailure::Status(status));
        }
        let body = response.text()?;
        Ok(FetchedPage {
            url: url.to_string(),
            text: text::visible_text(&body),
        })
    }
}
