//! Page fetching for catalog links.
//!
//! [`PageFetcher`] is the seam between the price tracker and the network;
//! [`HttpPageFetcher`] is the production implementation backed by `reqwest`.

use std::time::Duration;

use async_trait::async_trait;

/// HTTP request timeout for a single page fetch.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

const USER_AGENT: &str = concat!("switchdeck-price-tracker/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Why a page could not be fetched. The `Display` text is stored on the
/// failed parse result.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The shop answered with anything other than 200 OK.
    #[error("Shop returned HTTP {0}")]
    HttpStatus(u16),
}

// ---------------------------------------------------------------------------
// PageFetcher
// ---------------------------------------------------------------------------

#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the body of `url` as text.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Fetches shop pages over HTTP.
pub struct HttpPageFetcher {
    client: reqwest::Client,
}

impl HttpPageFetcher {
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;

        check_status(response.status())?;
        Ok(response.text().await?)
    }
}

/// Only a plain 200 carries a price page.
fn check_status(status: reqwest::StatusCode) -> Result<(), FetchError> {
    if status != reqwest::StatusCode::OK {
        return Err(FetchError::HttpStatus(status.as_u16()));
    }
    Ok(())
}
