//! HTTP access to the software catalog and distribution documents.

use crate::utils::config::Settings;
use crate::utils::error::FetchError;
use log::{debug, info};
use reqwest::blocking::Client;

/// Downloads a document by URL.
///
/// Implemented by [`HttpFetcher`]; tests provide in-memory fakes.
pub trait Fetch {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Blocking HTTP client for Apple's software update servers
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a new fetcher honouring the configured timeout
    pub fn new(settings: &Settings) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(settings.http_timeout)
            .user_agent(concat!("campies/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FetchError::RequestFailed)?;

        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        info!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .map_err(FetchError::RequestFailed)?;

        // Check HTTP status
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().map_err(FetchError::RequestFailed)?;
        debug!("Fetched {} bytes from {}", body.len(), url);

        Ok(body.to_vec())
    }
}
