use std::time::Duration;

use reqwest::blocking::Client;

use crate::constants::transport::{FETCH_TIMEOUT_SECS, USER_AGENT};
use crate::errors::FeedError;

/// Blocking HTTP client used to retrieve feed documents.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build a transport with the default timeout and user agent.
    pub fn new() -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|err| {
                FeedError::Configuration(format!("failed building HTTP client: {err}"))
            })?;
        Ok(Self::with_client(client))
    }

    /// Wrap a preconfigured client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// GET `url` and return the response body.
    ///
    /// Transport errors and non-success statuses are reported as
    /// `SourceUnavailable` for `source_id`.
    pub fn get_bytes(&self, source_id: &str, url: &str) -> Result<Vec<u8>, FeedError> {
        tracing::debug!(source_id, url, "fetching feed");
        let unavailable = |reason: String| FeedError::SourceUnavailable {
            source_id: source_id.to_string(),
            reason,
        };

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|err| unavailable(format!("request to {url} failed: {err}")))?;
        let status = response.status();
        if !status.is_success() {
            return Err(unavailable(format!("HTTP {status} when fetching {url}")));
        }
        let bytes = response
            .bytes()
            .map_err(|err| unavailable(format!("failed reading body from {url}: {err}")))?;
        Ok(bytes.to_vec())
    }
}
