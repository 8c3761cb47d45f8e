//! Outbound HTTP transport shared by the provider clients.
//!
//! Provider clients build URLs and query parameters; the transport sends the
//! GET and maps HTTP status codes into [`SourceError`]. Tests substitute
//! [`mocks::MockTransport`] to serve canned payloads and count calls.

use std::time::Duration;

use async_trait::async_trait;

use super::domain::SourceError;

/// User agent sent to every provider
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// A GET-only JSON transport.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a GET request and return the response body on 2xx.
    ///
    /// 404 maps to [`SourceError::NotFound`], 429 to
    /// [`SourceError::RateLimited`], other non-2xx to [`SourceError::Http`].
    async fn get(&self, url: &str, params: &[(&str, String)]) -> Result<String, SourceError>;
}

/// Transport backed by a shared `reqwest::Client`.
pub struct ReqwestTransport {
    http_client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with gzip enabled and the given request timeout.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .gzip(true)
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self { http_client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str, params: &[(&str, String)]) -> Result<String, SourceError> {
        let response = self
            .http_client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(SourceError::RateLimited);
        }

        if !status.is_success() {
            return Err(SourceError::Http {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))
    }
}
