//! Harvard Art Museums HTTP client
//!
//! Handles communication with the Harvard Art Museums API.
//! See: https://github.com/harvardartmuseums/api-docs
//!
//! The API key travels as the `apikey` query parameter and pagination is
//! `page` + `size` (1-based pages).

use std::sync::Arc;

use super::{adapter, dto, query};
use crate::exhibits::domain::{Exhibit, SearchFilters, SourceError};
use crate::exhibits::transport::Transport;

/// Production API root
pub const DEFAULT_BASE_URL: &str = "https://api.harvardartmuseums.org";

/// Harvard Art Museums API client
pub struct HarvardClient {
    transport: Arc<dyn Transport>,
    api_key: String,
    base_url: String,
}

impl HarvardClient {
    /// Create a new client against the production API
    pub fn new(transport: Arc<dyn Transport>, api_key: impl Into<String>) -> Self {
        Self::with_base_url(transport, api_key, DEFAULT_BASE_URL)
    }

    /// Create a client against a custom API root
    pub fn with_base_url(
        transport: Arc<dyn Transport>,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Search one page and normalize every record
    pub async fn search_page(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
        filters: &SearchFilters,
    ) -> Result<Vec<Exhibit>, SourceError> {
        let params = query::search_params(&self.api_key, query, page, page_size, filters);
        let response = self.send_object_request(&params).await?;
        Ok(adapter::to_exhibits(response))
    }

    /// Look up a single object by numeric id or accession number
    pub async fn lookup(&self, native_id: &str) -> Result<Exhibit, SourceError> {
        let params = query::lookup_params(&self.api_key, native_id);
        let response = self.send_object_request(&params).await?;

        response
            .records
            .unwrap_or_default()
            .first()
            .map(adapter::to_exhibit)
            .ok_or(SourceError::NotFound)
    }

    /// Send the request and parse the envelope
    async fn send_object_request(
        &self,
        params: &[(&str, String)],
    ) -> Result<dto::SearchResponse, SourceError> {
        let url = format!("{}/object", self.base_url);
        let body = self.transport.get(&url, params).await?;

        let response: dto::SearchResponse =
            serde_json::from_str(&body).map_err(|e| SourceError::Parse(e.to_string()))?;

        if let Some(error) = response.error {
            return Err(SourceError::Parse(format!("API error: {}", error)));
        }

        Ok(response)
    }
}
