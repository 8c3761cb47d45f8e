//! Smithsonian Open Access HTTP client
//!
//! Handles communication with the Smithsonian Open Access API.
//! See: https://edan.si.edu/openaccess/apidocs/
//!
//! The API key travels as the `api_key` query parameter and pagination is
//! `start` (row offset) + `rows`.

use std::sync::Arc;

use super::{adapter, dto, query};
use crate::exhibits::domain::{Exhibit, SearchFilters, SourceError};
use crate::exhibits::transport::Transport;

/// Production API root
pub const DEFAULT_BASE_URL: &str = "https://api.si.edu/openaccess/api/v1.0";

/// Smithsonian Open Access API client
pub struct SmithsonianClient {
    transport: Arc<dyn Transport>,
    api_key: String,
    base_url: String,
}

impl SmithsonianClient {
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

    /// Search one page and normalize every row
    pub async fn search_page(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
        filters: &SearchFilters,
    ) -> Result<Vec<Exhibit>, SourceError> {
        let url = format!("{}/search", self.base_url);
        let params = query::search_params(&self.api_key, query, page, page_size, filters);

        let body = self.transport.get(&url, &params).await?;
        let response: dto::SearchResponse =
            serde_json::from_str(&body).map_err(|e| SourceError::Parse(e.to_string()))?;

        Ok(adapter::to_exhibits(response))
    }

    /// Look up a single record by its Smithsonian id
    pub async fn lookup(&self, native_id: &str) -> Result<Exhibit, SourceError> {
        let native_id = native_id.trim();
        if native_id.is_empty() {
            return Err(SourceError::NotFound);
        }

        let url = format!("{}/content/{}", self.base_url, urlencoding::encode(native_id));
        let params = [("api_key", self.api_key.clone())];

        let body = self.transport.get(&url, &params).await?;
        let response: dto::ContentResponse =
            serde_json::from_str(&body).map_err(|e| SourceError::Parse(e.to_string()))?;

        match response.response {
            Some(row) if row.id.is_some() || row.title.is_some() => Ok(adapter::to_exhibit(&row)),
            _ => Err(SourceError::NotFound),
        }
    }
}
