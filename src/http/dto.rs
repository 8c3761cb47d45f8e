//! Data Transfer Objects for the HTTP API.
//!
//! Request bodies keep every field optional so that a missing field turns
//! into a readable 400 instead of an extractor rejection. Database rows are
//! serialized as-is.

use serde::{Deserialize, Serialize};

use super::state::Paging;
use crate::exhibits::{Exhibit, SearchFilters};

/// Query string of `GET /api/exhibits`.
///
/// Numbers arrive as strings so garbage falls back to defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExhibitQuery {
    pub query: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub collection: Option<String>,
    /// Alias of `culture`
    pub country: Option<String>,
    pub culture: Option<String>,
    pub medium: Option<String>,
}

impl ExhibitQuery {
    pub fn search_text(&self) -> &str {
        self.query.as_deref().map(str::trim).unwrap_or_default()
    }

    /// 1-based page; missing, zero or non-numeric means 1.
    pub fn page(&self) -> u32 {
        parse_positive(self.page.as_deref())
            .and_then(|p| u32::try_from(p).ok())
            .unwrap_or(1)
    }

    /// Requested page size, defaulted and capped.
    pub fn page_size(&self, paging: Paging) -> usize {
        parse_positive(self.page_size.as_deref())
            .map(|size| size.min(paging.max_page_size))
            .unwrap_or(paging.default_page_size)
    }

    pub fn filters(&self) -> SearchFilters {
        SearchFilters::new(
            self.collection.clone(),
            self.culture.clone().or_else(|| self.country.clone()),
            self.medium.clone(),
        )
    }
}

fn parse_positive(value: Option<&str>) -> Option<usize> {
    value?.trim().parse::<usize>().ok().filter(|n| *n > 0)
}

/// Response of `GET /api/exhibits`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExhibitListResponse {
    pub page: u32,
    pub page_size: usize,
    pub total_results: usize,
    pub exhibits: Vec<Exhibit>,
}

/// Response of `GET /api/exhibits/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExhibitResponse {
    pub exhibit: Exhibit,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateCollectionRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveExhibitRequest {
    pub collection_id: Option<i64>,
    pub exhibit_id: Option<String>,
    pub title: Option<String>,
    pub institution: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Trimmed, non-empty value of an optional field.
pub fn required(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
