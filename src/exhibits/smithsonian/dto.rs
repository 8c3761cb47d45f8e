//! Smithsonian Open Access API Data Transfer Objects
//!
//! These types match what the `/search` and `/content/{id}` endpoints return.
//! DO NOT use these types outside the smithsonian module - convert to domain types.
//!
//! API Reference: https://edan.si.edu/openaccess/apidocs/
//!
//! Rows are deeply nested and sparsely populated; every level is optional.

use serde::{Deserialize, Serialize};

/// `/search` response envelope
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub status: Option<u16>,
    pub response_code: Option<i32>,
    pub response: Option<SearchBody>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchBody {
    pub rows: Option<Vec<Row>>,
    pub row_count: Option<u64>,
}

/// `/content/{id}` response envelope
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentResponse {
    pub status: Option<u16>,
    pub response_code: Option<i32>,
    pub response: Option<Row>,
}

/// One catalogue record
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    /// e.g. "edanmdm-nmaahc_2012.36.4ab" (hyphens are common)
    pub id: Option<String>,
    pub title: Option<String>,
    pub unit_code: Option<String>,
    pub content: Option<Content>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    pub descriptive_non_repeating: Option<DescriptiveNonRepeating>,
    pub freetext: Option<Freetext>,
    pub indexed_structured: Option<IndexedStructured>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DescriptiveNonRepeating {
    pub online_media: Option<OnlineMedia>,
    /// Older records keep their notes here
    pub notes: Option<Vec<Note>>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnlineMedia {
    pub media_count: Option<u32>,
    pub media: Option<Vec<Media>>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Media {
    /// Full-size image URL
    pub content: Option<String>,
    pub thumbnail: Option<String>,
    #[serde(rename = "type")]
    pub media_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Note {
    pub text: Option<String>,
}

/// Human-readable fields, each a list of labelled values
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Freetext {
    pub name: Option<Vec<Labelled>>,
    pub date: Option<Vec<Labelled>>,
    pub notes: Option<Vec<Labelled>>,
    pub physical_description: Option<Vec<Labelled>>,
    pub topic: Option<Vec<Labelled>>,
    pub place: Option<Vec<Labelled>>,
    pub style: Option<Vec<Labelled>>,
}

/// `{"label": "Medium", "content": "oil on canvas"}`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Labelled {
    pub label: Option<String>,
    pub content: Option<String>,
}

/// Faceted fields used for filtering
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexedStructured {
    pub object_type: Option<Vec<String>>,
    pub culture: Option<Vec<String>>,
    pub geo_location: Option<Vec<GeoLocation>>,
    pub date: Option<Vec<String>>,
}

/// Hierarchical place: L1 continent, L2 country, L3 region, ...
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GeoLocation {
    #[serde(rename = "L1")]
    pub l1: Option<GeoLevel>,
    #[serde(rename = "L2")]
    pub l2: Option<GeoLevel>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GeoLevel {
    #[serde(rename = "type")]
    pub level_type: Option<String>,
    pub content: Option<String>,
}

// ============================================================================
// CONTRACT TESTS
// ============================================================================
