//! Harvard Art Museums API Data Transfer Objects
//!
//! These types match what the `/object` endpoint returns.
//! DO NOT use these types outside the harvard module - convert to domain types.
//!
//! API Reference: https://github.com/harvardartmuseums/api-docs
//!
//! Nearly every field is optional or nullable in practice, so everything is
//! an `Option` and the adapter supplies sentinels.

use serde::{Deserialize, Serialize};

/// `/object` search response envelope
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SearchResponse {
    pub info: Option<Info>,
    pub records: Option<Vec<Record>>,
    /// Present instead of `records` when the API rejects the request
    pub error: Option<String>,
}

/// Paging information
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Info {
    pub totalrecordsperquery: Option<u32>,
    pub totalrecords: Option<u64>,
    pub pages: Option<u32>,
    pub page: Option<u32>,
}

/// One object record
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Record {
    /// Numeric object id
    pub id: Option<u64>,
    /// Accession number, e.g. "1943.1234"
    pub objectnumber: Option<String>,
    pub title: Option<String>,
    pub people: Option<Vec<Person>>,
    /// Free-text date, e.g. "1650-1660" or "c. 1650"
    pub dated: Option<String>,
    pub description: Option<String>,
    pub primaryimageurl: Option<String>,
    /// Object type, e.g. "Paintings"
    pub classification: Option<String>,
    pub culture: Option<String>,
    pub medium: Option<String>,
    pub period: Option<String>,
    pub subjects: Option<Vec<Subject>>,
    pub subject: Option<String>,
    pub places: Option<Vec<Place>>,
    pub place: Option<String>,
}

/// Person associated with an object
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Person {
    pub displayname: Option<String>,
    pub role: Option<String>,
}

/// Subject term
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Subject {
    pub name: Option<String>,
}

/// Place associated with an object
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Place {
    pub displayname: Option<String>,
}

// ============================================================================
// CONTRACT TESTS
// These verify our DTOs accept what the real API returns.
// ============================================================================

#[cfg(test)]
mod contract_tests {
    use super::*;

    #[test]
    fn test_parse_search_response() {
        let json = r#"{
            "info": {"totalrecordsperquery": 10, "totalrecords": 2, "pages": 1, "page": 1},
            "records": [
                {
                    "id": 208675,
                    "objectnumber": "1943.1234",
                    "title": "Self-Portrait",
                    "people": [{"displayname": "Rembrandt van Rijn", "role": "Artist"}],
                    "dated": "1650-1660",
                    "primaryimageurl": "https://nrs.harvard.edu/urn-3:HUAM:1234",
                    "classification": "Paintings",
                    "culture": "Dutch",
                    "medium": "Oil on canvas",
                    "period": null,
                    "places": [{"displayname": "Amsterdam"}]
                },
                {"id": 2}
            ]
        }"#;

        let response: SearchResponse = serde_json::from_str(json).expect("Should parse");
        let records = response.records.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, Some(208675));
        assert_eq!(records[0].people.as_ref().unwrap().len(), 1);
        assert!(records[0].period.is_none());
        assert!(records[1].title.is_none());
        assert_eq!(response.info.unwrap().totalrecords, Some(2));
    }

    #[test]
    fn test_parse_null_arrays() {
        let json = r#"{"records": [{"id": 1, "people": null, "subjects": null}]}"#;

        let response: SearchResponse = serde_json::from_str(json).expect("Should parse");

        assert!(response.records.unwrap()[0].people.is_none());
    }

    #[test]
    fn test_parse_error_envelope() {
        let json = r#"{"error": "Invalid API key"}"#;

        let response: SearchResponse = serde_json::from_str(json).expect("Should parse");

        assert!(response.records.is_none());
        assert_eq!(response.error.as_deref(), Some("Invalid API key"));
    }
}
