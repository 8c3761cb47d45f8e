//! Query parameter building for the Harvard `/object` endpoint.
//!
//! Filters map onto Harvard's own parameters (`classification`, `culture`,
//! `medium`), so filter values are sent as plain parameter values and only
//! the lookup query needs quoting.

use crate::exhibits::domain::SearchFilters;
use crate::exhibits::normalize::quote;

/// Parameters for one search page.
pub fn search_params(
    api_key: &str,
    query: &str,
    page: u32,
    page_size: u32,
    filters: &SearchFilters,
) -> Vec<(&'static str, String)> {
    let query = query.trim();
    let mut params = vec![
        ("apikey", api_key.to_string()),
        ("q", if query.is_empty() { "*".to_string() } else { query.to_string() }),
        ("size", page_size.to_string()),
        ("page", page.max(1).to_string()),
    ];

    for (name, value) in filters.pairs() {
        let param = match name {
            "collection" => "classification",
            "culture" => "culture",
            "medium" => "medium",
            _ => continue,
        };
        params.push((param, value.to_string()));
    }

    params
}

/// Parameters for a single-record lookup.
///
/// Numeric ids are matched on `id`; anything else is treated as an
/// accession number and matched as a quoted phrase.
pub fn lookup_params(api_key: &str, native_id: &str) -> Vec<(&'static str, String)> {
    let native_id = native_id.trim();
    let q = if !native_id.is_empty() && native_id.bytes().all(|b| b.is_ascii_digit()) {
        format!("id:{}", native_id)
    } else {
        format!("objectnumber:{}", quote(native_id))
    };

    vec![
        ("apikey", api_key.to_string()),
        ("q", q),
        ("size", "1".to_string()),
    ]
}
