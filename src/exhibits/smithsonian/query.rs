//! Query building for the Smithsonian `/search` endpoint.
//!
//! The Smithsonian API has no dedicated filter parameters; filters become
//! field-scoped terms ANDed onto `q`. Filter values are user input, so they
//! are always quoted with `"` and `\` escaped.

use crate::exhibits::domain::SearchFilters;
use crate::exhibits::normalize::quote;

/// Build the `q` expression for a search.
pub fn build_q(query: &str, filters: &SearchFilters) -> String {
    let query = query.trim();
    let mut q = if query.is_empty() {
        "*".to_string()
    } else {
        query.to_string()
    };

    for (name, value) in filters.pairs() {
        let field = match name {
            "collection" => "object_type",
            "culture" => "place",
            "medium" => "material",
            _ => continue,
        };
        q.push_str(&format!(" AND {}:{}", field, quote(value)));
    }

    q
}

/// Parameters for one search page. Pagination is offset based.
pub fn search_params(
    api_key: &str,
    query: &str,
    page: u32,
    page_size: u32,
    filters: &SearchFilters,
) -> Vec<(&'static str, String)> {
    let start = u64::from(page.max(1) - 1) * u64::from(page_size);

    vec![
        ("api_key", api_key.to_string()),
        ("q", build_q(query, filters)),
        ("start", start.to_string()),
        ("rows", page_size.to_string()),
    ]
}
