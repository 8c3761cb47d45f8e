//! Internal domain models for museum exhibits.
//!
//! These types are OUR types - they don't change when a museum API changes.
//! Every provider response gets converted into an [`Exhibit`] by that
//! provider's adapter.

use serde::{Deserialize, Serialize};

/// Sentinel for text fields the provider left empty.
pub const UNKNOWN: &str = "Unknown";
/// Sentinel title.
pub const UNTITLED: &str = "Untitled";
/// Sentinel description.
pub const NO_DESCRIPTION: &str = "No description available";

/// Museum an exhibit originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Institution {
    #[serde(rename = "Harvard Art Museums")]
    Harvard,
    #[serde(rename = "Smithsonian")]
    Smithsonian,
}

impl Institution {
    /// Every institution the gateway knows about.
    pub const ALL: [Institution; 2] = [Institution::Harvard, Institution::Smithsonian];

    /// Short prefix used in composite ids and cache keys.
    pub fn tag(self) -> &'static str {
        match self {
            Institution::Harvard => "harvard",
            Institution::Smithsonian => "smithsonian",
        }
    }

    /// Name shown to clients.
    pub fn display_name(self) -> &'static str {
        match self {
            Institution::Harvard => "Harvard Art Museums",
            Institution::Smithsonian => "Smithsonian",
        }
    }

    /// Look up an institution by its id prefix. Matching is exact.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|i| i.tag() == tag)
    }

    /// Build the composite id for a provider-native id.
    pub fn composite_id(self, native_id: &str) -> String {
        format!("{}-{}", self.tag(), native_id)
    }
}

impl std::fmt::Display for Institution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Coarse period classification derived from the year an object was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HistoricalEra {
    Ancient,
    Medieval,
    #[serde(rename = "Early Modern")]
    EarlyModern,
    Modern,
    Unknown,
}

impl HistoricalEra {
    /// Bucket a year: <500 Ancient, <1500 Medieval, <1800 Early Modern, else Modern.
    pub fn from_year(year: i32) -> Self {
        if year < 500 {
            HistoricalEra::Ancient
        } else if year < 1500 {
            HistoricalEra::Medieval
        } else if year < 1800 {
            HistoricalEra::EarlyModern
        } else {
            HistoricalEra::Modern
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HistoricalEra::Ancient => "Ancient",
            HistoricalEra::Medieval => "Medieval",
            HistoricalEra::EarlyModern => "Early Modern",
            HistoricalEra::Modern => "Modern",
            HistoricalEra::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for HistoricalEra {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical artwork record served to clients.
///
/// Every field carries a sentinel instead of being absent (except
/// `year_created`, which is `null` when the date has no leading year).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exhibit {
    /// `<institution-tag>-<nativeId>`
    pub id: String,
    pub title: String,
    pub creator: String,
    /// Free text exactly as the provider gave it
    pub date: String,
    pub year_created: Option<i32>,
    pub description: String,
    /// Empty when the provider has no image
    pub image_url: String,
    pub institution: Institution,
    pub collection: String,
    pub country_of_origin: String,
    pub medium: String,
    pub style_or_period: String,
    pub subject_matter: Vec<String>,
    pub location_created: String,
    pub historical_era: HistoricalEra,
}

impl Exhibit {
    /// Whether the exhibit has something a client can display.
    pub fn has_image(&self) -> bool {
        !self.image_url.trim().is_empty()
    }
}

/// Optional narrowing applied to a search.
///
/// Blank values are treated as absent so `?medium=` never constrains a query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilters {
    pub collection: Option<String>,
    pub culture: Option<String>,
    pub medium: Option<String>,
}

impl SearchFilters {
    pub fn new(
        collection: Option<String>,
        culture: Option<String>,
        medium: Option<String>,
    ) -> Self {
        Self {
            collection: clean(collection),
            culture: clean(culture),
            medium: clean(medium),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs().is_empty()
    }

    /// Present filters as `(name, value)` pairs, sorted by name.
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs: Vec<(&'static str, &str)> = [
            ("collection", self.collection.as_deref()),
            ("culture", self.culture.as_deref()),
            ("medium", self.medium.as_deref()),
        ]
        .into_iter()
        .filter_map(|(name, value)| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| (name, v))
        })
        .collect();
        pairs.sort_by_key(|(name, _)| *name);
        pairs
    }
}

fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Errors from a single provider call
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {reason}")]
    Http { status: u16, reason: String },

    #[error("Rate limited - try again later")]
    RateLimited,

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("No matching record")]
    NotFound,
}
