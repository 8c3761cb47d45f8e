//! Adapter layer: Convert Harvard DTOs to domain models
//!
//! This is the ONLY place where Harvard DTO types are converted to domain
//! types. If Harvard changes their response format, only this file and
//! dto.rs need to change.

use super::dto;
use crate::exhibits::domain::{Exhibit, Institution, NO_DESCRIPTION, UNKNOWN, UNTITLED};
use crate::exhibits::normalize::{
    collect_non_blank, historical_era, non_blank, parse_year, text_or, text_or_unknown,
};

/// Convert a search response into exhibits, in provider order.
pub fn to_exhibits(response: dto::SearchResponse) -> Vec<Exhibit> {
    response
        .records
        .unwrap_or_default()
        .iter()
        .map(to_exhibit)
        .collect()
}

/// Convert one object record into an exhibit.
pub fn to_exhibit(record: &dto::Record) -> Exhibit {
    let date = non_blank(record.dated.as_deref());

    Exhibit {
        id: Institution::Harvard.composite_id(&native_id(record)),
        title: text_or(record.title.as_deref(), UNTITLED),
        creator: build_creator(record.people.as_deref().unwrap_or_default()),
        date: text_or_unknown(date),
        year_created: parse_year(date),
        description: text_or(record.description.as_deref(), NO_DESCRIPTION),
        image_url: non_blank(record.primaryimageurl.as_deref())
            .unwrap_or_default()
            .to_string(),
        institution: Institution::Harvard,
        collection: text_or_unknown(record.classification.as_deref()),
        country_of_origin: text_or_unknown(record.culture.as_deref()),
        medium: text_or_unknown(record.medium.as_deref()),
        style_or_period: text_or_unknown(record.period.as_deref()),
        subject_matter: extract_subjects(record),
        location_created: extract_location(record),
        historical_era: historical_era(date),
    }
}

/// Native id: the numeric object id, else the accession number.
fn native_id(record: &dto::Record) -> String {
    record
        .id
        .map(|id| id.to_string())
        .or_else(|| non_blank(record.objectnumber.as_deref()).map(str::to_string))
        .unwrap_or_else(|| "unknown".to_string())
}

/// Join every named person, e.g. "Rembrandt van Rijn, Workshop of Rembrandt"
fn build_creator(people: &[dto::Person]) -> String {
    let names = collect_non_blank(people.iter().map(|p| p.displayname.as_deref()));
    if names.is_empty() {
        UNKNOWN.to_string()
    } else {
        names.join(", ")
    }
}

fn extract_subjects(record: &dto::Record) -> Vec<String> {
    match record.subjects.as_deref() {
        Some(subjects) if !subjects.is_empty() => {
            collect_non_blank(subjects.iter().map(|s| s.name.as_deref()))
        }
        _ => collect_non_blank([record.subject.as_deref()]),
    }
}

fn extract_location(record: &dto::Record) -> String {
    let from_places = record
        .places
        .as_deref()
        .unwrap_or_default()
        .iter()
        .find_map(|p| non_blank(p.displayname.as_deref()));

    text_or_unknown(from_places.or(record.place.as_deref()))
}
