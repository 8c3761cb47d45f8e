//! Adapter layer: Convert Smithsonian DTOs to domain models
//!
//! This is the ONLY place where Smithsonian DTO types are converted to
//! domain types.

use super::dto;
use crate::exhibits::domain::{Exhibit, Institution, NO_DESCRIPTION, UNTITLED};
use crate::exhibits::normalize::{
    collect_non_blank, historical_era, non_blank, parse_year, text_or, text_or_unknown,
};

/// Convert a search response into exhibits, in provider order.
pub fn to_exhibits(response: dto::SearchResponse) -> Vec<Exhibit> {
    response
        .response
        .and_then(|body| body.rows)
        .unwrap_or_default()
        .iter()
        .map(to_exhibit)
        .collect()
}

/// Convert one row into an exhibit.
pub fn to_exhibit(row: &dto::Row) -> Exhibit {
    let content = row.content.as_ref();
    let freetext = content.and_then(|c| c.freetext.as_ref());
    let indexed = content.and_then(|c| c.indexed_structured.as_ref());
    let descriptive = content.and_then(|c| c.descriptive_non_repeating.as_ref());

    let date = first_content(freetext.and_then(|f| f.date.as_deref()));
    let native_id = non_blank(row.id.as_deref()).unwrap_or("unknown");

    Exhibit {
        id: Institution::Smithsonian.composite_id(native_id),
        title: text_or(row.title.as_deref(), UNTITLED),
        creator: text_or_unknown(first_content(freetext.and_then(|f| f.name.as_deref()))),
        date: text_or_unknown(date),
        year_created: parse_year(date),
        description: text_or(extract_description(freetext, descriptive), NO_DESCRIPTION),
        image_url: extract_image(descriptive).unwrap_or_default().to_string(),
        institution: Institution::Smithsonian,
        collection: text_or_unknown(first_str(indexed.and_then(|i| i.object_type.as_deref()))),
        country_of_origin: text_or_unknown(extract_country(indexed)),
        medium: text_or_unknown(extract_medium(freetext)),
        style_or_period: text_or_unknown(
            first_content(freetext.and_then(|f| f.style.as_deref()))
                .or_else(|| first_str(indexed.and_then(|i| i.date.as_deref()))),
        ),
        subject_matter: collect_non_blank(
            freetext
                .and_then(|f| f.topic.as_deref())
                .unwrap_or_default()
                .iter()
                .map(|t| t.content.as_deref()),
        ),
        location_created: text_or_unknown(first_content(freetext.and_then(|f| f.place.as_deref()))),
        historical_era: historical_era(date),
    }
}

/// First non-blank `content` of a labelled list
fn first_content(values: Option<&[dto::Labelled]>) -> Option<&str> {
    values?.iter().find_map(|v| non_blank(v.content.as_deref()))
}

fn first_str(values: Option<&[String]>) -> Option<&str> {
    values?.iter().find_map(|v| non_blank(Some(v.as_str())))
}

fn extract_description<'a>(
    freetext: Option<&'a dto::Freetext>,
    descriptive: Option<&'a dto::DescriptiveNonRepeating>,
) -> Option<&'a str> {
    first_content(freetext.and_then(|f| f.notes.as_deref())).or_else(|| {
        descriptive?
            .notes
            .as_deref()?
            .iter()
            .find_map(|n| non_blank(n.text.as_deref()))
    })
}

fn extract_image(descriptive: Option<&dto::DescriptiveNonRepeating>) -> Option<&str> {
    descriptive?
        .online_media
        .as_ref()?
        .media
        .as_deref()?
        .iter()
        .find_map(|m| non_blank(m.content.as_deref()))
}

/// Culture if recorded, otherwise the country (or continent) of the first place
fn extract_country(indexed: Option<&dto::IndexedStructured>) -> Option<&str> {
    let indexed = indexed?;
    first_str(indexed.culture.as_deref()).or_else(|| {
        indexed.geo_location.as_deref()?.iter().find_map(|g| {
            g.l2
                .as_ref()
                .and_then(|l| non_blank(l.content.as_deref()))
                .or_else(|| g.l1.as_ref().and_then(|l| non_blank(l.content.as_deref())))
        })
    })
}

/// Prefer the physical description labelled "Medium"
fn extract_medium(freetext: Option<&dto::Freetext>) -> Option<&str> {
    let descriptions = freetext?.physical_description.as_deref()?;
    descriptions
        .iter()
        .find(|d| {
            d.label
                .as_deref()
                .is_some_and(|l| l.trim().eq_ignore_ascii_case("medium"))
        })
        .and_then(|d| non_blank(d.content.as_deref()))
        .or_else(|| first_content(Some(descriptions)))
}
