//! Field normalization shared by every provider adapter.
//!
//! Adapters call into here for year parsing, era classification and
//! sentinel defaulting so both providers derive these values identically.

use super::domain::{HistoricalEra, UNKNOWN};

/// Parse the leading year of a free-text date.
///
/// Takes the segment before the first `-`, trims it and reads its leading
/// digits, so `"1650-1660"`, `"1860s"` and `"1900-01-01"` all yield a year
/// while `"c. 1650"` and `"not-a-date"` do not.
pub fn parse_year(date: Option<&str>) -> Option<i32> {
    let first = date?.split('-').next()?.trim();
    let digits_end = first
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(first.len());
    first[..digits_end].parse().ok()
}

/// Classify a free-text date into a historical era.
pub fn historical_era(date: Option<&str>) -> HistoricalEra {
    parse_year(date).map_or(HistoricalEra::Unknown, HistoricalEra::from_year)
}

/// Non-blank provider text, or `None`.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Provider text with a sentinel substituted when missing or blank.
pub fn text_or(value: Option<&str>, sentinel: &str) -> String {
    non_blank(value).unwrap_or(sentinel).to_string()
}

/// Provider text with `"Unknown"` substituted when missing or blank.
pub fn text_or_unknown(value: Option<&str>) -> String {
    text_or(value, UNKNOWN)
}

/// Collect non-blank strings, preserving provider order.
pub fn collect_non_blank<'a>(values: impl IntoIterator<Item = Option<&'a str>>) -> Vec<String> {
    values
        .into_iter()
        .filter_map(non_blank)
        .map(str::to_string)
        .collect()
}

/// Quote a value as a phrase term, escaping `"` and `\`.
///
/// Both providers use Lucene-style phrase syntax.
pub fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_era_examples() {
        assert_eq!(historical_era(Some("300-01-01")), HistoricalEra::Ancient);
        assert_eq!(historical_era(Some("1000-01-01")), HistoricalEra::Medieval);
        assert_eq!(historical_era(Some("1600-01-01")), HistoricalEra::EarlyModern);
        assert_eq!(historical_era(Some("1900-01-01")), HistoricalEra::Modern);
        assert_eq!(historical_era(Some("not-a-date")), HistoricalEra::Unknown);
    }

    #[test]
    fn test_era_missing_date() {
        assert_eq!(historical_era(None), HistoricalEra::Unknown);
        assert_eq!(historical_era(Some("")), HistoricalEra::Unknown);
        assert_eq!(historical_era(Some("Unknown")), HistoricalEra::Unknown);
    }

    #[test]
    fn test_parse_year_variants() {
        assert_eq!(parse_year(Some("1650-1660")), Some(1650));
        assert_eq!(parse_year(Some("1860s")), Some(1860));
        assert_eq!(parse_year(Some(" 1901 ")), Some(1901));
        assert_eq!(parse_year(Some("c. 1650")), None);
        assert_eq!(parse_year(Some("-200")), None);
        assert_eq!(parse_year(Some("99999999999")), None);
    }

    #[test]
    fn test_text_or_blank() {
        assert_eq!(text_or_unknown(Some("   ")), "Unknown");
        assert_eq!(text_or_unknown(None), "Unknown");
        assert_eq!(text_or_unknown(Some(" Oil on canvas ")), "Oil on canvas");
    }

    #[test]
    fn test_collect_non_blank() {
        let values = collect_non_blank([Some("Portraits"), None, Some(""), Some("Women")]);
        assert_eq!(values, vec!["Portraits", "Women"]);
    }

    proptest! {
        #[test]
        fn prop_era_matches_year_bucket(year in 0i32..3000, month in 1u32..13) {
            let date = format!("{}-{:02}-01", year, month);
            let expected = if year < 500 {
                HistoricalEra::Ancient
            } else if year < 1500 {
                HistoricalEra::Medieval
            } else if year < 1800 {
                HistoricalEra::EarlyModern
            } else {
                HistoricalEra::Modern
            };
            prop_assert_eq!(historical_era(Some(&date)), expected);
            prop_assert_eq!(parse_year(Some(&date)), Some(year));
        }

        #[test]
        fn prop_text_without_digits_is_unknown(text in "[a-zA-Z .]{0,20}") {
            prop_assert_eq!(historical_era(Some(&text)), HistoricalEra::Unknown);
        }
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote("Oil on canvas"), r#""Oil on canvas""#);
        assert_eq!(quote(r#"say "hi" \o/"#), r#""say \"hi\" \\o/""#);
        assert_eq!(quote(""), r#""""#);
    }
}
