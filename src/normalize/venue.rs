use once_cell::sync::Lazy;
use regex::Regex;

use super::rules::{classify_venue, VENUE_SENTINELS};
use super::{collapse_whitespace, FieldNormalizer};
use crate::constants::{UNKNOWN, VENUE};

static NOT_LETTER_OR_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Z;, ]").unwrap());
static TRAILING_SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[;,]+$").unwrap());
static BRACKETS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\[\](){}]").unwrap());

/// Reduce a venue to letters and separators, then map known abbreviations
/// to their category.
///
/// The category scan is a plain prefix test in table order: the first
/// matching prefix wins even when a later one describes the value better.
/// A value that matches no prefix is returned as cleaned, possibly empty.
pub fn clean_venue(value: Option<&str>) -> String {
    let raw = match value {
        Some(v) if !VENUE_SENTINELS.contains(&v.trim()) => v,
        _ => return UNKNOWN.to_string(),
    };

    let value = raw.to_uppercase();
    let value = NOT_LETTER_OR_SEPARATOR.replace_all(value.trim(), "");
    let value = collapse_whitespace(&value);
    let value = TRAILING_SEPARATORS.replace(&value, "");
    let value = BRACKETS.replace_all(&value, "");
    let value = value.trim_matches(|c: char| matches!(c, ' ' | ',' | ';' | '.'));

    match classify_venue(value) {
        Some(category) => category.to_string(),
        None => value.to_string(),
    }
}

pub struct VenueNormalizer;

impl FieldNormalizer for VenueNormalizer {
    fn column(&self) -> &str {
        VENUE
    }

    fn clean(&self, value: Option<&str>) -> String {
        clean_venue(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels_are_unknown() {
        for raw in ["", "?", "[?]", "[POL?);", "  [?] "] {
            assert_eq!(clean_venue(Some(raw)), "UNKNOWN", "{:?}", raw);
        }
        assert_eq!(clean_venue(None), "UNKNOWN");
    }

    #[test]
    fn test_abbreviations_map_to_categories() {
        assert_eq!(clean_venue(Some("COMMERCIAL")), "COMMERCIAL");
        assert_eq!(clean_venue(Some("com;")), "COMMERCIAL");
        assert_eq!(clean_venue(Some("GOV'T")), "GOVERNMENT");
        assert_eq!(clean_venue(Some("GOV'T;")), "GOVERNMENT");
        assert_eq!(clean_venue(Some("SOC;")), "SOCIAL");
        assert_eq!(clean_venue(Some("POL?")), "POLITICAL");
        assert_eq!(clean_venue(Some("RELIG;")), "RELIGIOUS");
        assert_eq!(clean_venue(Some("NAV.")), "NAVAL");
        assert_eq!(clean_venue(Some("MIL.")), "MILITARY");
        assert_eq!(clean_venue(Some("EDUC;")), "EDUCATIONAL");
        assert_eq!(clean_venue(Some("PROF.")), "PROFESSIONAL");
        assert_eq!(clean_venue(Some("PATRIOTIC?")), "PATRIOTIC");
        assert_eq!(clean_venue(Some("PRIVATE PARTY")), "PRIVATE");
        assert_eq!(clean_venue(Some("Private; Dinner")), "PRIVATE");
    }

    #[test]
    fn test_first_matching_prefix_wins() {
        // `PAT` is declared before `PATR`
        assert_eq!(clean_venue(Some("PATR.")), "PATRIOTIC");
        // `COM` catches anything starting with those letters
        assert_eq!(clean_venue(Some("Community Hall")), "COMMERCIAL");
        assert_eq!(clean_venue(Some("POLICE")), "POLITICAL");
    }

    #[test]
    fn test_unmatched_venue_is_returned_cleaned() {
        assert_eq!(clean_venue(Some("  Hotel   (1st floor); ")), "HOTEL ST FLOOR");
        assert_eq!(clean_venue(Some("Steamship, ")), "STEAMSHIP");
        assert_eq!(clean_venue(Some("1900")), "");
    }

    #[test]
    fn test_clean_venue_is_idempotent() {
        for input in ["GOV'T", "soc;", "Hotel Dining Room;", "PATR.", "Other"] {
            let once = clean_venue(Some(input));
            assert_eq!(clean_venue(Some(&once)), once, "{:?}", input);
        }
    }
}
