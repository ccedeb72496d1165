//! Per-field normalizers for the menu dataset.
//!
//! Every normalizer is a pure function of one field value. The rule tables
//! they consult live in [`rules`] and are never mutated after first use.

use once_cell::sync::Lazy;
use regex::Regex;

pub mod cardinal;
pub mod event;
pub mod place;
pub mod price;
pub mod rules;
pub mod sponsor;
pub mod venue;

pub use event::{clean_event, EventNormalizer};
pub use place::{clean_place, PlaceNormalizer};
pub use price::{clean_price, format_price, PriceValue};
pub use sponsor::{clean_sponsor, SponsorNormalizer};
pub use venue::{clean_venue, VenueNormalizer};

/// A normalizer for one free-text column.
///
/// Implementations must be total: every input, including an absent one,
/// maps to some string.
pub trait FieldNormalizer: Send + Sync {
    /// Source column this normalizer reads
    fn column(&self) -> &str;

    /// Clean one value of the source column
    fn clean(&self, value: Option<&str>) -> String;
}

/// The text normalizers of the menu table, in output order
pub fn menu_normalizers() -> Vec<Box<dyn FieldNormalizer>> {
    vec![
        Box::new(PlaceNormalizer),
        Box::new(SponsorNormalizer),
        Box::new(EventNormalizer),
        Box::new(VenueNormalizer),
    ]
}

static BRACKETS_AND_QUOTES: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[\[\]()"']"#).unwrap());
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub(crate) fn strip_brackets_and_quotes(value: &str) -> String {
    BRACKETS_AND_QUOTES.replace_all(value, "").into_owned()
}

pub(crate) fn collapse_whitespace(value: &str) -> String {
    WHITESPACE_RUN.replace_all(value, " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_normalizers_cover_text_columns_in_order() {
        let columns: Vec<String> = menu_normalizers()
            .iter()
            .map(|n| n.column().to_string())
            .collect();
        assert_eq!(columns, vec!["place", "sponsor", "event", "venue"]);
    }

    #[test]
    fn test_every_text_normalizer_maps_absent_to_unknown() {
        for normalizer in menu_normalizers() {
            assert_eq!(normalizer.clean(None), "UNKNOWN", "{}", normalizer.column());
            assert_eq!(normalizer.clean(Some(" \t ")), "UNKNOWN", "{}", normalizer.column());
        }
    }

    #[test]
    fn test_helpers() {
        assert_eq!(strip_brackets_and_quotes("[a] (b) \"c\" 'd'"), "a b c d");
        assert_eq!(collapse_whitespace("a \t\n b   c"), "a b c");
        assert!(is_blank("  \n"));
        assert!(!is_blank(" x "));
    }
}
