use super::{collapse_whitespace, is_blank, strip_brackets_and_quotes, FieldNormalizer};
use crate::constants::{SPONSOR, UNKNOWN};

/// Uppercase a sponsor name and drop bracket/quote noise
pub fn clean_sponsor(value: Option<&str>) -> String {
    let value = match value {
        Some(v) if !is_blank(v) => v,
        _ => return UNKNOWN.to_string(),
    };

    let value = strip_brackets_and_quotes(&value.trim().to_uppercase());
    let value = collapse_whitespace(&value);
    let value = value.trim();

    if value.is_empty() {
        UNKNOWN.to_string()
    } else {
        value.to_string()
    }
}

pub struct SponsorNormalizer;

impl FieldNormalizer for SponsorNormalizer {
    fn column(&self) -> &str {
        SPONSOR
    }

    fn clean(&self, value: Option<&str>) -> String {
        clean_sponsor(value)
    }
}
