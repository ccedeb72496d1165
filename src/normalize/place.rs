use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use super::rules::{apply_all, CITY_ALIAS_RULES, PLACE_TYPO_RULES, STATE_RULES};
use super::{is_blank, FieldNormalizer};
use crate::constants::{PLACE, UNKNOWN};

static PLACE_NOISE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[\[\]"'()?]"#).unwrap());
static SEPARATOR_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*[,;]+\s*").unwrap());

/// Normalize a free-text place into an uppercase, comma separated location.
///
/// Typos are fixed first, then noise characters go, then state names and
/// city shorthands are canonicalized. Repeated segments are dropped, ignoring
/// case and keeping the first occurrence, so `New York, NY, New York, NY` becomes
/// `NEW YORK, NY`.
pub fn clean_place(value: Option<&str>) -> String {
    let value = match value {
        Some(v) if !is_blank(v) => v,
        _ => return UNKNOWN.to_string(),
    };

    let value = apply_all(&PLACE_TYPO_RULES, value.to_string());
    let value = PLACE_NOISE.replace_all(&value, "");
    let value = SEPARATOR_RUN.replace_all(&value, ", ");
    let value = value.trim_matches(|c: char| matches!(c, ',' | ';' | ' '));

    let value = apply_all(&STATE_RULES, value.to_string());
    let value = apply_all(&CITY_ALIAS_RULES, value).to_uppercase();

    let mut seen = HashSet::new();
    let segments: Vec<&str> = value
        .split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty() && seen.insert(*segment))
        .collect();

    if segments.is_empty() {
        return UNKNOWN.to_string();
    }
    segments.join(", ")
}

pub struct PlaceNormalizer;

impl FieldNormalizer for PlaceNormalizer {
    fn column(&self) -> &str {
        PLACE
    }

    fn clean(&self, value: Option<&str>) -> String {
        clean_place(value)
    }
}
