use once_cell::sync::Lazy;
use regex::Regex;

use super::{collapse_whitespace, is_blank, strip_brackets_and_quotes, FieldNormalizer};
use crate::constants::{EVENT, UNKNOWN};

static TRUNCATED_DINNER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bDINNE\b").unwrap());

/// Uppercase an event name, drop noise and trailing `;`/`:` runs
pub fn clean_event(value: Option<&str>) -> String {
    let value = match value {
        Some(v) if !is_blank(v) => v,
        _ => return UNKNOWN.to_string(),
    };

    let value = strip_brackets_and_quotes(&value.trim().to_uppercase());
    let value = value.trim_end_matches(|c: char| c == ';' || c == ':' || c.is_whitespace());
    let value = TRUNCATED_DINNER.replace_all(value, "DINNER");
    let value = collapse_whitespace(&value);
    let value = value.trim();

    if value.is_empty() {
        UNKNOWN.to_string()
    } else {
        value.to_string()
    }
}

pub struct EventNormalizer;

impl FieldNormalizer for EventNormalizer {
    fn column(&self) -> &str {
        EVENT
    }

    fn clean(&self, value: Option<&str>) -> String {
        clean_event(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_event_is_unknown() {
        assert_eq!(clean_event(None), "UNKNOWN");
        assert_eq!(clean_event(Some("")), "UNKNOWN");
        assert_eq!(clean_event(Some(";;")), "UNKNOWN");
    }

    #[test]
    fn test_trailing_punctuation_is_removed() {
        assert_eq!(clean_event(Some("Breakfast;")), "BREAKFAST");
        assert_eq!(clean_event(Some("Luncheon ;: ")), "LUNCHEON");
        assert_eq!(clean_event(Some("Annual Banquet: Tenth")), "ANNUAL BANQUET: TENTH");
    }

    #[test]
    fn test_truncated_dinner_is_fixed() {
        assert_eq!(clean_event(Some("dinne")), "DINNER");
        assert_eq!(clean_event(Some("[Complimentary Dinne]")), "COMPLIMENTARY DINNER");
        // only the bare truncated word
        assert_eq!(clean_event(Some("Dinner")), "DINNER");
        assert_eq!(clean_event(Some("Dinnee")), "DINNEE");
    }

    #[test]
    fn test_clean_event_is_idempotent() {
        for input in ["dinne;", "  Supper  (Daily) ", "Banquet : ;", "'Ball'"] {
            let once = clean_event(Some(input));
            assert_eq!(clean_event(Some(&once)), once);
        }
    }
}
