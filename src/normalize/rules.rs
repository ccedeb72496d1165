//! Static rewrite tables used by the text normalizers.
//!
//! Every table is an ordered slice; order is significant wherever a later
//! rule can see the output of an earlier one.

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

/// A compiled whole-word, case-insensitive substitution
pub struct RewriteRule {
    pattern: Regex,
    replacement: &'static str,
}

impl RewriteRule {
    /// Build a rule matching `surface` as a whole word, ignoring case.
    ///
    /// Only called on the static tables below, which are known to escape cleanly.
    pub fn word(surface: &str, replacement: &'static str) -> Self {
        let pattern = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(surface)))
            .expect("escaped literal is always a valid pattern");
        Self { pattern, replacement }
    }

    pub fn apply(&self, value: &str) -> String {
        self.pattern
            .replace_all(value, NoExpand(self.replacement))
            .into_owned()
    }
}

/// Apply each rule in order, feeding the output of one into the next
pub fn apply_all(rules: &[RewriteRule], value: String) -> String {
    rules.iter().fold(value, |acc, rule| rule.apply(&acc))
}

/// Spelling fixes observed in the raw place column
pub const PLACE_TYPOS: &[(&str, &str)] = &[("HOEL", "HOTEL"), ("ANDERTON'S", "ANDERTONS")];

/// US state names and historical abbreviations to postal codes
#[rustfmt::skip]
pub const STATE_ABBREVIATIONS: &[(&str, &str)] = &[
    ("ALA", "AL"), ("ALABAMA", "AL"),
    ("ALASKA", "AK"),
    ("ARIZ", "AZ"), ("ARIZONA", "AZ"),
    ("ARK", "AR"), ("ARKANSAS", "AR"),
    ("CALIF", "CA"), ("CALIFORNIA", "CA"),
    ("COLO", "CO"), ("COLORADO", "CO"),
    ("CONN", "CT"), ("CONNECTICUT", "CT"),
    ("DEL", "DE"), ("DELAWARE", "DE"),
    ("FLA", "FL"), ("FLORIDA", "FL"),
    ("GA", "GA"), ("GEORGIA", "GA"),
    ("IDAHO", "ID"),
    ("ILL", "IL"), ("ILLINOIS", "IL"),
    ("IND", "IN"), ("INDIANA", "IN"),
    ("IOWA", "IA"),
    ("KAN", "KS"), ("KANSAS", "KS"),
    ("KY", "KY"), ("KENTUCKY", "KY"),
    ("LA", "LA"), ("LOUISIANA", "LA"),
    ("MAINE", "ME"),
    ("MD", "MD"), ("MARYLAND", "MD"),
    ("MASS", "MA"), ("MASSACHUSETTS", "MA"),
    ("MICH", "MI"), ("MICHIGAN", "MI"),
    ("MINN", "MN"), ("MINNESOTA", "MN"),
    ("MISS", "MS"), ("MISSISSIPPI", "MS"),
    ("MO", "MO"), ("MISSOURI", "MO"),
    ("MONT", "MT"), ("MONTANA", "MT"),
    ("NEBR", "NE"), ("NEBRASKA", "NE"),
    ("NEV", "NV"), ("NEVADA", "NV"),
    ("N H", "NH"), ("NEW HAMPSHIRE", "NH"),
    ("N J", "NJ"), ("NEW JERSEY", "NJ"),
    ("N M", "NM"), ("NEW MEXICO", "NM"),
    ("NY", "NY"), ("N Y", "NY"), ("NEW YORK", "NY"),
    ("N C", "NC"), ("NORTH CAROLINA", "NC"),
    ("N D", "ND"), ("NORTH DAKOTA", "ND"),
    ("OHIO", "OH"),
    ("OKLA", "OK"), ("OKLAHOMA", "OK"),
    ("OREG", "OR"), ("OREGON", "OR"),
    ("PENN", "PA"), ("PENNSYLVANIA", "PA"),
    ("R I", "RI"), ("RHODE ISLAND", "RI"),
    ("S C", "SC"), ("SOUTH CAROLINA", "SC"),
    ("S D", "SD"), ("SOUTH DAKOTA", "SD"),
    ("TENN", "TN"), ("TENNESSEE", "TN"),
    ("TEX", "TX"), ("TEXAS", "TX"),
    ("UTAH", "UT"),
    ("VT", "VT"), ("VERMONT", "VT"),
    ("VA", "VA"), ("VIRGINIA", "VA"),
    ("WASH", "WA"), ("WASHINGTON", "WA"),
    ("W VA", "WV"), ("WEST VIRGINIA", "WV"),
    ("WIS", "WI"), ("WISCONSIN", "WI"),
    ("WYO", "WY"), ("WYOMING", "WY"),
];

/// City shorthands expanded to `CITY, ST` once states are normalized
pub const CITY_ALIASES: &[(&str, &str)] = &[("NYC", "NEW YORK, NY"), ("NY", "NEW YORK, NY")];

/// Venue category prefixes, scanned top to bottom; the first prefix the
/// cleaned value starts with decides the category.
///
/// Entries carrying punctuation can no longer match once the venue value has
/// been filtered down to letters and separators, but they are kept so the
/// scan order stays exactly as observed in the raw data.
pub const VENUE_CATEGORIES: &[(&str, &str)] = &[
    ("COMMERCIAL", "COMMERCIAL"),
    ("COM", "COMMERCIAL"),
    ("COMMERCOA", "COMMERCIAL"),
    ("CMMERCIAL", "COMMERCIAL"),
    ("COMM", "COMMERCIAL"),
    ("COMM.", "COMMERCIAL"),
    ("COM.;", "COMMERCIAL"),
    ("GOVT", "GOVERNMENT"),
    ("GOV'T", "GOVERNMENT"),
    ("GOV'T.", "GOVERNMENT"),
    ("GOV.", "GOVERNMENT"),
    ("GOV", "GOVERNMENT"),
    ("SOC", "SOCIAL"),
    ("SOC;", "SOCIAL"),
    ("SOCIAL CLUB", "SOCIAL"),
    ("POLIT", "POLITICAL"),
    ("POL;", "POLITICAL"),
    ("POL", "POLITICAL"),
    ("RELIG;", "RELIGIOUS"),
    ("RELIG", "RELIGIOUS"),
    ("NAV", "NAVAL"),
    ("NAV.", "NAVAL"),
    ("NAVAL;", "NAVAL"),
    ("MIL;", "MILITARY"),
    ("MIL.", "MILITARY"),
    ("MIL", "MILITARY"),
    ("EDUC;", "EDUCATIONAL"),
    ("EDUC", "EDUCATIONAL"),
    ("EDUS", "EDUCATIONAL"),
    ("EDUCATIONAL;", "EDUCATIONAL"),
    ("PROF;", "PROFESSIONAL"),
    ("PROF", "PROFESSIONAL"),
    ("PROF.", "PROFESSIONAL"),
    ("PRO;", "PROFESSIONAL"),
    ("PATRIOTIC?", "PATRIOTIC"),
    ("PAT", "PATRIOTIC"),
    ("PATR", "PATRON"),
    ("PATR.", "PATRON"),
    ("PRIVATE PARTY", "PRIVATE"),
    ("PRIVATE;", "PRIVATE"),
    ("PRIVATE", "PRIVATE"),
];

/// Raw venue strings that carry no information at all
pub const VENUE_SENTINELS: &[&str] = &["", "?", "[?]", "[POL?);"];

fn compile(table: &[(&str, &'static str)]) -> Vec<RewriteRule> {
    table
        .iter()
        .map(|(surface, replacement)| RewriteRule::word(surface, replacement))
        .collect()
}

pub static PLACE_TYPO_RULES: Lazy<Vec<RewriteRule>> = Lazy::new(|| compile(PLACE_TYPOS));

/// Longest surfaces first, so `WEST VIRGINIA` is rewritten before `VIRGINIA`
/// can turn it into `WEST VA`.
pub static STATE_RULES: Lazy<Vec<RewriteRule>> = Lazy::new(|| {
    let mut table = STATE_ABBREVIATIONS.to_vec();
    table.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    compile(&table)
});

pub static CITY_ALIAS_RULES: Lazy<Vec<RewriteRule>> = Lazy::new(|| compile(CITY_ALIASES));

/// First category whose prefix `value` starts with, in table order
pub fn classify_venue(value: &str) -> Option<&'static str> {
    VENUE_CATEGORIES
        .iter()
        .find(|(prefix, _)| value.starts_with(prefix))
        .map(|(_, category)| *category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_rule_respects_word_boundaries() {
        let rule = RewriteRule::word("LA", "LA");
        assert_eq!(rule.apply("Atlanta"), "Atlanta");
        let rule = RewriteRule::word("MASS", "MA");
        assert_eq!(rule.apply("Boston mass"), "Boston MA");
        assert_eq!(rule.apply("Massachusetts Ave"), "Massachusetts Ave");
    }

    #[test]
    fn test_word_rule_handles_multi_word_surfaces() {
        let rule = RewriteRule::word("N Y", "NY");
        assert_eq!(rule.apply("Albany, n y"), "Albany, NY");
    }

    #[test]
    fn test_replacement_is_literal() {
        let rule = RewriteRule::word("X", "$1 Y");
        assert_eq!(rule.apply("a x b"), "a $1 Y b");
    }

    #[test]
    fn test_all_state_variants_resolve_to_two_letter_codes() {
        for (surface, code) in STATE_ABBREVIATIONS {
            assert_eq!(code.len(), 2, "bad code for {}", surface);
        }
        assert_eq!(apply_all(&STATE_RULES, "New York".to_string()), "NY");
        assert_eq!(apply_all(&STATE_RULES, "N Y".to_string()), "NY");
        assert_eq!(apply_all(&STATE_RULES, "ny".to_string()), "NY");
        assert_eq!(apply_all(&STATE_RULES, "West Virginia".to_string()), "WV");
        assert_eq!(apply_all(&STATE_RULES, "W Virginia".to_string()), "WV");
    }

    #[test]
    fn test_venue_classification_is_first_match() {
        assert_eq!(classify_venue("PATRON"), Some("PATRIOTIC"));
        assert_eq!(classify_venue("COMMUNITY HALL"), Some("COMMERCIAL"));
        assert_eq!(classify_venue("PRIVATE PARTY"), Some("PRIVATE"));
        assert_eq!(classify_venue("HOTEL"), None);
    }
}
