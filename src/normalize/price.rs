use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use super::cardinal::{parse_cardinal, CardinalError};

static PRICE_NOISE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9./ ]").unwrap());

const AND_A_HALF: &str = "and a half";

/// A raw price cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PriceValue<'a> {
    Missing,
    Number(f64),
    Text(&'a str),
}

impl<'a> PriceValue<'a> {
    /// Classify a CSV cell: blank is missing, a float literal is a number,
    /// anything else is text to be parsed.
    pub fn from_cell(cell: &'a str) -> Self {
        let trimmed = cell.trim();
        if trimmed.is_empty() {
            PriceValue::Missing
        } else if let Ok(number) = trimmed.parse::<f64>() {
            PriceValue::Number(number)
        } else {
            PriceValue::Text(cell)
        }
    }
}

impl<'a> From<Option<&'a str>> for PriceValue<'a> {
    fn from(value: Option<&'a str>) -> Self {
        value.map_or(PriceValue::Missing, PriceValue::from_cell)
    }
}

impl From<f64> for PriceValue<'_> {
    fn from(value: f64) -> Self {
        PriceValue::Number(value)
    }
}

/// Why a single parse strategy did not produce a price
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PriceParseError {
    #[error(transparent)]
    Cardinal(#[from] CardinalError),

    #[error("'{0}' is not a fraction")]
    NotAFraction(String),

    #[error("zero denominator in '{0}'")]
    ZeroDenominator(String),

    #[error("'{0}' is not a number")]
    NotANumber(String),
}

/// Turn a raw price into a number, or `None` when nothing sensible can be read.
///
/// Text is tried as a spelled-out number (with an optional "and a half"),
/// then as a mixed or simple fraction, then as a plain decimal literal.
pub fn clean_price<'a>(value: impl Into<PriceValue<'a>>) -> Option<f64> {
    let parsed = match value.into() {
        PriceValue::Missing => return None,
        PriceValue::Number(number) => number,
        PriceValue::Text(text) => {
            let text = normalize_price_text(text);
            parse_with_half(&text)
                .or_else(|_| parse_cardinal(&text).map_err(PriceParseError::from))
                .or_else(|_| parse_fraction(&text))
                .or_else(|_| parse_literal(&text))
                .ok()?
        }
    };
    parsed.is_finite().then_some(parsed)
}

fn normalize_price_text(text: &str) -> String {
    PRICE_NOISE
        .replace_all(&text.trim().to_lowercase(), "")
        .into_owned()
}

fn parse_with_half(text: &str) -> Result<f64, PriceParseError> {
    match text.split_once(AND_A_HALF) {
        Some((whole, _)) => Ok(parse_cardinal(whole.trim())? + 0.5),
        None => Err(PriceParseError::NotANumber(text.to_string())),
    }
}

/// `"2 1/2"` or `"3/4"`; exactly one space and one slash are allowed
fn parse_fraction(text: &str) -> Result<f64, PriceParseError> {
    let not_a_fraction = || PriceParseError::NotAFraction(text.to_string());

    if text.contains(' ') {
        let mut parts = text.split(' ');
        let (whole, fraction) = match (parts.next(), parts.next(), parts.next()) {
            (Some(whole), Some(fraction), None) => (whole, fraction),
            _ => return Err(not_a_fraction()),
        };
        let whole = parse_literal(whole)?;
        Ok(whole + parse_simple_fraction(fraction).map_err(|e| match e {
            PriceParseError::ZeroDenominator(_) => e,
            _ => not_a_fraction(),
        })?)
    } else if text.contains('/') {
        parse_simple_fraction(text)
    } else {
        Err(not_a_fraction())
    }
}

fn parse_simple_fraction(text: &str) -> Result<f64, PriceParseError> {
    let (numerator, denominator) = text
        .split_once('/')
        .filter(|(_, denominator)| !denominator.contains('/'))
        .ok_or_else(|| PriceParseError::NotAFraction(text.to_string()))?;
    let numerator = parse_literal(numerator)?;
    let denominator = parse_literal(denominator)?;
    if denominator == 0.0 {
        return Err(PriceParseError::ZeroDenominator(text.to_string()));
    }
    Ok(numerator / denominator)
}

fn parse_literal(text: &str) -> Result<f64, PriceParseError> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| PriceParseError::NotANumber(text.to_string()))
}

/// Render a cleaned price the way the output file expects: whole numbers keep
/// one decimal place (`2.0`), absent prices use `placeholder`.
pub fn format_price(value: Option<f64>, placeholder: &str) -> String {
    match value {
        Some(v) if v.fract() == 0.0 && v.abs() < 1e15 => format!("{:.1}", v),
        Some(v) => v.to_string(),
        None => placeholder.to_string(),
    }
}
