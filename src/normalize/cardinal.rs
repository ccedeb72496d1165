//! Spelled-out English cardinal numbers ("two", "one hundred twenty five",
//! "three point five").

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CardinalError {
    #[error("no number words found in '{0}'")]
    NoNumberWords(String),

    #[error("number word '{0}' repeated")]
    Redundant(&'static str),

    #[error("scale words out of order in '{0}'")]
    Malformed(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Word {
    Unit(u64),
    Hundred,
    Scale(&'static str, u64),
    Point,
}

fn lookup(word: &str) -> Option<Word> {
    let unit = match word {
        "zero" => 0,
        "one" => 1,
        "two" => 2,
        "three" => 3,
        "four" => 4,
        "five" => 5,
        "six" => 6,
        "seven" => 7,
        "eight" => 8,
        "nine" => 9,
        "ten" => 10,
        "eleven" => 11,
        "twelve" => 12,
        "thirteen" => 13,
        "fourteen" => 14,
        "fifteen" => 15,
        "sixteen" => 16,
        "seventeen" => 17,
        "eighteen" => 18,
        "nineteen" => 19,
        "twenty" => 20,
        "thirty" => 30,
        "forty" => 40,
        "fifty" => 50,
        "sixty" => 60,
        "seventy" => 70,
        "eighty" => 80,
        "ninety" => 90,
        "hundred" => return Some(Word::Hundred),
        "thousand" => return Some(Word::Scale("thousand", 1_000)),
        "million" => return Some(Word::Scale("million", 1_000_000)),
        "billion" => return Some(Word::Scale("billion", 1_000_000_000)),
        "point" => return Some(Word::Point),
        _ => return None,
    };
    Some(Word::Unit(unit))
}

/// Parse a spelled-out cardinal.
///
/// Words that are not number words are ignored, so `"two dollars"` is 2.
/// A string made only of ASCII digits is read as an integer. Words after
/// `point` are decimal digits; if any of them is not a single digit the
/// decimal part is dropped.
pub fn parse_cardinal(text: &str) -> Result<f64, CardinalError> {
    let text = text.replace('-', " ").to_lowercase();
    let trimmed = text.trim();

    if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return trimmed
            .parse::<u64>()
            .map(|n| n as f64)
            .map_err(|_| CardinalError::Malformed(trimmed.to_string()));
    }

    let words: Vec<Word> = trimmed.split_whitespace().filter_map(lookup).collect();
    if words.is_empty() {
        return Err(CardinalError::NoNumberWords(trimmed.to_string()));
    }

    for repeatable in ["thousand", "million", "billion"] {
        let count = words
            .iter()
            .filter(|w| matches!(w, Word::Scale(name, _) if *name == repeatable))
            .count();
        if count > 1 {
            return Err(CardinalError::Redundant(repeatable));
        }
    }
    if words.iter().filter(|w| **w == Word::Point).count() > 1 {
        return Err(CardinalError::Redundant("point"));
    }

    let (integer_words, decimal_words) = match words.iter().position(|w| *w == Word::Point) {
        Some(at) => (&words[..at], &words[at + 1..]),
        None => (&words[..], &[][..]),
    };

    let integer = integer_part(integer_words)
        .ok_or_else(|| CardinalError::Malformed(trimmed.to_string()))?;
    Ok(integer as f64 + decimal_part(decimal_words))
}

/// `None` for out-of-order scales or a value that does not fit in `u64`
fn integer_part(words: &[Word]) -> Option<u64> {
    let mut total: u64 = 0;
    let mut current: u64 = 0;
    let mut last_scale: Option<u64> = None;

    for word in words {
        match *word {
            Word::Unit(n) => current = current.checked_add(n)?,
            Word::Hundred => current = current.max(1).checked_mul(100)?,
            Word::Scale(_, scale) => {
                if last_scale.is_some_and(|last| scale >= last) {
                    return None;
                }
                total = current
                    .max(1)
                    .checked_mul(scale)
                    .and_then(|value| total.checked_add(value))?;
                current = 0;
                last_scale = Some(scale);
            }
            Word::Point => return None,
        }
    }
    total.checked_add(current)
}

fn decimal_part(words: &[Word]) -> f64 {
    let mut digits = String::with_capacity(words.len());
    for word in words {
        match word {
            Word::Unit(n) if *n < 10 => digits.push(char::from(b'0' + *n as u8)),
            _ => return 0.0,
        }
    }
    if digits.is_empty() {
        return 0.0;
    }
    format!("0.{}", digits).parse().unwrap_or(0.0)
}
