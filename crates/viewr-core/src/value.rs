//! Cell value inference.
//!
//! Cell text is classified by a fixed chain of try-parse strategies:
//! timestamp first, then number, then plain text. Two cells compare by the
//! first strategy that succeeds for both of them.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::direction::SortDirection;

/// Kind of a parsed cell value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Timestamp,
    Number,
    Text,
}

/// A try-parse strategy. Text is not one: it is what remains when every
/// strategy fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStrategy {
    Timestamp,
    Number,
}

/// Strategies in priority order.
pub const STRATEGY_CHAIN: [ParseStrategy; 2] = [ParseStrategy::Timestamp, ParseStrategy::Number];

/// Naive date-time layouts accepted after the space/`T` normalization.
const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Minute-precision layouts with an offset (`Z` is rewritten to `+00:00` first).
const OFFSET_DATETIME_FORMATS: [&str; 1] = ["%Y-%m-%dT%H:%M%:z"];

/// A classified cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Milliseconds since the Unix epoch.
    Timestamp(i64),
    /// Finite number.
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Timestamp(_) => ValueKind::Timestamp,
            Self::Number(_) => ValueKind::Number,
            Self::Text(_) => ValueKind::Text,
        }
    }

    /// Ascending comparison of two values of the same kind.
    ///
    /// Returns `None` when the kinds differ.
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Timestamp(a), Self::Timestamp(b)) => Some(a.cmp(b)),
            (Self::Number(a), Self::Number(b)) => Some(a.partial_cmp(b).unwrap_or(Ordering::Equal)),
            (Self::Text(a), Self::Text(b)) => Some(locale_compare(a, b)),
            _ => None,
        }
    }
}

impl ParseStrategy {
    /// Run this strategy on trimmed cell text.
    pub fn try_parse(self, text: &str) -> Option<CellValue> {
        match self {
            Self::Timestamp => parse_timestamp(text).map(CellValue::Timestamp),
            Self::Number => parse_number(text).map(CellValue::Number),
        }
    }
}

/// Classify one cell on its own.
pub fn classify(text: &str) -> CellValue {
    let text = text.trim();
    STRATEGY_CHAIN
        .iter()
        .find_map(|strategy| strategy.try_parse(text))
        .unwrap_or_else(|| CellValue::Text(text.to_string()))
}

/// Pre-parsed comparison key for one cell.
///
/// Holds the result of every strategy so pairwise comparison can pick the
/// first one both sides support.
#[derive(Debug, Clone, PartialEq)]
pub struct SortKey {
    text: String,
    parsed: [Option<CellValue>; STRATEGY_CHAIN.len()],
}

impl SortKey {
    pub fn new(text: &str) -> Self {
        let text = text.trim();
        Self {
            text: text.to_string(),
            parsed: STRATEGY_CHAIN.map(|strategy| strategy.try_parse(text)),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Ascending comparison against another key.
    pub fn compare(&self, other: &Self) -> Ordering {
        self.parsed
            .iter()
            .zip(&other.parsed)
            .find_map(|pair| match pair {
                (Some(a), Some(b)) => a.compare(b),
                _ => None,
            })
            .unwrap_or_else(|| locale_compare(&self.text, &other.text))
    }
}

/// Compare two cell texts in `direction`.
pub fn compare_cells(a: &str, b: &str, direction: SortDirection) -> Ordering {
    direction.apply(SortKey::new(a).compare(&SortKey::new(b)))
}

/// Parse `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS` or ISO-8601 text.
///
/// The first space is read as the date/time separator. Values without an
/// offset are taken as UTC; a browser would read date-times without an
/// offset as local time, so only their relative order is guaranteed to
/// match. Returns milliseconds since the Unix epoch.
pub fn parse_timestamp(text: &str) -> Option<i64> {
    let iso_like = text.trim().replacen(' ', "T", 1);

    if let Ok(dt) = DateTime::parse_from_rfc3339(&iso_like) {
        return Some(dt.timestamp_millis());
    }

    let with_offset = match iso_like.strip_suffix(['Z', 'z']) {
        Some(rest) => format!("{rest}+00:00"),
        None => iso_like.clone(),
    };
    if let Some(dt) = OFFSET_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(&with_offset, fmt).ok())
    {
        return Some(dt.timestamp_millis());
    }

    if let Some(naive) = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&iso_like, fmt).ok())
    {
        return Some(naive.and_utc().timestamp_millis());
    }

    NaiveDate::parse_from_str(&iso_like, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().timestamp_millis())
}

/// Parse the leading number of `text`, ignoring `,` thousands separators.
///
/// Trailing text after the number is ignored (`"12.5 BEE"` is 12.5).
/// Returns `None` when there is no leading number or it is not finite.
pub fn parse_number(text: &str) -> Option<f64> {
    let cleaned: String = text.chars().filter(|c| *c != ',').collect();
    let literal = leading_float(cleaned.trim_start())?;
    literal.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Longest prefix of `s` that is a decimal float literal.
fn leading_float(s: &str) -> Option<&str> {
    let bytes = s.as_bytes();
    let is_digit = |i: usize| bytes.get(i).is_some_and(u8::is_ascii_digit);

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_start = end;
    while is_digit(end) {
        end += 1;
    }
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let mut frac_end = end + 1;
        while is_digit(frac_end) {
            frac_end += 1;
        }
        let frac_digits = frac_end - end - 1;
        if digits + frac_digits > 0 {
            digits += frac_digits;
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_start = exp_end;
        while is_digit(exp_end) {
            exp_end += 1;
        }
        if exp_end > exp_start {
            end = exp_end;
        }
    }

    Some(&s[..end])
}

/// Locale-style string ordering.
///
/// Case-insensitive first; on a tie lower case sorts before upper case, then
/// raw code points decide.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let folded = |s: &str| s.chars().flat_map(char::to_lowercase).collect::<Vec<_>>();
    folded(a)
        .cmp(&folded(b))
        .then_with(|| {
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
        .then_with(|| a.cmp(b))
}
