//! Date-string parsing.
//!
//! Dates scraped from news pages come in every shape: RFC 3339 from JSON-LD,
//! `2024/03/07` rebuilt from URL segments, `10:22 AM EST, Thu March 7, 2024`
//! from visible bylines. `FuzzyDateParser` first tries the strict chrono
//! formats, then falls back to `dtparse`, which follows dateutil's rules:
//! every token must be placed in a date field and missing fields come from
//! the current date.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use dtparse::Parser;

use crate::result::PublishedDate;

/// Failure to turn a string into a timestamp.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateParseError {
    /// Nothing to parse.
    #[error("empty date string")]
    Empty,

    /// The string is not a date, or names an impossible one.
    #[error("unknown string format: {0}")]
    UnknownFormat(String),

    /// The parsed offset cannot be applied to the local time.
    #[error("date out of range: {0}")]
    OutOfRange(String),
}

/// Parses free-form date strings into timestamps.
pub trait DateParser: Send + Sync + fmt::Debug {
    /// Parse a single date string.
    fn parse(&self, input: &str) -> Result<PublishedDate, DateParseError>;
}

/// Default parser: strict formats first, then `dtparse`.
///
/// Month-first is assumed for ambiguous numeric dates (`03/07/2024` is March
/// 7th) unless the first number cannot be a month. Fields the string leaves
/// out are taken from today's date. US zone abbreviations resolve to fixed
/// offsets; other unknown zone names leave the value naive.
#[derive(Debug, Clone, Copy, Default)]
pub struct FuzzyDateParser;

impl FuzzyDateParser {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl DateParser for FuzzyDateParser {
    fn parse(&self, input: &str) -> Result<PublishedDate, DateParseError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(DateParseError::Empty);
        }
        if let Some(date) = parse_strict(input) {
            return Ok(date);
        }
        parse_loose(input)
    }
}

// ============================================================
// STRICT FORMATS
// ============================================================

const AWARE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S %z",
];

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

fn parse_strict(input: &str) -> Option<PublishedDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(PublishedDate::Aware(dt));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(input) {
        return Some(PublishedDate::Aware(dt));
    }
    for fmt in AWARE_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(input, fmt) {
            return Some(PublishedDate::Aware(dt));
        }
    }
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, fmt) {
            return Some(PublishedDate::Naive(dt));
        }
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .map(PublishedDate::from)
}

// ============================================================
// LOOSE FORMATS
// ============================================================

/// Zone abbreviations common in bylines, in seconds east of UTC.
static TZINFOS: LazyLock<HashMap<String, i32>> = LazyLock::new(|| {
    [
        ("EST", -5), ("EDT", -4), ("CST", -6), ("CDT", -5),
        ("MST", -7), ("MDT", -6), ("PST", -8), ("PDT", -7),
        ("BST", 1), ("CET", 1), ("CEST", 2), ("JST", 9),
    ]
    .into_iter()
    .map(|(name, hours)| (name.to_string(), hours * 3600))
    .collect()
});

fn parse_loose(input: &str) -> Result<PublishedDate, DateParseError> {
    let (naive, offset, _) = Parser::default()
        .parse(input, None, None, false, false, None, false, &TZINFOS)
        .map_err(|e| DateParseError::UnknownFormat(format!("{input}: {e:?}")))?;

    match offset {
        Some(offset) => naive
            .and_local_timezone(offset)
            .single()
            .map(PublishedDate::Aware)
            .ok_or_else(|| DateParseError::OutOfRange(input.to_string())),
        None => Ok(PublishedDate::Naive(naive)),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Datelike;

    use super::*;

    fn parse(input: &str) -> Result<PublishedDate, DateParseError> {
        FuzzyDateParser::new().parse(input)
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
    }

    #[test]
    fn test_url_style_date() {
        let date = parse("2024/03/07");
        assert_eq!(date, Ok(PublishedDate::from(ymd(2024, 3, 7))));
    }

    #[test]
    fn test_rfc3339_is_aware() {
        let date = parse("2024-03-07T10:30:00.000+05:00").unwrap_or(PublishedDate::from(ymd(1, 1, 1)));
        assert!(date.is_aware());
        assert_eq!(date.date(), ymd(2024, 3, 7));
        assert_eq!(date.to_string(), "2024-03-07T10:30:00+05:00");
    }

    #[test]
    fn test_iso_without_zone_is_naive() {
        let date = parse("2024-03-07T10:30:00");
        assert_eq!(
            date.map(|d| (d.is_aware(), d.naive_local().to_string())),
            Ok((false, "2024-03-07 10:30:00".to_string()))
        );
    }

    #[test]
    fn test_rfc2822() {
        let date = parse("Thu, 07 Mar 2024 10:00:00 GMT");
        assert_eq!(date.map(|d| (d.is_aware(), d.date())), Ok((true, ymd(2024, 3, 7))));
    }

    #[test]
    fn test_month_names() {
        assert_eq!(parse("March 7, 2024").map(|d| d.date()), Ok(ymd(2024, 3, 7)));
        assert_eq!(parse("7 March 2024").map(|d| d.date()), Ok(ymd(2024, 3, 7)));
        assert_eq!(parse("07-Mar-2024").map(|d| d.date()), Ok(ymd(2024, 3, 7)));
    }

    #[test]
    fn test_byline_with_timezone_abbreviation() {
        let date = parse("10:22 PM EST, Thu March 7, 2024");
        let Ok(PublishedDate::Aware(dt)) = date else {
            panic!("expected aware timestamp, got {date:?}");
        };
        assert_eq!(dt.offset().local_minus_utc(), -5 * 3600);
        assert_eq!(dt.naive_local().to_string(), "2024-03-07 22:22:00");
    }

    #[test]
    fn test_leading_words_are_rejected() {
        let date = parse("Published March 7, 2024");
        assert!(matches!(date, Err(DateParseError::UnknownFormat(_))));
    }

    #[test]
    fn test_missing_fields_come_from_today() {
        let date = parse("March 2024").map(|d| (d.date().year(), d.date().month()));
        assert_eq!(date, Ok((2024, 3)));
    }

    #[test]
    fn test_numeric_month_first() {
        assert_eq!(parse("03/07/2024").map(|d| d.date()), Ok(ymd(2024, 3, 7)));
        assert_eq!(parse("25/12/2023").map(|d| d.date()), Ok(ymd(2023, 12, 25)));
    }

    #[test]
    fn test_rejects_non_dates() {
        assert_eq!(parse(""), Err(DateParseError::Empty));
        assert!(matches!(parse("breaking news"), Err(DateParseError::UnknownFormat(_))));
        assert!(matches!(parse("2024/07/breaking-news"), Err(DateParseError::UnknownFormat(_))));
        assert!(matches!(parse("2024/world/01"), Err(DateParseError::UnknownFormat(_))));
        assert!(parse("2024/02/30").is_err());
    }
}
