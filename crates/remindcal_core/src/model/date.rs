//! Date and month input parsing.
//!
//! # Responsibility
//! - Validate `YYYY-MM-DD` date input and year/month pairs.
//! - Provide Gregorian month arithmetic for month browsing.
//!
//! # Invariants
//! - Accepted dates always format back to the exact canonical key shape.
//! - Supported years are `1..=9999` so keys stay four digits wide.

use chrono::{Datelike, Month, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Canonical storage/display format for reminder dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Earliest year a reminder key can name.
pub const MIN_YEAR: i32 = 1;
/// Latest year a reminder key can name.
pub const MAX_YEAR: i32 = 9999;

static DATE_SHAPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid date shape regex"));

/// Error for date input that cannot become a reminder key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateParseError {
    /// Input is blank after trimming.
    Empty,
    /// Input does not match `YYYY-MM-DD`.
    InvalidFormat(String),
    /// Input has the right shape but names no calendar day.
    InvalidDate(String),
}

impl Display for DateParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "date cannot be empty"),
            Self::InvalidFormat(value) => {
                write!(f, "invalid date format `{value}`; expected YYYY-MM-DD")
            }
            Self::InvalidDate(value) => write!(f, "`{value}` is not a valid calendar date"),
        }
    }
}

impl Error for DateParseError {}

/// Error for year/month input used by month browsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthParseError {
    /// Year or month is not an integer.
    NotNumeric,
    /// Month outside `1..=12`.
    MonthOutOfRange(i64),
    /// Year outside the supported calendar range.
    YearOutOfRange(i64),
}

impl Display for MonthParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotNumeric => write!(f, "year and month must be numeric"),
            Self::MonthOutOfRange(month) => {
                write!(f, "month must be between 1 and 12, got {month}")
            }
            Self::YearOutOfRange(year) => {
                write!(f, "year must be between {MIN_YEAR} and {MAX_YEAR}, got {year}")
            }
        }
    }
}

impl Error for MonthParseError {}

/// Parses strict `YYYY-MM-DD` input into a calendar date.
///
/// Surrounding whitespace is ignored. Unpadded forms such as `2025-6-1` are
/// rejected so that every stored key has exactly one spelling.
pub fn parse_date(input: &str) -> Result<NaiveDate, DateParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(DateParseError::Empty);
    }
    if !DATE_SHAPE_RE.is_match(trimmed) {
        return Err(DateParseError::InvalidFormat(trimmed.to_string()));
    }

    let date = NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| DateParseError::InvalidDate(trimmed.to_string()))?;
    if !(MIN_YEAR..=MAX_YEAR).contains(&date.year()) {
        return Err(DateParseError::InvalidDate(trimmed.to_string()));
    }
    Ok(date)
}

/// Formats a date as its canonical reminder key.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parses year and month text for month browsing.
pub fn parse_year_month(year: &str, month: &str) -> Result<(i32, u32), MonthParseError> {
    let year = year
        .trim()
        .parse::<i64>()
        .map_err(|_| MonthParseError::NotNumeric)?;
    let month = month
        .trim()
        .parse::<i64>()
        .map_err(|_| MonthParseError::NotNumeric)?;

    if !(1..=12).contains(&month) {
        return Err(MonthParseError::MonthOutOfRange(month));
    }
    if !(i64::from(MIN_YEAR)..=i64::from(MAX_YEAR)).contains(&year) {
        return Err(MonthParseError::YearOutOfRange(year));
    }

    // Both values were range-checked above.
    Ok((year as i32, month as u32))
}

/// Returns the number of days in a Gregorian month, or `None` for an invalid
/// month.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    u32::try_from(next.signed_duration_since(first).num_days()).ok()
}

/// Returns the English month name for `1..=12`.
pub fn month_name(month: u32) -> Option<&'static str> {
    let month = u8::try_from(month).ok()?;
    Month::try_from(month).ok().map(|value| value.name())
}
