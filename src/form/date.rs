//! Date parsing and display normalization.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use std::fmt;

/// Text shown when a date could not be parsed.
pub const INVALID_DATE: &str = "Invalid Date";

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Result of normalizing a date-like input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedDate {
    /// `DD-MM-YY`.
    Formatted(String),
    /// The input did not parse; holds the original text.
    Unparsed(String),
}

impl NormalizedDate {
    pub fn as_formatted(&self) -> Option<&str> {
        match self {
            Self::Formatted(value) => Some(value),
            Self::Unparsed(_) => None,
        }
    }

    pub fn is_formatted(&self) -> bool {
        matches!(self, Self::Formatted(_))
    }
}

impl fmt::Display for NormalizedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Formatted(value) => f.write_str(value),
            Self::Unparsed(_) => f.write_str(INVALID_DATE),
        }
    }
}

/// Parse a calendar date from the formats a date input or a user may produce.
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }

    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(datetime.date());
        }
    }

    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|datetime| datetime.date_naive())
}

/// Format a date as `DD-MM-YY`.
pub fn format_display_date(date: NaiveDate) -> String {
    format!(
        "{:02}-{:02}-{:02}",
        date.day(),
        date.month(),
        date.year().rem_euclid(100)
    )
}

/// Normalize a date-like string to `DD-MM-YY`.
pub fn normalize_date(value: &str) -> NormalizedDate {
    match parse_calendar_date(value) {
        Some(date) => NormalizedDate::Formatted(format_display_date(date)),
        None => NormalizedDate::Unparsed(value.to_string()),
    }
}

/// Value format of a date input (`YYYY-MM-DD`).
pub fn to_input_value(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
