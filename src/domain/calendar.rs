//! Date and timestamp text formats shared by the stores and the CLI.

use chrono::{DateTime, Datelike, NaiveDate, SecondsFormat, Utc};

use super::error::DomainError;

/// Format used for calendar dates (`YYYY-MM-DD`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Earliest and latest years a stored date may carry.
///
/// Inside this range `DATE_FORMAT` renders exactly four year digits, so text
/// order matches calendar order.
pub const YEAR_RANGE: std::ops::RangeInclusive<i32> = 0..=9999;

/// Parse a calendar date, naming the field on failure.
pub fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, DomainError> {
    let date =
        NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| DomainError::InvalidDate {
            field,
            value: value.to_string(),
        })?;
    check_date(field, date)
}

/// Reject dates outside [`YEAR_RANGE`].
pub fn check_date(field: &'static str, date: NaiveDate) -> Result<NaiveDate, DomainError> {
    if YEAR_RANGE.contains(&date.year()) {
        Ok(date)
    } else {
        Err(DomainError::DateOutOfRange {
            field,
            value: date.to_string(),
        })
    }
}

/// Render a date as fixed-width `YYYY-MM-DD` text for storage.
pub fn format_date(field: &'static str, date: NaiveDate) -> Result<String, DomainError> {
    Ok(check_date(field, date)?.format(DATE_FORMAT).to_string())
}

/// Render a timestamp as fixed-width RFC 3339 UTC text.
///
/// Fixed width keeps lexical order equal to chronological order, which the
/// SQLite store relies on when sorting feedback.
#[must_use]
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Current time truncated to the stored precision.
///
/// Both stores stamp records with this so a value read back compares equal
/// to the one returned from `create`.
#[must_use]
pub fn now() -> DateTime<Utc> {
    let at = Utc::now();
    DateTime::parse_from_rfc3339(&format_timestamp(at))
        .map(|parsed| parsed.with_timezone(&Utc))
        .unwrap_or(at)
}
