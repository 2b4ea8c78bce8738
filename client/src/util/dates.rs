//! Calendar-day formatting for sprint boundaries.
//!
//! Sprint dates travel as RFC 3339 timestamps but are entered and shown as
//! `YYYY-MM-DD` days at UTC midnight.

#[cfg(test)]
#[path = "dates_test.rs"]
mod dates_test;

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

const DAY_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Format the UTC calendar day of `at` as `YYYY-MM-DD`.
pub fn format_day(at: OffsetDateTime) -> String {
    at.to_offset(time::UtcOffset::UTC)
        .date()
        .format(DAY_FORMAT)
        .unwrap_or_default()
}

/// Parse a `YYYY-MM-DD` day as UTC midnight.
pub fn parse_day(raw: &str) -> Option<OffsetDateTime> {
    Date::parse(raw.trim(), DAY_FORMAT)
        .ok()
        .map(|date| date.midnight().assume_utc())
}

/// `start → end` label for a sprint.
pub fn format_range(start: OffsetDateTime, end: OffsetDateTime) -> String {
    format!("{} → {}", format_day(start), format_day(end))
}
