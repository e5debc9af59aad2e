//! Calendar-date parsing shared by both loaders and the scope resolver.
//!
//! Workout exports are inconsistent about date spelling: the daily summary
//! carries ISO dates (sometimes with a time of day), the per-stroke aggregate
//! uses `MM/DD/YYYY`. Everything is reduced to a [`NaiveDate`] once, at load.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

/// Format used for `display_date` and every date the core hands back out.
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d";

/// Years below this came from a short year squeezed through `%Y`.
const MIN_FULL_YEAR: i32 = 1000;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%m/%d/%y"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
    "%m/%d/%y %H:%M:%S%.f",
    "%m/%d/%y %H:%M",
];

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// Parse a source date cell into a calendar date.
///
/// The time of day, if any, is dropped. Offsets are honoured as written: a
/// `23:30-05:00` timestamp stays on its own calendar day instead of rolling
/// over to UTC.
///
/// chrono's `%Y` also accepts one or two digits, so every candidate must land
/// on a four-digit year. Two-digit `MM/DD/YY` spellings go through `%y`
/// (`24` is 2024, `99` is 1999).
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    let full_year = |date: &NaiveDate| date.year() >= MIN_FULL_YEAR;

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local().date()).filter(full_year);
    }

    DATE_FORMATS
        .iter()
        .filter_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .chain(
            DATETIME_FORMATS
                .iter()
                .filter_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                .map(|dt| dt.date()),
        )
        .chain(
            OFFSET_FORMATS
                .iter()
                .filter_map(|fmt| DateTime::parse_from_str(value, fmt).ok())
                .map(|dt| dt.naive_local().date()),
        )
        .find(full_year)
}

/// Render a date the way records expose it (`YYYY-MM-DD`).
pub fn display_date(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}
