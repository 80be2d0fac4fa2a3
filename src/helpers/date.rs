//! Date helper functions

use chrono::NaiveDate;

/// Format a date the way post pages show it, e.g. "January 5, 2025"
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Format a date in ISO 8601 calendar form
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// RFC 2822 timestamp at midnight UTC, as used by RSS `pubDate`
pub fn date_rfc2822(date: NaiveDate) -> String {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().to_rfc2822())
        .unwrap_or_default()
}
