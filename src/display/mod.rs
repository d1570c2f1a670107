//! Display formatting for terminal output
//!
//! Provides utilities for formatting data models as plain-text tables and
//! detail views.

pub mod activity_log;
pub mod exhibition;
pub mod tour;

pub use activity_log::format_activity_log;
pub use exhibition::{format_exhibition_details, format_exhibition_list};
pub use tour::{format_tour_details, format_tour_list};

use std::fmt::Write;

use chrono::NaiveDateTime;

/// Format used when a configured timestamp format cannot be rendered
pub const FALLBACK_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Render a timestamp with a user-supplied strftime format
///
/// Invalid formats fall back to `FALLBACK_DATETIME_FORMAT` instead of
/// failing the whole listing.
pub fn format_timestamp(ts: &NaiveDateTime, format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", ts.format(format)).is_ok() {
        return out;
    }
    ts.format(FALLBACK_DATETIME_FORMAT).to_string()
}

/// Shorten a string to `max` characters for a table cell
///
/// Unlike `audit::truncate`, the value is not trimmed and blanks stay blank.
pub fn clip_column(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut cut: String = s.chars().take(max.saturating_sub(3)).collect();
        cut.push_str("...");
        cut
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn stamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 5, 3)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(&stamp(), "%d.%m.%Y"), "03.05.2025");
    }

    #[test]
    fn test_invalid_format_falls_back() {
        assert_eq!(format_timestamp(&stamp(), "%Y-%Q"), "2025-05-03 14:30");
    }

    #[test]
    fn test_clip_column() {
        assert_eq!(clip_column("short", 10), "short");
        assert_eq!(clip_column("a very long visitor name", 10), "a very ...");
        assert_eq!(clip_column("  ", 10), "  ");
    }
}
