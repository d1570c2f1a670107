//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod artist;
pub mod exhibition;
pub mod log;
pub mod setting;
pub mod tour;
pub mod user;

pub use artist::{handle_artist_command, ArtistCommands};
pub use exhibition::{handle_exhibition_command, ExhibitionCommands};
pub use log::{handle_log_command, LogCommands};
pub use setting::{handle_setting_command, SettingCommands};
pub use tour::{handle_tour_command, TourCommands};
pub use user::{handle_login, handle_logout, handle_user_command, handle_whoami, UserCommands};

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{GalleryError, GalleryResult};

const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

/// Parse a date and time as typed on the command line
///
/// A bare date means midnight.
pub fn parse_datetime(s: &str) -> GalleryResult<NaiveDateTime> {
    let s = s.trim();
    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(parsed);
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| {
            GalleryError::Validation(format!(
                "Invalid date '{}', expected YYYY-MM-DD HH:MM",
                s
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_datetime_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 5, 3)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap();
        assert_eq!(parse_datetime("2025-05-03 14:30").unwrap(), expected);
        assert_eq!(parse_datetime("2025-05-03T14:30").unwrap(), expected);
        assert_eq!(parse_datetime(" 2025-05-03 14:30:00 ").unwrap(), expected);
    }

    #[test]
    fn test_parse_bare_date() {
        let parsed = parse_datetime("2025-05-03").unwrap();
        assert_eq!(parsed.format("%H:%M").to_string(), "00:00");
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse_datetime("tomorrow").unwrap_err().is_validation());
    }
}
