//! Activity log queries
//!
//! Read-only access to the audit trail, newest first.

use chrono::NaiveDate;

use crate::audit::ActivityLog;
use crate::error::{GalleryError, GalleryResult};
use crate::storage::Storage;

/// Search criteria; unset fields match everything
#[derive(Debug, Clone, Default)]
pub struct LogFilter {
    /// Exact action name, case-insensitive
    pub action: Option<String>,
    /// Substring of the actor's username, case-insensitive
    pub user: Option<String>,
    /// Calendar day (UTC) the row was written
    pub date: Option<NaiveDate>,
    /// Maximum number of rows returned
    pub limit: Option<usize>,
}

impl LogFilter {
    fn matches(&self, log: &ActivityLog) -> bool {
        if let Some(action) = non_blank(&self.action) {
            if !log.action().as_str().eq_ignore_ascii_case(action) {
                return false;
            }
        }

        if let Some(user) = non_blank(&self.user) {
            let needle = user.to_lowercase();
            let found = log
                .username()
                .map_or(false, |u| u.to_lowercase().contains(&needle));
            if !found {
                return false;
            }
        }

        if let Some(day) = self.date {
            if log.created_at().date_naive() != day {
                return false;
            }
        }

        true
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Parse a `YYYY-MM-DD` date filter
pub fn parse_date(s: &str) -> GalleryResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| GalleryError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", s)))
}

/// Service for reading the activity log
pub struct ActivityLogService<'a> {
    storage: &'a Storage,
}

impl<'a> ActivityLogService<'a> {
    /// Create a new activity log service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Rows matching a filter, newest first
    pub fn search(&self, filter: &LogFilter) -> GalleryResult<Vec<ActivityLog>> {
        let mut logs = self.storage.find::<ActivityLog, _>(|l| filter.matches(l))?;
        logs.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().cmp(&a.id()))
        });
        if let Some(limit) = filter.limit {
            logs.truncate(limit);
        }
        Ok(logs)
    }

    /// Number of rows matching a filter, ignoring its limit
    pub fn count_matching(&self, filter: &LogFilter) -> GalleryResult<usize> {
        self.storage.count_where::<ActivityLog, _>(|l| filter.matches(l))
    }
}
