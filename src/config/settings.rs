//! User settings for Gallery
//!
//! Manages application preferences: how audit values are rendered, which
//! extra fields are kept out of change summaries, and listing defaults.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use super::paths::GalleryPaths;
use crate::audit::describe::{DEFAULT_MAX_VALUE_LENGTH, MIN_VALUE_LENGTH};
use crate::error::GalleryError;

/// Audit trail rendering preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditSettings {
    /// Maximum rendered length of a single changed value
    #[serde(default = "default_max_value_length")]
    pub max_value_length: usize,

    /// Fields hidden from change summaries on top of the built-in denylist
    #[serde(default)]
    pub extra_ignored_fields: Vec<String>,
}

fn default_max_value_length() -> usize {
    DEFAULT_MAX_VALUE_LENGTH
}

impl Default for AuditSettings {
    fn default() -> Self {
        Self {
            max_value_length: default_max_value_length(),
            extra_ignored_fields: Vec::new(),
        }
    }
}

/// User settings for Gallery
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Audit trail preferences
    #[serde(default)]
    pub audit: AuditSettings,

    /// Timestamp format used in listings (strftime format)
    #[serde(default = "default_datetime_format")]
    pub datetime_format: String,

    /// Number of activity log rows shown when no limit is given
    #[serde(default = "default_log_limit")]
    pub default_log_limit: usize,

    /// Role given to users created without an explicit role
    #[serde(default = "default_user_role")]
    pub default_user_role: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_datetime_format() -> String {
    "%Y-%m-%d %H:%M".to_string()
}

fn default_log_limit() -> usize {
    50
}

fn default_user_role() -> String {
    "ROLE_USER".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            audit: AuditSettings::default(),
            datetime_format: default_datetime_format(),
            default_log_limit: default_log_limit(),
            default_user_role: default_user_role(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &GalleryPaths) -> Result<Self, GalleryError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                GalleryError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                GalleryError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings.sanitized())
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Replace values that would break rendering with usable ones
    ///
    /// An unparseable timestamp format reverts to the default; a value cap
    /// too small for the `...` marker is raised to the minimum.
    pub fn sanitized(mut self) -> Self {
        if !is_valid_datetime_format(&self.datetime_format) {
            tracing::warn!(
                format = %self.datetime_format,
                "invalid datetimeFormat in settings, using the default"
            );
            self.datetime_format = default_datetime_format();
        }

        if self.audit.max_value_length < MIN_VALUE_LENGTH {
            tracing::warn!(
                configured = self.audit.max_value_length,
                minimum = MIN_VALUE_LENGTH,
                "audit maxValueLength too small, raising it"
            );
            self.audit.max_value_length = MIN_VALUE_LENGTH;
        }

        self
    }

    /// Save settings to disk
    pub fn save(&self, paths: &GalleryPaths) -> Result<(), GalleryError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            GalleryError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            GalleryError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}

/// Check that a strftime format only uses specifiers chrono understands
pub fn is_valid_datetime_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}
