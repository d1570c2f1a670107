//! Site setting model
//!
//! Key/value pairs grouped for the administration screen.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::entity::{Describable, Entity, EntityKind};
use super::value::FieldValue;

/// Group used when none is given
pub const DEFAULT_GROUP: &str = "general";

const KEY_MAX: usize = 100;

/// A single site setting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Setting {
    pub id: Option<i64>,

    /// Unique key, e.g. `opening_hours`
    pub key_name: String,

    #[serde(default)]
    pub value: Option<String>,

    pub group_name: String,

    pub is_active: bool,

    #[serde(default)]
    pub description: Option<String>,
}

impl Setting {
    /// Create an active setting in the default group
    pub fn new(key_name: impl Into<String>, value: Option<String>) -> Self {
        Self {
            id: None,
            key_name: key_name.into(),
            value,
            group_name: DEFAULT_GROUP.to_string(),
            is_active: true,
            description: None,
        }
    }

    /// Validate the setting
    pub fn validate(&self) -> Result<(), SettingValidationError> {
        let key = self.key_name.trim();
        if key.is_empty() {
            return Err(SettingValidationError::EmptyKey);
        }
        if key.chars().count() > KEY_MAX {
            return Err(SettingValidationError::KeyTooLong(key.chars().count()));
        }
        if key.chars().any(char::is_whitespace) {
            return Err(SettingValidationError::KeyContainsWhitespace(key.to_string()));
        }
        if self.group_name.trim().is_empty() {
            return Err(SettingValidationError::EmptyGroup);
        }
        Ok(())
    }
}

impl Describable for Setting {
    fn type_name(&self) -> &'static str {
        "Setting"
    }

    fn identifier(&self) -> Option<String> {
        self.id.map(|id| id.to_string())
    }
}

impl Entity for Setting {
    const KIND: EntityKind = EntityKind::Setting;

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn assign_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("keyName", FieldValue::from(&self.key_name)),
            ("value", FieldValue::from(self.value.clone())),
            ("groupName", FieldValue::from(&self.group_name)),
            ("isActive", FieldValue::from(self.is_active)),
            ("description", FieldValue::from(self.description.clone())),
        ]
    }
}

/// Validation errors for settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingValidationError {
    EmptyKey,
    KeyTooLong(usize),
    KeyContainsWhitespace(String),
    EmptyGroup,
}

impl fmt::Display for SettingValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyKey => write!(f, "Setting key cannot be empty"),
            Self::KeyTooLong(len) => {
                write!(f, "Setting key too long ({} chars, max {})", len, KEY_MAX)
            }
            Self::KeyContainsWhitespace(key) => {
                write!(f, "Setting key cannot contain whitespace: '{}'", key)
            }
            Self::EmptyGroup => write!(f, "Setting group cannot be empty"),
        }
    }
}

impl std::error::Error for SettingValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_setting_defaults() {
        let setting = Setting::new("site_name", Some("City Gallery".into()));
        assert_eq!(setting.group_name, "general");
        assert!(setting.is_active);
        assert!(setting.display_string().is_none());
    }

    #[test]
    fn test_validation() {
        let mut setting = Setting::new("site name", None);
        assert!(matches!(
            setting.validate(),
            Err(SettingValidationError::KeyContainsWhitespace(_))
        ));

        setting.key_name = "site_name".into();
        assert!(setting.validate().is_ok());

        setting.group_name = String::new();
        assert_eq!(setting.validate(), Err(SettingValidationError::EmptyGroup));
    }
}
