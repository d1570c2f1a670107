//! Exhibition model
//!
//! A curated show in the gallery's catalogue.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::entity::{Describable, Entity, EntityKind};
use super::tour::ExhibitionRef;
use super::value::FieldValue;

const TITLE_MAX: usize = 255;

/// A gallery exhibition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exhibition {
    pub id: Option<i64>,

    pub title: String,

    /// Kind of show (e.g., "painting", "sculpture")
    #[serde(rename = "type", default)]
    pub exhibition_type: Option<String>,

    /// Art-historical period covered
    #[serde(default)]
    pub period: Option<String>,

    /// Featured artists, free text
    #[serde(default)]
    pub artists: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Stored file name of the poster image
    #[serde(default)]
    pub image_path: Option<String>,

    #[serde(default)]
    pub start_date: Option<NaiveDate>,

    #[serde(default)]
    pub end_date: Option<NaiveDate>,

    /// Whether the exhibition is open to bookings
    pub is_active: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Exhibition {
    /// Create a new active exhibition
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            title: title.into(),
            exhibition_type: None,
            period: None,
            artists: None,
            description: None,
            image_path: None,
            start_date: None,
            end_date: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Open or close the exhibition for bookings
    pub fn set_active(&mut self, active: bool) {
        self.is_active = active;
        self.updated_at = Utc::now();
    }

    /// Reference used by tours that visit this exhibition
    pub fn as_ref_link(&self) -> Option<ExhibitionRef> {
        self.id.map(|id| ExhibitionRef {
            id,
            title: self.title.clone(),
        })
    }

    /// Check whether the exhibition runs on the given day
    pub fn runs_on(&self, day: NaiveDate) -> bool {
        let started = self.start_date.map_or(true, |start| start <= day);
        let not_ended = self.end_date.map_or(true, |end| day <= end);
        self.is_active && started && not_ended
    }

    /// Validate the exhibition
    pub fn validate(&self) -> Result<(), ExhibitionValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ExhibitionValidationError::EmptyTitle);
        }
        if title.chars().count() > TITLE_MAX {
            return Err(ExhibitionValidationError::TitleTooLong(title.chars().count()));
        }

        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                return Err(ExhibitionValidationError::EndsBeforeStart { start, end });
            }
        }

        Ok(())
    }
}

impl Describable for Exhibition {
    fn type_name(&self) -> &'static str {
        "Exhibition"
    }

    fn display_string(&self) -> Option<String> {
        Some(self.title.clone()).filter(|t| !t.trim().is_empty())
    }

    fn identifier(&self) -> Option<String> {
        self.id.map(|id| id.to_string())
    }
}

impl Entity for Exhibition {
    const KIND: EntityKind = EntityKind::Exhibition;

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn assign_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("title", FieldValue::from(&self.title)),
            ("type", FieldValue::from(self.exhibition_type.clone())),
            ("period", FieldValue::from(self.period.clone())),
            ("artists", FieldValue::from(self.artists.clone())),
            ("description", FieldValue::from(self.description.clone())),
            ("imagePath", FieldValue::from(self.image_path.clone())),
            ("startDate", FieldValue::from(self.start_date)),
            ("endDate", FieldValue::from(self.end_date)),
            ("isActive", FieldValue::from(self.is_active)),
            ("createdAt", FieldValue::from(self.created_at)),
            ("updatedAt", FieldValue::from(self.updated_at)),
        ]
    }
}

/// Validation errors for exhibitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExhibitionValidationError {
    EmptyTitle,
    TitleTooLong(usize),
    EndsBeforeStart { start: NaiveDate, end: NaiveDate },
}

impl fmt::Display for ExhibitionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "Exhibition title cannot be empty"),
            Self::TitleTooLong(len) => {
                write!(f, "Exhibition title too long ({} chars, max {})", len, TITLE_MAX)
            }
            Self::EndsBeforeStart { start, end } => {
                write!(f, "Exhibition ends ({}) before it starts ({})", end, start)
            }
        }
    }
}

impl std::error::Error for ExhibitionValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, d).unwrap()
    }

    #[test]
    fn test_display_string_uses_title() {
        let exhibition = Exhibition::new("Light and Shadow");
        assert_eq!(
            exhibition.display_string().as_deref(),
            Some("Light and Shadow")
        );

        let untitled = Exhibition::new("  ");
        assert!(untitled.display_string().is_none());
    }

    #[test]
    fn test_validation_date_order() {
        let mut exhibition = Exhibition::new("Light and Shadow");
        exhibition.start_date = Some(day(10));
        exhibition.end_date = Some(day(2));

        assert!(matches!(
            exhibition.validate(),
            Err(ExhibitionValidationError::EndsBeforeStart { .. })
        ));

        exhibition.end_date = Some(day(20));
        assert!(exhibition.validate().is_ok());
    }

    #[test]
    fn test_runs_on() {
        let mut exhibition = Exhibition::new("Light and Shadow");
        exhibition.start_date = Some(day(10));
        exhibition.end_date = Some(day(20));

        assert!(!exhibition.runs_on(day(9)));
        assert!(exhibition.runs_on(day(10)));
        assert!(exhibition.runs_on(day(20)));

        exhibition.set_active(false);
        assert!(!exhibition.runs_on(day(15)));
    }

    #[test]
    fn test_ref_link_requires_id() {
        let mut exhibition = Exhibition::new("Light and Shadow");
        assert!(exhibition.as_ref_link().is_none());

        exhibition.assign_id(7);
        let link = exhibition.as_ref_link().unwrap();
        assert_eq!(link.id, 7);
        assert_eq!(link.label(), "Light and Shadow");
    }
}
