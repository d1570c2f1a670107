//! Tour model
//!
//! A guided tour booking made by a visitor, optionally tied to an exhibition.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::entity::{Describable, Entity, EntityKind};
use super::value::FieldValue;

const NAME_MAX: usize = 120;
const EMAIL_MAX: usize = 180;
const PHONE_MAX: usize = 30;

/// Booking status of a tour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TourStatus {
    /// Waiting for staff review
    #[default]
    Pending,
    /// Accepted by staff
    Confirmed,
    /// Cancelled by staff or visitor
    Cancelled,
}

impl TourStatus {
    /// Parse a status from string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            "cancelled" | "canceled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Stored representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for TourStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Link from a tour to the exhibition it visits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExhibitionRef {
    pub id: i64,
    pub title: String,
}

impl ExhibitionRef {
    /// Title, or the id when the exhibition is untitled
    pub fn label(&self) -> String {
        if self.title.trim().is_empty() {
            self.id.to_string()
        } else {
            self.title.clone()
        }
    }
}

/// A guided tour booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tour {
    /// Surrogate id, assigned on first commit
    pub id: Option<i64>,

    /// Owning user account, if the booking was made while logged in
    #[serde(default)]
    pub user_id: Option<i64>,

    /// Visitor display name
    pub name: String,

    /// Contact email
    pub email: String,

    #[serde(default)]
    pub phone_number: Option<String>,

    /// Party size
    pub number_of_guests: u32,

    /// Requested visit date and time
    pub date: NaiveDateTime,

    #[serde(default)]
    pub notes: Option<String>,

    pub status: TourStatus,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,

    /// Exhibition this tour visits
    #[serde(default)]
    pub exhibition: Option<ExhibitionRef>,

    /// Free-text exhibition request when no listed exhibition fits
    #[serde(default)]
    pub requested_exhibition: Option<String>,
}

impl Tour {
    /// Create a new pending booking for one guest
    pub fn new(name: impl Into<String>, email: impl Into<String>, date: NaiveDateTime) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            user_id: None,
            name: name.into(),
            email: email.into(),
            phone_number: None,
            number_of_guests: 1,
            date,
            notes: None,
            status: TourStatus::Pending,
            created_at: now,
            updated_at: now,
            exhibition: None,
            requested_exhibition: None,
        }
    }

    /// Change the booking status
    pub fn set_status(&mut self, status: TourStatus) {
        self.status = status;
        self.touch();
    }

    /// Ask for an exhibition that is not in the catalogue
    ///
    /// A custom request replaces any linked exhibition.
    pub fn request_exhibition(&mut self, requested: impl Into<String>) {
        let requested = requested.into();
        if requested.trim().is_empty() {
            self.requested_exhibition = None;
        } else {
            self.requested_exhibition = Some(requested);
            self.exhibition = None;
        }
    }

    /// Bump the modification timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Validate the tour
    pub fn validate(&self) -> Result<(), TourValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(TourValidationError::EmptyName);
        }
        if name.chars().count() > NAME_MAX {
            return Err(TourValidationError::NameTooLong(name.chars().count()));
        }

        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
            return Err(TourValidationError::InvalidEmail(self.email.clone()));
        }
        if email.chars().count() > EMAIL_MAX {
            return Err(TourValidationError::EmailTooLong(email.chars().count()));
        }

        if let Some(phone) = &self.phone_number {
            if phone.chars().count() > PHONE_MAX {
                return Err(TourValidationError::PhoneTooLong(phone.chars().count()));
            }
        }

        if self.number_of_guests == 0 {
            return Err(TourValidationError::NoGuests);
        }

        Ok(())
    }
}

impl Describable for Tour {
    fn type_name(&self) -> &'static str {
        "Tour"
    }

    fn identifier(&self) -> Option<String> {
        self.id.map(|id| id.to_string())
    }
}

impl Entity for Tour {
    const KIND: EntityKind = EntityKind::Tour;

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn assign_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            (
                "user",
                self.user_id
                    .map_or(FieldValue::Null, |_| FieldValue::reference("User", None)),
            ),
            ("name", FieldValue::from(&self.name)),
            ("email", FieldValue::from(&self.email)),
            ("phoneNumber", FieldValue::from(self.phone_number.clone())),
            ("numberOfGuests", FieldValue::from(self.number_of_guests)),
            ("date", FieldValue::from(self.date)),
            ("notes", FieldValue::from(self.notes.clone())),
            ("status", FieldValue::from(self.status.as_str())),
            ("createdAt", FieldValue::from(self.created_at)),
            ("updatedAt", FieldValue::from(self.updated_at)),
            (
                "exhibition",
                self.exhibition.as_ref().map_or(FieldValue::Null, |e| {
                    FieldValue::reference("Exhibition", Some(e.label()))
                }),
            ),
            (
                "requestedExhibition",
                FieldValue::from(self.requested_exhibition.clone()),
            ),
        ]
    }
}

/// Validation errors for tours
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TourValidationError {
    EmptyName,
    NameTooLong(usize),
    InvalidEmail(String),
    EmailTooLong(usize),
    PhoneTooLong(usize),
    NoGuests,
}

impl fmt::Display for TourValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Visitor name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Visitor name too long ({} chars, max {})", len, NAME_MAX)
            }
            Self::InvalidEmail(email) => write!(f, "Invalid email address: '{}'", email),
            Self::EmailTooLong(len) => {
                write!(f, "Email too long ({} chars, max {})", len, EMAIL_MAX)
            }
            Self::PhoneTooLong(len) => {
                write!(f, "Phone number too long ({} chars, max {})", len, PHONE_MAX)
            }
            Self::NoGuests => write!(f, "Number of guests must be positive"),
        }
    }
}

impl std::error::Error for TourValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn visit_date() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_new_tour() {
        let tour = Tour::new("Jane", "jane@example.com", visit_date());
        assert_eq!(tour.status, TourStatus::Pending);
        assert_eq!(tour.number_of_guests, 1);
        assert!(tour.id.is_none());
        assert_eq!(tour.created_at, tour.updated_at);
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!(TourStatus::parse("Confirmed"), Some(TourStatus::Confirmed));
        assert_eq!(TourStatus::parse("canceled"), Some(TourStatus::Cancelled));
        assert_eq!(TourStatus::parse("done"), None);
    }

    #[test]
    fn test_validation() {
        let mut tour = Tour::new("Jane", "jane@example.com", visit_date());
        assert!(tour.validate().is_ok());

        tour.email = "not-an-email".into();
        assert!(matches!(
            tour.validate(),
            Err(TourValidationError::InvalidEmail(_))
        ));

        tour.email = "jane@example.com".into();
        tour.number_of_guests = 0;
        assert_eq!(tour.validate(), Err(TourValidationError::NoGuests));

        tour.number_of_guests = 2;
        tour.name = "a".repeat(121);
        assert!(matches!(
            tour.validate(),
            Err(TourValidationError::NameTooLong(121))
        ));
    }

    #[test]
    fn test_request_exhibition_clears_link() {
        let mut tour = Tour::new("Jane", "jane@example.com", visit_date());
        tour.exhibition = Some(ExhibitionRef {
            id: 3,
            title: "Impressions".into(),
        });

        tour.request_exhibition("Private sculpture collection");
        assert!(tour.exhibition.is_none());
        assert_eq!(
            tour.requested_exhibition.as_deref(),
            Some("Private sculpture collection")
        );
    }

    #[test]
    fn test_describable_falls_back_to_id() {
        let mut tour = Tour::new("Jane", "jane@example.com", visit_date());
        assert!(tour.display_string().is_none());
        assert!(tour.identifier().is_none());

        tour.assign_id(42);
        assert_eq!(tour.identifier().as_deref(), Some("42"));
    }

    #[test]
    fn test_fields_in_declaration_order() {
        let tour = Tour::new("Jane", "jane@example.com", visit_date());
        let names: Vec<_> = tour.fields().into_iter().map(|(name, _)| name).collect();
        assert_eq!(names.first(), Some(&"user"));
        assert_eq!(names.last(), Some(&"requestedExhibition"));
        assert!(names.contains(&"status"));
    }
}
