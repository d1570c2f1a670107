//! Artist model

use serde::{Deserialize, Serialize};
use std::fmt;

use super::entity::{Describable, Entity, EntityKind};
use super::value::FieldValue;

const NAME_MAX: usize = 255;

/// An artist represented by the gallery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    pub id: Option<i64>,

    pub name: String,

    #[serde(default)]
    pub bio: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub website: Option<String>,

    pub is_active: bool,

    /// Stored file name of the portrait
    #[serde(default)]
    pub image_path: Option<String>,
}

impl Artist {
    /// Create a new active artist
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            bio: None,
            email: None,
            website: None,
            is_active: true,
            image_path: None,
        }
    }

    /// Validate the artist
    pub fn validate(&self) -> Result<(), ArtistValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ArtistValidationError::EmptyName);
        }
        if name.chars().count() > NAME_MAX {
            return Err(ArtistValidationError::NameTooLong(name.chars().count()));
        }
        if let Some(email) = self.email.as_deref().filter(|e| !e.trim().is_empty()) {
            if !email.contains('@') {
                return Err(ArtistValidationError::InvalidEmail(email.to_string()));
            }
        }
        Ok(())
    }
}

impl Describable for Artist {
    fn type_name(&self) -> &'static str {
        "Artist"
    }

    fn display_string(&self) -> Option<String> {
        Some(self.name.clone()).filter(|n| !n.trim().is_empty())
    }

    fn identifier(&self) -> Option<String> {
        self.id.map(|id| id.to_string())
    }
}

impl Entity for Artist {
    const KIND: EntityKind = EntityKind::Artist;

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn assign_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("name", FieldValue::from(&self.name)),
            ("bio", FieldValue::from(self.bio.clone())),
            ("email", FieldValue::from(self.email.clone())),
            ("website", FieldValue::from(self.website.clone())),
            ("isActive", FieldValue::from(self.is_active)),
            ("imagePath", FieldValue::from(self.image_path.clone())),
        ]
    }
}

/// Validation errors for artists
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtistValidationError {
    EmptyName,
    NameTooLong(usize),
    InvalidEmail(String),
}

impl fmt::Display for ArtistValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Artist name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Artist name too long ({} chars, max {})", len, NAME_MAX)
            }
            Self::InvalidEmail(email) => write!(f, "Invalid email address: '{}'", email),
        }
    }
}

impl std::error::Error for ArtistValidationError {}
