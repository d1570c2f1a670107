//! Custom error types for Gallery
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for Gallery operations
#[derive(Error, Debug)]
pub enum GalleryError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Authentication and session errors
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Audit trail errors
    #[error("Audit error: {0}")]
    Audit(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl GalleryError {
    /// Create a "not found" error for tours
    pub fn tour_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Tour",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for exhibitions
    pub fn exhibition_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Exhibition",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for artists
    pub fn artist_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Artist",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for settings
    pub fn setting_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Setting",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for users
    pub fn user_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "User",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for GalleryError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for GalleryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for Gallery operations
pub type GalleryResult<T> = Result<T, GalleryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GalleryError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = GalleryError::tour_not_found("42");
        assert_eq!(err.to_string(), "Tour not found: 42");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_duplicate_error() {
        let err = GalleryError::Duplicate {
            entity_type: "Setting",
            identifier: "site_name".into(),
        };
        assert_eq!(err.to_string(), "Setting already exists: site_name");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let gallery_err: GalleryError = io_err.into();
        assert!(matches!(gallery_err, GalleryError::Io(_)));
    }
}
