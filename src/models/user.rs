//! User account model
//!
//! Staff and visitor accounts. The password column holds an Argon2 PHC
//! string and is never rendered in change summaries.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::entity::{Describable, Entity, EntityKind};
use super::value::FieldValue;

/// Role every authenticated user holds
pub const ROLE_USER: &str = "ROLE_USER";

/// Role required for administration commands
pub const ROLE_ADMIN: &str = "ROLE_ADMIN";

const USERNAME_MAX: usize = 180;

/// A login account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Option<i64>,

    /// Unique login name
    pub username: String,

    /// Granted roles, e.g. `ROLE_ADMIN`
    #[serde(default)]
    pub roles: Vec<String>,

    /// Argon2 password hash
    pub password: String,
}

impl User {
    /// Create a user from an already hashed password
    pub fn new(username: impl Into<String>, roles: Vec<String>, password_hash: String) -> Self {
        Self {
            id: None,
            username: username.into(),
            roles,
            password: password_hash,
        }
    }

    /// Granted roles plus the implicit `ROLE_USER`, deduplicated
    pub fn effective_roles(&self) -> Vec<String> {
        let mut roles: Vec<String> = Vec::with_capacity(self.roles.len() + 1);
        for role in self.roles.iter().map(|r| r.trim().to_uppercase()) {
            if !role.is_empty() && !roles.contains(&role) {
                roles.push(role);
            }
        }
        if !roles.iter().any(|r| r == ROLE_USER) {
            roles.push(ROLE_USER.to_string());
        }
        roles
    }

    /// Validate the user
    pub fn validate(&self) -> Result<(), UserValidationError> {
        let username = self.username.trim();
        if username.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if username.chars().count() > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong(username.chars().count()));
        }
        if self.password.is_empty() {
            return Err(UserValidationError::MissingPassword);
        }
        Ok(())
    }
}

impl Describable for User {
    fn type_name(&self) -> &'static str {
        "User"
    }

    fn display_string(&self) -> Option<String> {
        Some(self.username.clone()).filter(|u| !u.trim().is_empty())
    }

    fn identifier(&self) -> Option<String> {
        self.id.map(|id| id.to_string())
    }
}

impl Entity for User {
    const KIND: EntityKind = EntityKind::User;

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn assign_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("username", FieldValue::from(&self.username)),
            ("roles", FieldValue::from(self.roles.clone())),
            ("password", FieldValue::from(&self.password)),
        ]
    }
}

/// Validation errors for users
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyUsername,
    UsernameTooLong(usize),
    MissingPassword,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "Username cannot be empty"),
            Self::UsernameTooLong(len) => {
                write!(f, "Username too long ({} chars, max {})", len, USERNAME_MAX)
            }
            Self::MissingPassword => write!(f, "Password is required"),
        }
    }
}

impl std::error::Error for UserValidationError {}
