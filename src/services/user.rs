//! User service
//!
//! Account creation and password checks. Plain-text passwords never leave
//! this module; only Argon2 hashes are stored.

use crate::audit::AuditContext;
use crate::crypto::{hash_password, verify_password};
use crate::error::{GalleryError, GalleryResult};
use crate::models::User;
use crate::storage::{Storage, UnitOfWork};

/// Service for user accounts
pub struct UserService<'a> {
    storage: &'a Storage,
    ctx: &'a AuditContext,
}

impl<'a> UserService<'a> {
    /// Create a new user service
    pub fn new(storage: &'a Storage, ctx: &'a AuditContext) -> Self {
        Self { storage, ctx }
    }

    /// Create an account
    pub fn create(&self, username: &str, password: &str, roles: Vec<String>) -> GalleryResult<User> {
        let username = username.trim();
        if self.find_by_username(username)?.is_some() {
            return Err(GalleryError::Duplicate {
                entity_type: "User",
                identifier: username.to_string(),
            });
        }

        let roles = roles
            .into_iter()
            .map(|r| r.trim().to_uppercase())
            .filter(|r| !r.is_empty())
            .collect();
        let user = User::new(username, roles, hash_password(password)?);
        user.validate()
            .map_err(|e| GalleryError::Validation(e.to_string()))?;

        let mut uow = UnitOfWork::new();
        uow.insert(user);
        self.storage
            .commit(uow, self.ctx)?
            .first_inserted::<User>()
            .ok_or_else(|| GalleryError::Storage("User was not written".into()))
    }

    /// Look up an account by username (exact match)
    pub fn find_by_username(&self, username: &str) -> GalleryResult<Option<User>> {
        let username = username.trim();
        self.storage.find_one::<User, _>(|u| u.username == username)
    }

    /// List accounts by username
    pub fn list(&self) -> GalleryResult<Vec<User>> {
        let mut users = self.storage.all::<User>()?;
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    /// Replace a user's password
    pub fn change_password(&self, username: &str, new_password: &str) -> GalleryResult<User> {
        let mut user = self
            .find_by_username(username)?
            .ok_or_else(|| GalleryError::user_not_found(username.trim()))?;
        user.password = hash_password(new_password)?;

        let mut uow = UnitOfWork::new();
        uow.update(user.clone());
        self.storage.commit(uow, self.ctx)?;

        Ok(user)
    }

    /// Check credentials
    ///
    /// Unknown users and wrong passwords produce the same error.
    pub fn authenticate(&self, username: &str, password: &str) -> GalleryResult<User> {
        let invalid = || GalleryError::Auth("Invalid username or password".into());

        let user = self.find_by_username(username)?.ok_or_else(invalid)?;
        if !verify_password(password, &user.password)? {
            tracing::warn!(username = %user.username, "password check failed");
            return Err(invalid());
        }

        Ok(user)
    }
}
