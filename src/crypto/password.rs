//! Password hashing using Argon2id
//!
//! Produces self-describing PHC strings (`$argon2id$v=19$...`) so the salt
//! and cost parameters travel with the hash.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::{GalleryError, GalleryResult};

/// Minimum accepted password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Hash a password with a fresh random salt
pub fn hash_password(password: &str) -> GalleryResult<String> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(GalleryError::Validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }

    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| GalleryError::Auth(format!("Password hashing failed: {}", e)))?;

    Ok(hash.to_string())
}

/// Check a password against a stored PHC string
///
/// A malformed stored hash is an error; a wrong password is `Ok(false)`.
pub fn verify_password(password: &str, stored_hash: &str) -> GalleryResult<bool> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| GalleryError::Auth(format!("Stored password hash is invalid: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
