//! Credential handling
//!
//! Passwords are stored as Argon2id PHC strings; the plain text never
//! reaches storage or the audit trail.

pub mod password;

pub use password::{hash_password, verify_password};
