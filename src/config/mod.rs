//! Configuration module for Gallery
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - Settings persistence

pub mod paths;
pub mod settings;

pub use paths::GalleryPaths;
pub use settings::{AuditSettings, Settings};
