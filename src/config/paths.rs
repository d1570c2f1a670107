//! Path management for Gallery
//!
//! Provides XDG-compliant path resolution for configuration, data, and the
//! login session.
//!
//! ## Path Resolution Order
//!
//! 1. `GALLERY_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/gallery` or `~/.config/gallery`
//! 3. Windows: `%APPDATA%\gallery`

use std::path::PathBuf;

use crate::error::GalleryError;

/// Manages all paths used by Gallery
#[derive(Debug, Clone)]
pub struct GalleryPaths {
    /// Base directory for all Gallery data
    base_dir: PathBuf,
}

impl GalleryPaths {
    /// Create a new GalleryPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, GalleryError> {
        let base_dir = if let Ok(custom) = std::env::var("GALLERY_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create GalleryPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/gallery/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (~/.config/gallery/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the database snapshot
    pub fn database_file(&self) -> PathBuf {
        self.data_dir().join("gallery.json")
    }

    /// Get the path to the current login session
    pub fn session_file(&self) -> PathBuf {
        self.base_dir.join("session.json")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), GalleryError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| GalleryError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| GalleryError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if Gallery has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, GalleryError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => {
            let home = std::env::var("HOME")
                .map_err(|_| GalleryError::Config("HOME environment variable not set".into()))?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("gallery"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, GalleryError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| GalleryError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("gallery"))
}
