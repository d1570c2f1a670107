//! Diagnostic logging setup
//!
//! Diagnostics go to stderr through `tracing`, leaving stdout for command
//! output. `GALLERY_LOG` takes precedence over the `-v` count.

use tracing_subscriber::EnvFilter;

use crate::error::{GalleryError, GalleryResult};

/// Environment variable holding an explicit filter directive
pub const LOG_ENV: &str = "GALLERY_LOG";

/// Default filter level for a given number of `-v` flags
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber
pub fn init(verbosity: u8) -> GalleryResult<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(format!("gallery={}", level_for(verbosity))));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| GalleryError::Config(format!("Failed to initialize logging: {}", e)))
}
