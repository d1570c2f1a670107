//! Gallery - back office for a museum and gallery
//!
//! This library provides the core functionality for the Gallery command-line
//! application: guided tour bookings, the exhibition and artist catalogue,
//! site settings and user accounts, all backed by a single JSON database with
//! an activity log that records every change.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (tours, exhibitions, artists, etc.)
//! - `storage`: JSON snapshot storage with unit-of-work commits
//! - `audit`: Activity logging hooked into every commit
//! - `crypto`: Password hashing
//! - `services`: Business logic layer
//! - `cli`: Command handlers
//! - `display`: Terminal formatting
//! - `logging`: Diagnostic output setup
//!
//! # Example
//!
//! ```rust,ignore
//! use gallery::audit::{ActivityLogSubscriber, AuditContext};
//! use gallery::config::{paths::GalleryPaths, settings::Settings};
//! use gallery::storage::Storage;
//!
//! let paths = GalleryPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mut storage = Storage::open(paths)?;
//! storage.register_listener(ActivityLogSubscriber::from_settings(&settings.audit));
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{GalleryError, GalleryResult};
