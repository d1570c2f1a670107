//! Core data models for Gallery
//!
//! This module contains the museum domain: tours, exhibitions, artists,
//! site settings and user accounts, plus the field model the storage layer
//! uses to track changes.

pub mod artist;
pub mod entity;
pub mod exhibition;
pub mod setting;
pub mod tour;
pub mod user;
pub mod value;

pub use artist::Artist;
pub use entity::{Describable, Entity, EntityKind};
pub use exhibition::Exhibition;
pub use setting::Setting;
pub use tour::{ExhibitionRef, Tour, TourStatus};
pub use user::{User, ROLE_ADMIN, ROLE_USER};
pub use value::FieldValue;
