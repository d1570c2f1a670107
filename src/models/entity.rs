//! Capabilities shared by every persisted entity
//!
//! `Describable` is what the audit trail needs to name an entity;
//! `Entity` is what the unit of work needs to track and diff it.

use serde::{de::DeserializeOwned, Serialize};
use std::fmt;

use super::value::FieldValue;

/// Kinds of entities the storage layer knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub enum EntityKind {
    Tour,
    Exhibition,
    Artist,
    Setting,
    User,
    ActivityLog,
}

impl EntityKind {
    /// Short type name used in descriptions and errors
    pub fn name(&self) -> &'static str {
        match self {
            Self::Tour => "Tour",
            Self::Exhibition => "Exhibition",
            Self::Artist => "Artist",
            Self::Setting => "Setting",
            Self::User => "User",
            Self::ActivityLog => "ActivityLog",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Something the audit trail can put a name on
///
/// Both accessors are optional: an entity without a natural string falls back
/// to its identifier, and one without an identifier is reported as new.
pub trait Describable {
    /// Short type name, e.g. `Tour`
    fn type_name(&self) -> &'static str;

    /// Natural string representation, if the entity has one
    fn display_string(&self) -> Option<String> {
        None
    }

    /// Identifier, once one has been assigned
    fn identifier(&self) -> Option<String> {
        None
    }
}

/// A persisted entity with a surrogate id and a tracked column list
pub trait Entity: Describable + Clone + Serialize + DeserializeOwned {
    /// Which table this entity lives in
    const KIND: EntityKind;

    /// Surrogate id, `None` until the first commit
    fn id(&self) -> Option<i64>;

    /// Set the surrogate id (called by the storage layer only)
    fn assign_id(&mut self, id: i64);

    /// Column values in declaration order
    fn fields(&self) -> Vec<(&'static str, FieldValue)>;
}
