//! On-disk database snapshot
//!
//! All tables plus the id sequences live in one JSON document, which is
//! replaced atomically on every commit.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::audit::ActivityLog;
use crate::models::{Artist, EntityKind, Exhibition, Setting, Tour, User};

/// Current on-disk layout version
pub const SCHEMA_VERSION: u32 = 1;

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// Every table, keyed by surrogate id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Database {
    #[serde(default = "default_schema_version")]
    pub(super) schema_version: u32,

    /// Last id handed out per entity type
    #[serde(default)]
    pub(super) sequences: BTreeMap<String, i64>,

    #[serde(default)]
    pub(super) tours: BTreeMap<i64, Tour>,

    #[serde(default)]
    pub(super) exhibitions: BTreeMap<i64, Exhibition>,

    #[serde(default)]
    pub(super) artists: BTreeMap<i64, Artist>,

    #[serde(default)]
    pub(super) settings: BTreeMap<i64, Setting>,

    #[serde(default)]
    pub(super) users: BTreeMap<i64, User>,

    #[serde(default)]
    pub(super) activity_logs: BTreeMap<i64, ActivityLog>,
}

impl Default for Database {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            sequences: BTreeMap::new(),
            tours: BTreeMap::new(),
            exhibitions: BTreeMap::new(),
            artists: BTreeMap::new(),
            settings: BTreeMap::new(),
            users: BTreeMap::new(),
            activity_logs: BTreeMap::new(),
        }
    }
}

impl Database {
    pub fn schema_version(&self) -> u32 {
        self.schema_version
    }

    /// Hand out the next id for an entity type
    ///
    /// Ids are never reused, even after the row holding one is deleted.
    pub(super) fn next_id(&mut self, kind: EntityKind) -> i64 {
        let last = self.sequences.entry(kind.name().to_string()).or_insert(0);
        *last += 1;
        *last
    }
}
