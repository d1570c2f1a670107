//! Unit of work: pending changes and the before-commit hook
//!
//! Callers collect insertions, updates and deletions in a `UnitOfWork` and
//! hand it to `Storage::commit`. Before anything is written, the storage
//! layer turns it into a `PendingBatch` (ids assigned, per-field change sets
//! computed) and passes that batch to every registered `FlushListener`.
//! Listeners may append further insertions, which then commit atomically
//! with the rest of the batch.

use crate::audit::{ActivityLog, AuditContext};
use crate::error::GalleryResult;
use crate::models::FieldValue;

use super::record::{Record, Stored};

/// Changes collected by a caller, not yet validated against storage
#[derive(Debug, Clone, Default)]
pub struct UnitOfWork {
    pub(super) insertions: Vec<Record>,
    pub(super) updates: Vec<Record>,
    pub(super) deletions: Vec<Record>,
}

impl UnitOfWork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a new entity for insertion
    pub fn insert(&mut self, entity: impl Into<Record>) -> &mut Self {
        self.insertions.push(entity.into());
        self
    }

    /// Schedule the new state of an existing entity
    pub fn update(&mut self, entity: impl Into<Record>) -> &mut Self {
        self.updates.push(entity.into());
        self
    }

    /// Schedule an existing entity for deletion
    pub fn delete(&mut self, entity: impl Into<Record>) -> &mut Self {
        self.deletions.push(entity.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.insertions.is_empty() && self.updates.is_empty() && self.deletions.is_empty()
    }
}

/// Old and new value of one column
#[derive(Debug, Clone, PartialEq)]
pub struct FieldChange {
    field: &'static str,
    old: FieldValue,
    new: FieldValue,
}

impl FieldChange {
    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn old(&self) -> &FieldValue {
        &self.old
    }

    pub fn new(&self) -> &FieldValue {
        &self.new
    }
}

/// Ordered field-level changes of one entity
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeSet {
    changes: Vec<FieldChange>,
}

impl ChangeSet {
    /// Compare two column lists; order follows `after`
    ///
    /// A column missing from `before` counts as previously null.
    pub fn between(
        before: &[(&'static str, FieldValue)],
        after: &[(&'static str, FieldValue)],
    ) -> Self {
        let mut changes = Self::default();
        for (field, new) in after {
            let old = before
                .iter()
                .find(|(name, _)| name == field)
                .map_or(FieldValue::Null, |(_, value)| value.clone());
            if &old != new {
                changes.push(field, old, new.clone());
            }
        }
        changes
    }

    /// Append a change, keeping insertion order
    pub fn push(&mut self, field: &'static str, old: FieldValue, new: FieldValue) {
        self.changes.push(FieldChange { field, old, new });
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldChange> {
        self.changes.iter()
    }

    /// Look up the change for one field
    pub fn get(&self, field: &str) -> Option<&FieldChange> {
        self.changes.iter().find(|c| c.field == field)
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

/// An update together with what it changes
#[derive(Debug, Clone)]
pub struct PendingUpdate {
    entity: Record,
    changes: ChangeSet,
}

impl PendingUpdate {
    pub(super) fn new(entity: Record, changes: ChangeSet) -> Self {
        Self { entity, changes }
    }

    pub fn entity(&self) -> &Record {
        &self.entity
    }

    pub fn changes(&self) -> &ChangeSet {
        &self.changes
    }

    pub(super) fn into_entity(self) -> Record {
        self.entity
    }
}

/// The validated batch about to be written
#[derive(Debug, Clone, Default)]
pub struct PendingBatch {
    pub(super) insertions: Vec<Record>,
    pub(super) updates: Vec<PendingUpdate>,
    pub(super) deletions: Vec<Record>,
}

impl PendingBatch {
    /// Entities scheduled for insertion, in scheduling order
    pub fn insertions(&self) -> &[Record] {
        &self.insertions
    }

    /// Entities scheduled for update, each with its change set
    pub fn updates(&self) -> &[PendingUpdate] {
        &self.updates
    }

    /// Entities scheduled for deletion
    pub fn deletions(&self) -> &[Record] {
        &self.deletions
    }

    /// Add an insertion to the in-flight batch
    ///
    /// The entity receives its id and is written with the rest of the batch.
    pub fn schedule_insert(&mut self, entity: impl Into<Record>) {
        self.insertions.push(entity.into());
    }

    pub fn is_empty(&self) -> bool {
        self.insertions.is_empty() && self.updates.is_empty() && self.deletions.is_empty()
    }
}

/// Hook invoked once per commit, after change sets are computed and before
/// anything is written
///
/// Returning an error aborts the commit; nothing from the batch is stored.
pub trait FlushListener: Send + Sync {
    fn on_flush(&self, batch: &mut PendingBatch, ctx: &AuditContext) -> GalleryResult<()>;
}

/// What a successful commit wrote
#[derive(Debug, Clone, Default)]
pub struct CommitReport {
    pub(super) inserted: Vec<Record>,
    pub(super) updated: Vec<Record>,
    pub(super) deleted: Vec<Record>,
}

impl CommitReport {
    /// Inserted entities with their assigned ids, listener additions included
    pub fn inserted(&self) -> &[Record] {
        &self.inserted
    }

    pub fn updated(&self) -> &[Record] {
        &self.updated
    }

    pub fn deleted(&self) -> &[Record] {
        &self.deleted
    }

    /// Inserted entities of one type, in insertion order
    pub fn inserted_of<T: Stored>(&self) -> Vec<T> {
        self.inserted
            .iter()
            .cloned()
            .filter_map(T::from_record)
            .collect()
    }

    /// First inserted entity of one type
    pub fn first_inserted<T: Stored>(&self) -> Option<T> {
        self.inserted.iter().cloned().find_map(T::from_record)
    }

    /// Activity log rows written by this commit
    pub fn activity_logs(&self) -> Vec<ActivityLog> {
        self.inserted_of::<ActivityLog>()
    }

    /// Whether the commit changed anything at all
    pub fn is_empty(&self) -> bool {
        self.inserted.is_empty() && self.updated.is_empty() && self.deleted.is_empty()
    }
}
