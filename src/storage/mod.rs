//! Storage layer for Gallery
//!
//! Keeps the whole database in memory behind a lock and persists it as one
//! JSON snapshot. Every change goes through [`Storage::commit`], which runs
//! the registered [`FlushListener`]s against the pending batch before the
//! snapshot is written, so anything a listener schedules lands in the same
//! atomic write as the changes that triggered it.

pub mod database;
pub mod file_io;
pub mod record;
pub mod unit_of_work;

pub use database::{Database, SCHEMA_VERSION};
pub use file_io::{read_json, remove_if_exists, write_json_atomic};
pub use record::{Record, Stored};
pub use unit_of_work::{
    ChangeSet, CommitReport, FieldChange, FlushListener, PendingBatch, PendingUpdate, UnitOfWork,
};

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::audit::AuditContext;
use crate::config::paths::GalleryPaths;
use crate::error::{GalleryError, GalleryResult};
use crate::models::EntityKind;

/// Main storage coordinator
pub struct Storage {
    paths: GalleryPaths,
    db: RwLock<Database>,
    listeners: Vec<Box<dyn FlushListener>>,
}

impl Storage {
    /// Open the database under the given paths, creating directories as needed
    pub fn open(paths: GalleryPaths) -> GalleryResult<Self> {
        paths.ensure_directories()?;
        let db: Database = read_json(paths.database_file())?;

        tracing::debug!(
            path = %paths.database_file().display(),
            schema_version = db.schema_version(),
            "database loaded"
        );

        Ok(Self {
            paths,
            db: RwLock::new(db),
            listeners: Vec::new(),
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &GalleryPaths {
        &self.paths
    }

    /// Register a hook that runs inside every subsequent commit
    pub fn register_listener(&mut self, listener: impl FlushListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn read(&self) -> GalleryResult<RwLockReadGuard<'_, Database>> {
        self.db
            .read()
            .map_err(|e| GalleryError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> GalleryResult<RwLockWriteGuard<'_, Database>> {
        self.db
            .write()
            .map_err(|e| GalleryError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Get an entity by id
    pub fn get<T: Stored>(&self, id: i64) -> GalleryResult<Option<T>> {
        let db = self.read()?;
        Ok(T::table(&db).get(&id).cloned())
    }

    /// Get all entities of a type, ordered by id
    pub fn all<T: Stored>(&self) -> GalleryResult<Vec<T>> {
        let db = self.read()?;
        Ok(T::table(&db).values().cloned().collect())
    }

    /// Get all entities of a type matching a predicate, ordered by id
    pub fn find<T, F>(&self, predicate: F) -> GalleryResult<Vec<T>>
    where
        T: Stored,
        F: Fn(&T) -> bool,
    {
        let db = self.read()?;
        Ok(T::table(&db)
            .values()
            .filter(|e| predicate(e))
            .cloned()
            .collect())
    }

    /// Get the first entity of a type matching a predicate
    pub fn find_one<T, F>(&self, predicate: F) -> GalleryResult<Option<T>>
    where
        T: Stored,
        F: Fn(&T) -> bool,
    {
        let db = self.read()?;
        Ok(T::table(&db).values().find(|e| predicate(e)).cloned())
    }

    /// Count entities matching a predicate
    pub fn count_where<T, F>(&self, predicate: F) -> GalleryResult<usize>
    where
        T: Stored,
        F: Fn(&T) -> bool,
    {
        let db = self.read()?;
        Ok(T::table(&db).values().filter(|e| predicate(e)).count())
    }

    /// Validate, hook, and persist a unit of work as one atomic write
    ///
    /// 1. Pending insertions receive ids.
    /// 2. Each update is diffed against its stored row; unchanged rows drop out.
    /// 3. Every listener sees the batch and may schedule more insertions.
    /// 4. Insertions added by listeners receive ids.
    /// 5. The new snapshot is written; memory is swapped only on success.
    ///
    /// Any error leaves both the file and the in-memory state untouched.
    pub fn commit(&self, uow: UnitOfWork, ctx: &AuditContext) -> GalleryResult<CommitReport> {
        if uow.is_empty() {
            return Ok(CommitReport::default());
        }

        let mut db = self.write()?;
        let mut working = db.clone();
        let mut batch = PendingBatch::default();

        for mut record in uow.insertions {
            if let Some(id) = record.id() {
                return Err(GalleryError::Validation(format!(
                    "{}#{} is already persisted",
                    record.kind(),
                    id
                )));
            }
            record.assign_id(working.next_id(record.kind()));
            batch.insertions.push(record);
        }

        for record in uow.updates {
            let stored = stored_row(&working, &record)?;
            let changes = ChangeSet::between(&stored.fields(), &record.fields());
            if !changes.is_empty() {
                batch.updates.push(PendingUpdate::new(record, changes));
            }
        }

        for record in uow.deletions {
            let stored = stored_row(&working, &record)?;
            batch.deletions.push(stored);
        }

        if batch.is_empty() {
            tracing::debug!("nothing changed, skipping write");
            return Ok(CommitReport::default());
        }

        for listener in &self.listeners {
            listener.on_flush(&mut batch, ctx)?;
        }

        for record in batch.insertions.iter_mut() {
            if record.id().is_none() {
                record.assign_id(working.next_id(record.kind()));
            }
        }

        let report = CommitReport {
            inserted: batch.insertions.clone(),
            updated: batch
                .updates
                .iter()
                .map(|u| u.entity().clone())
                .collect(),
            deleted: batch.deletions.clone(),
        };

        for record in batch.insertions {
            working.put(record);
        }
        for update in batch.updates {
            working.put(update.into_entity());
        }
        for record in batch.deletions {
            if let Some(id) = record.id() {
                working.remove(record.kind(), id);
            }
        }

        write_json_atomic(self.paths.database_file(), &working)?;
        *db = working;

        tracing::info!(
            inserted = report.inserted().len(),
            updated = report.updated().len(),
            deleted = report.deleted().len(),
            "commit written"
        );

        Ok(report)
    }
}

/// Look up the stored row an update or deletion refers to
fn stored_row(db: &Database, record: &Record) -> GalleryResult<Record> {
    let kind = record.kind();
    if kind == EntityKind::ActivityLog {
        return Err(GalleryError::Validation(
            "Activity log entries cannot be modified or deleted".into(),
        ));
    }

    let id = record.id().ok_or_else(|| {
        GalleryError::Validation(format!("{} has not been persisted yet", kind))
    })?;

    db.stored(kind, id).ok_or_else(|| GalleryError::NotFound {
        entity_type: kind.name(),
        identifier: id.to_string(),
    })
}
