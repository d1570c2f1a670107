//! Activity log writer
//!
//! Builds `ActivityLog` rows from an action, a description and the current
//! audit context, then either commits them on their own or appends them to a
//! commit already in progress.

use crate::error::{GalleryError, GalleryResult};
use crate::storage::{PendingBatch, Storage, UnitOfWork};

use super::context::{AuditContext, Principal};
use super::entry::{ActivityLog, AuditAction};

/// How a new activity log row reaches the database
pub enum Persist<'a> {
    /// Commit the row by itself, right now
    Immediately(&'a Storage),

    /// Add the row to a batch that is about to be committed
    Deferred(&'a mut PendingBatch),
}

/// Writes activity log rows
#[derive(Debug, Clone, Copy, Default)]
pub struct AuditWriter;

impl AuditWriter {
    pub fn new() -> Self {
        Self
    }

    /// Record an action
    ///
    /// The actor is `override_actor` when given, otherwise the context's
    /// principal; with neither, username and role stay empty. Roles are
    /// stored comma-joined.
    ///
    /// With [`Persist::Immediately`] the returned row carries its id; with
    /// [`Persist::Deferred`] the id is assigned when the batch commits.
    pub fn log(
        &self,
        persist: Persist<'_>,
        ctx: &AuditContext,
        action: AuditAction,
        target_data: Option<&str>,
        override_actor: Option<&Principal>,
    ) -> GalleryResult<ActivityLog> {
        if action.as_str().trim().is_empty() {
            return Err(GalleryError::Validation(
                "Activity log action cannot be empty".into(),
            ));
        }

        let actor = override_actor.or_else(|| ctx.principal());
        let entry = ActivityLog::new(
            action,
            target_data.map(str::to_string),
            actor.map(|p| p.username().to_string()),
            actor
                .map(|p| p.roles().join(","))
                .filter(|roles| !roles.is_empty()),
            ctx.client_ip().map(str::to_string),
        );

        match persist {
            Persist::Immediately(storage) => {
                let mut uow = UnitOfWork::new();
                uow.insert(entry);
                storage
                    .commit(uow, ctx)?
                    .first_inserted::<ActivityLog>()
                    .ok_or_else(|| GalleryError::Audit("Activity log row was not written".into()))
            }
            Persist::Deferred(batch) => {
                batch.schedule_insert(entry.clone());
                Ok(entry)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::GalleryPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = GalleryPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    fn admin() -> Principal {
        Principal::new("admin", vec!["ROLE_ADMIN".into(), "ROLE_USER".into()])
    }

    #[test]
    fn test_immediate_write_uses_context() {
        let (_temp_dir, storage) = create_test_storage();
        let ctx = AuditContext::empty()
            .with_principal(admin())
            .with_client_ip("10.0.0.7");

        let entry = AuditWriter::new()
            .log(
                Persist::Immediately(&storage),
                &ctx,
                AuditAction::Login,
                Some("User Login"),
                None,
            )
            .unwrap();

        assert_eq!(entry.id(), Some(1));
        assert_eq!(entry.username(), Some("admin"));
        assert_eq!(entry.role(), Some("ROLE_ADMIN,ROLE_USER"));
        assert_eq!(entry.ip_address(), Some("10.0.0.7"));
        assert_eq!(storage.count_where::<ActivityLog, _>(|_| true).unwrap(), 1);
    }

    #[test]
    fn test_override_actor_wins() {
        let (_temp_dir, storage) = create_test_storage();
        let ctx = AuditContext::empty().with_principal(admin());
        let staff = Principal::new("staff", vec!["ROLE_USER".into()]);

        let entry = AuditWriter::new()
            .log(
                Persist::Immediately(&storage),
                &ctx,
                AuditAction::parse("export"),
                None,
                Some(&staff),
            )
            .unwrap();

        assert_eq!(entry.username(), Some("staff"));
        assert_eq!(entry.role(), Some("ROLE_USER"));
        assert_eq!(entry.action().as_str(), "EXPORT");
        assert!(entry.target_data().is_none());
    }

    #[test]
    fn test_anonymous_entry() {
        let (_temp_dir, storage) = create_test_storage();

        let entry = AuditWriter::new()
            .log(
                Persist::Immediately(&storage),
                &AuditContext::empty(),
                AuditAction::Logout,
                Some("User Logout"),
                None,
            )
            .unwrap();

        assert!(entry.username().is_none());
        assert!(entry.role().is_none());
        assert!(entry.ip_address().is_none());
    }

    #[test]
    fn test_empty_action_rejected() {
        let (_temp_dir, storage) = create_test_storage();

        let result = AuditWriter::new().log(
            Persist::Immediately(&storage),
            &AuditContext::empty(),
            AuditAction::parse("   "),
            None,
            None,
        );

        assert!(result.unwrap_err().is_validation());
        assert_eq!(storage.count_where::<ActivityLog, _>(|_| true).unwrap(), 0);
    }

    #[test]
    fn test_deferred_write_joins_batch() {
        let mut batch = PendingBatch::default();

        let entry = AuditWriter::new()
            .log(
                Persist::Deferred(&mut batch),
                &AuditContext::empty(),
                AuditAction::Create,
                Some("Artist: Berthe Morisot"),
                None,
            )
            .unwrap();

        assert!(entry.id().is_none());
        assert_eq!(batch.insertions().len(), 1);
    }
}
