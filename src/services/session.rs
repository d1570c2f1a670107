//! Login sessions
//!
//! The CLI keeps the signed-in user in `session.json`. Login and logout are
//! not entity mutations, so both write their activity log rows explicitly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::audit::{AuditAction, AuditContext, AuditWriter, Persist, Principal};
use crate::error::GalleryResult;
use crate::storage::{read_json, remove_if_exists, write_json_atomic, Storage};

use super::user::UserService;

/// The current login
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub session_id: Uuid,
    pub username: String,
    pub started_at: DateTime<Utc>,
}

/// Service for signing in and out
pub struct SessionService<'a> {
    storage: &'a Storage,
    ctx: &'a AuditContext,
}

impl<'a> SessionService<'a> {
    /// Create a new session service
    pub fn new(storage: &'a Storage, ctx: &'a AuditContext) -> Self {
        Self { storage, ctx }
    }

    /// Check credentials and start a session
    pub fn login(&self, username: &str, password: &str) -> GalleryResult<Session> {
        let user = UserService::new(self.storage, self.ctx).authenticate(username, password)?;
        let principal = Principal::from(&user);

        // The session only exists once its LOGIN row is on disk
        AuditWriter::new().log(
            Persist::Immediately(self.storage),
            self.ctx,
            AuditAction::Login,
            Some("User Login"),
            Some(&principal),
        )?;

        let session = Session {
            session_id: Uuid::new_v4(),
            username: user.username.clone(),
            started_at: Utc::now(),
        };
        write_json_atomic(self.storage.paths().session_file(), &session)?;

        tracing::info!(username = %session.username, session = %session.session_id, "signed in");
        Ok(session)
    }

    /// End the current session, if any
    ///
    /// Always records a LOGOUT row, attributed to the context's principal
    /// (or to nobody when signed out already).
    pub fn logout(&self) -> GalleryResult<Option<Session>> {
        let session = self.current()?;

        AuditWriter::new().log(
            Persist::Immediately(self.storage),
            self.ctx,
            AuditAction::Logout,
            Some("User Logout"),
            None,
        )?;

        remove_if_exists(self.storage.paths().session_file())?;
        Ok(session)
    }

    /// The stored session, if one exists
    pub fn current(&self) -> GalleryResult<Option<Session>> {
        read_json(self.storage.paths().session_file())
    }

    /// Principal for the stored session
    ///
    /// A session whose user no longer exists resolves to nobody.
    pub fn principal(&self) -> GalleryResult<Option<Principal>> {
        let Some(session) = self.current()? else {
            return Ok(None);
        };

        let user = UserService::new(self.storage, self.ctx).find_by_username(&session.username)?;
        if user.is_none() {
            tracing::warn!(username = %session.username, "session refers to a missing user");
        }
        Ok(user.as_ref().map(Principal::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{ActivityLog, ActivityLogSubscriber};
    use crate::config::paths::GalleryPaths;
    use crate::error::GalleryError;
    use crate::storage::{FlushListener, PendingBatch};
    use tempfile::TempDir;

    struct Refusing;

    impl FlushListener for Refusing {
        fn on_flush(&self, _batch: &mut PendingBatch, _ctx: &AuditContext) -> GalleryResult<()> {
            Err(GalleryError::Audit("disk full".into()))
        }
    }

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = GalleryPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::open(paths).unwrap();
        storage.register_listener(ActivityLogSubscriber::default());
        (temp_dir, storage)
    }

    fn seed_admin(storage: &Storage) {
        UserService::new(storage, &AuditContext::empty())
            .create("admin", "admin1234", vec!["ROLE_ADMIN".into()])
            .unwrap();
    }

    #[test]
    fn test_login_writes_session_and_log() {
        let (_temp_dir, storage) = create_test_storage();
        seed_admin(&storage);

        let ctx = AuditContext::empty().with_client_ip("10.1.1.1");
        let service = SessionService::new(&storage, &ctx);
        let session = service.login("admin", "admin1234").unwrap();

        assert_eq!(service.current().unwrap(), Some(session));
        let principal = service.principal().unwrap().unwrap();
        assert_eq!(principal.username(), "admin");

        let last = storage.all::<ActivityLog>().unwrap().pop().unwrap();
        assert_eq!(last.action(), &AuditAction::Login);
        assert_eq!(last.username(), Some("admin"));
        assert_eq!(last.role(), Some("ROLE_ADMIN,ROLE_USER"));
        assert_eq!(last.ip_address(), Some("10.1.1.1"));
    }

    #[test]
    fn test_failed_login_leaves_no_session() {
        let (_temp_dir, storage) = create_test_storage();
        seed_admin(&storage);

        let ctx = AuditContext::empty();
        let service = SessionService::new(&storage, &ctx);
        let result = service.login("admin", "wrong-pass");

        assert!(matches!(result, Err(GalleryError::Auth(_))));
        assert!(service.current().unwrap().is_none());
    }

    #[test]
    fn test_unrecorded_login_leaves_no_session() {
        let (_temp_dir, mut storage) = create_test_storage();
        seed_admin(&storage);
        storage.register_listener(Refusing);

        let ctx = AuditContext::empty();
        let service = SessionService::new(&storage, &ctx);
        let result = service.login("admin", "admin1234");

        assert!(matches!(result, Err(GalleryError::Audit(_))));
        assert!(service.current().unwrap().is_none());
        assert!(service.principal().unwrap().is_none());
        assert!(storage
            .all::<ActivityLog>()
            .unwrap()
            .iter()
            .all(|l| l.action() != &AuditAction::Login));
    }

    #[test]
    fn test_logout_without_principal() {
        let (_temp_dir, storage) = create_test_storage();
        let ctx = AuditContext::empty();

        let previous = SessionService::new(&storage, &ctx).logout().unwrap();
        assert!(previous.is_none());

        let logs = storage.all::<ActivityLog>().unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].action(), &AuditAction::Logout);
        assert_eq!(logs[0].target_data(), Some("User Logout"));
        assert!(logs[0].username().is_none());
    }

    #[test]
    fn test_logout_clears_session() {
        let (_temp_dir, storage) = create_test_storage();
        seed_admin(&storage);

        let anonymous = AuditContext::empty();
        SessionService::new(&storage, &anonymous)
            .login("admin", "admin1234")
            .unwrap();

        let principal = SessionService::new(&storage, &anonymous)
            .principal()
            .unwrap()
            .unwrap();
        let ctx = AuditContext::empty().with_principal(principal);
        let service = SessionService::new(&storage, &ctx);

        assert!(service.logout().unwrap().is_some());
        assert!(service.current().unwrap().is_none());

        let last = storage.all::<ActivityLog>().unwrap().pop().unwrap();
        assert_eq!(last.action(), &AuditAction::Logout);
        assert_eq!(last.username(), Some("admin"));
    }
}
