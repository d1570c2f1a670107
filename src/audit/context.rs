//! Audit context for tracking who did what, and from where
//!
//! The acting principal and the client address are passed explicitly into
//! every commit and every audit write instead of being looked up from global
//! state, so non-interactive callers simply pass an empty context.

use crate::models::User;

/// The authenticated actor behind an operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    username: String,
    roles: Vec<String>,
}

impl Principal {
    pub fn new(username: impl Into<String>, roles: Vec<String>) -> Self {
        Self {
            username: username.into(),
            roles,
        }
    }

    /// Display identifier recorded in the activity log
    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn roles(&self) -> &[String] {
        &self.roles
    }
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self::new(user.username.clone(), user.effective_roles())
    }
}

/// Per-operation context handed to the storage layer and the audit writer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditContext {
    /// Authenticated actor, if any
    pub principal: Option<Principal>,

    /// Client address of the originating request, if any
    pub client_ip: Option<String>,
}

impl AuditContext {
    /// Context with no actor and no client address
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Sets the acting principal
    #[must_use]
    pub fn with_principal(mut self, principal: Principal) -> Self {
        self.principal = Some(principal);
        self
    }

    /// Sets the client address; blank addresses are ignored
    #[must_use]
    pub fn with_client_ip(mut self, ip: impl Into<String>) -> Self {
        let ip = ip.into();
        let ip = ip.trim();
        self.client_ip = if ip.is_empty() {
            None
        } else {
            Some(ip.to_string())
        };
        self
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    pub fn client_ip(&self) -> Option<&str> {
        self.client_ip.as_deref()
    }
}
