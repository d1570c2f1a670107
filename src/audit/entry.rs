//! Activity log entry data structures
//!
//! Defines the audited action types and the `ActivityLog` row itself.
//! Rows are write-once: fields are private, there is no setter, and only
//! `AuditWriter` builds new ones.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{Describable, Entity, EntityKind, FieldValue};

/// Types of actions recorded in the activity log
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AuditAction {
    /// Entity was created
    Create,
    /// Entity was updated
    Update,
    /// Entity was deleted
    Delete,
    /// User signed in
    Login,
    /// User signed out
    Logout,
    /// Any other action name, stored upper-cased
    Other(String),
}

impl AuditAction {
    /// Parse an action name (case-insensitive)
    pub fn parse(s: &str) -> Self {
        let upper = s.trim().to_uppercase();
        match upper.as_str() {
            "CREATE" => Self::Create,
            "UPDATE" => Self::Update,
            "DELETE" => Self::Delete,
            "LOGIN" => Self::Login,
            "LOGOUT" => Self::Logout,
            _ => Self::Other(upper),
        }
    }

    /// Stored representation
    pub fn as_str(&self) -> &str {
        match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Login => "LOGIN",
            Self::Logout => "LOGOUT",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for AuditAction {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<AuditAction> for String {
    fn from(value: AuditAction) -> Self {
        value.as_str().to_string()
    }
}

/// A single activity log row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLog {
    id: Option<i64>,
    action: AuditAction,
    #[serde(default)]
    target_data: Option<String>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    ip_address: Option<String>,
    created_at: DateTime<Utc>,
}

impl ActivityLog {
    pub(super) fn new(
        action: AuditAction,
        target_data: Option<String>,
        username: Option<String>,
        role: Option<String>,
        ip_address: Option<String>,
    ) -> Self {
        Self {
            id: None,
            action,
            target_data,
            username,
            role,
            ip_address,
            created_at: Utc::now(),
        }
    }

    /// Surrogate id, assigned on commit
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn action(&self) -> &AuditAction {
        &self.action
    }

    /// Human-readable description of what was touched
    pub fn target_data(&self) -> Option<&str> {
        self.target_data.as_deref()
    }

    /// Display identifier of the acting user
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Comma-joined roles of the acting user at the time of the action
    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    /// Client address of the originating request
    pub fn ip_address(&self) -> Option<&str> {
        self.ip_address.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} by {}",
            self.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
            self.action,
            self.username.as_deref().unwrap_or("anonymous"),
        );

        if let Some(ip) = &self.ip_address {
            output.push_str(&format!(" from {}", ip));
        }

        if let Some(target) = &self.target_data {
            output.push_str(&format!("\n  {}", target));
        }

        output
    }
}

impl Describable for ActivityLog {
    fn type_name(&self) -> &'static str {
        "ActivityLog"
    }

    fn identifier(&self) -> Option<String> {
        self.id.map(|id| id.to_string())
    }
}

impl Entity for ActivityLog {
    const KIND: EntityKind = EntityKind::ActivityLog;

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn assign_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("action", FieldValue::from(self.action.as_str())),
            ("targetData", FieldValue::from(self.target_data.clone())),
            ("username", FieldValue::from(self.username.clone())),
            ("role", FieldValue::from(self.role.clone())),
            ("ipAddress", FieldValue::from(self.ip_address.clone())),
            ("createdAt", FieldValue::from(self.created_at)),
        ]
    }
}
