//! Activity log for Gallery
//!
//! Every create, update and delete committed through the storage layer is
//! recorded as an `ActivityLog` row, together with who did it and from where.
//! Session events such as logout are written explicitly.
//!
//! # Architecture
//!
//! - `ActivityLog`: a single write-once log row.
//! - `AuditContext`: the acting principal and client address of an operation.
//! - `AuditWriter`: builds rows and persists them, standalone or inside a
//!   commit in progress.
//! - `ActivityLogSubscriber`: the flush listener that writes a row for every
//!   entity in a commit.
//! - `describe`: pure helpers that turn entities and change sets into text.
//!
//! # Example
//!
//! ```rust,ignore
//! use gallery::audit::{ActivityLogSubscriber, AuditContext, Principal};
//!
//! storage.register_listener(ActivityLogSubscriber::default());
//!
//! let ctx = AuditContext::empty()
//!     .with_principal(Principal::new("admin", vec!["ROLE_ADMIN".into()]))
//!     .with_client_ip("192.168.1.20");
//!
//! let mut uow = UnitOfWork::new();
//! uow.update(tour);
//! storage.commit(uow, &ctx)?;
//! // -> UPDATE "Tour#42 | Changes: status: pending → confirmed"
//! ```

pub mod context;
pub mod describe;
pub mod entry;
pub mod subscriber;
pub mod writer;

pub use context::{AuditContext, Principal};
pub use describe::{describe_entity, format_changes, render_value, truncate, ChangeDescriber};
pub use entry::{ActivityLog, AuditAction};
pub use subscriber::ActivityLogSubscriber;
pub use writer::{AuditWriter, Persist};
