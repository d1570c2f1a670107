//! Automatic activity logging for every commit
//!
//! Registered on the storage layer as a flush listener. For each pending
//! insertion, update and deletion it writes a CREATE, UPDATE or DELETE row
//! into the same batch, so the audit trail and the data it describes commit
//! or fail together. Activity log rows themselves are never audited.

use crate::config::AuditSettings;
use crate::error::GalleryResult;
use crate::storage::{FlushListener, PendingBatch, Record};

use super::context::AuditContext;
use super::describe::{describe_entity, ChangeDescriber};
use super::entry::AuditAction;
use super::writer::{AuditWriter, Persist};

/// Flush listener that writes one activity log row per changed entity
#[derive(Debug, Clone, Default)]
pub struct ActivityLogSubscriber {
    writer: AuditWriter,
    describer: ChangeDescriber,
}

impl ActivityLogSubscriber {
    pub fn new(describer: ChangeDescriber) -> Self {
        Self {
            writer: AuditWriter::new(),
            describer,
        }
    }

    /// Subscriber using the configured value cap and extra ignored fields
    pub fn from_settings(settings: &AuditSettings) -> Self {
        Self::new(ChangeDescriber::new(
            settings.max_value_length,
            settings.extra_ignored_fields.clone(),
        ))
    }
}

fn is_audit_row(record: &Record) -> bool {
    matches!(record, Record::ActivityLog(_))
}

impl FlushListener for ActivityLogSubscriber {
    fn on_flush(&self, batch: &mut PendingBatch, ctx: &AuditContext) -> GalleryResult<()> {
        // Collect first: the batch is borrowed again for scheduling
        let mut pending: Vec<(AuditAction, String)> = Vec::new();

        for record in batch.insertions().iter().filter(|r| !is_audit_row(r)) {
            pending.push((
                AuditAction::Create,
                describe_entity(record.as_describable()),
            ));
        }

        for update in batch.updates().iter().filter(|u| !is_audit_row(u.entity())) {
            let description = format!(
                "{}{}",
                describe_entity(update.entity().as_describable()),
                self.describer.format_changes(update.changes())
            );
            pending.push((AuditAction::Update, description));
        }

        for record in batch.deletions().iter().filter(|r| !is_audit_row(r)) {
            pending.push((
                AuditAction::Delete,
                describe_entity(record.as_describable()),
            ));
        }

        for (action, description) in pending {
            tracing::debug!(action = %action, target = %description, "recording activity");
            self.writer.log(
                Persist::Deferred(&mut *batch),
                ctx,
                action,
                Some(&description),
                None,
            )?;
        }

        Ok(())
    }
}
