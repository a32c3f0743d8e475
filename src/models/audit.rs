//! Audit trail records.
//!
//! The audit log is a side observer of successful mutations. Entries are
//! written by the service layer after the repository commit; a failure to
//! record an entry is logged and never fails the mutation it describes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::booking::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditAction {
    Create,
    Update,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditEntity {
    Booking,
    Train,
    Station,
}

/// One recorded mutation: who did what to which entity, with JSON snapshots
/// of the record before and after.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub id: Option<i64>,
    pub actor: Option<UserId>,
    pub action: AuditAction,
    pub entity: AuditEntity,
    pub entity_id: i64,
    /// JSON snapshot before the mutation; empty for creates.
    pub old_value: String,
    /// JSON snapshot after the mutation; empty for deletes.
    pub new_value: String,
    pub timestamp: DateTime<Utc>,
}

impl AuditRecord {
    pub fn new(
        actor: Option<UserId>,
        action: AuditAction,
        entity: AuditEntity,
        entity_id: i64,
        old_value: String,
        new_value: String,
    ) -> Self {
        Self {
            id: None,
            actor,
            action,
            entity,
            entity_id,
            old_value,
            new_value,
            timestamp: Utc::now(),
        }
    }

    /// Serialize a value for an audit snapshot.
    ///
    /// Serialization failures degrade to an empty snapshot rather than
    /// failing the mutation being audited.
    pub fn snapshot<T: Serialize>(value: &T) -> String {
        serde_json::to_string(value).unwrap_or_default()
    }
}
