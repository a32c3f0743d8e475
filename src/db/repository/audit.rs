//! Audit repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::AuditRecord;

/// Repository trait for the audit trail.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait AuditRepository: Send + Sync {
    /// Append an audit record, assigning its ID.
    async fn record_audit(&self, record: AuditRecord) -> RepositoryResult<AuditRecord>;

    /// Fetch the most recent audit records, newest first.
    async fn recent_audit(&self, limit: usize) -> RepositoryResult<Vec<AuditRecord>>;
}
