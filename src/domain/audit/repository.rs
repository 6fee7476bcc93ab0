use crate::domain::audit::cursor::AuditEntryCursor;
use crate::domain::audit::entity::{AuditAction, AuditEntry, NewAuditEntry};
use crate::domain::content::ContentKind;
use crate::domain::errors::DomainResult;
use crate::domain::tenant::TenantId;
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Default)]
pub struct AuditFilter {
    pub entity_type: Option<String>,
    pub entity_id: Option<i64>,
    pub action: Option<AuditAction>,
    pub user_id: Option<UserId>,
    pub occurred_after: Option<DateTime<Utc>>,
    pub occurred_before: Option<DateTime<Utc>>,
}

#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    /// Newest first. Returns the page and the encoded cursor of the next one.
    async fn list(
        &self,
        tenant_id: TenantId,
        filter: &AuditFilter,
        limit: u32,
        cursor: Option<AuditEntryCursor>,
    ) -> DomainResult<(Vec<AuditEntry>, Option<String>)>;
}

/// Audit writes performed inside a unit of work. There is no update method;
/// the table rejects updates as well.
#[async_trait]
pub trait AuditWriteRepository: Send {
    async fn append(&mut self, entry: NewAuditEntry) -> DomainResult<AuditEntry>;

    /// Delete entries older than `cutoff` that belong to `kind` entities that
    /// are no longer live. Returns the number of removed rows.
    async fn purge_retired_history(
        &mut self,
        tenant_id: TenantId,
        kind: ContentKind,
        cutoff: DateTime<Utc>,
    ) -> DomainResult<u64>;
}
