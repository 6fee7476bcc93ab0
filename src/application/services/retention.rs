// src/application/services/retention.rs
use crate::application::error::ApplicationResult;
use crate::application::ports::time::Clock;
use crate::domain::audit::{AuditAction, NewAuditEntry};
use crate::domain::content::ContentKind;
use crate::domain::tenant::{TenantId, TenantRepository};
use crate::domain::transaction::UnitOfWorkFactory;
use chrono::{DateTime, Duration, Utc};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

pub const AUDIT_LOG_ENTITY: &str = "audit_log";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetentionReport {
    pub tenants_swept: usize,
    pub entries_removed: u64,
}

/// Deletes old history of content that no longer exists. History of live
/// entities is kept forever, and every sweep that deletes rows leaves a
/// `purge` entry behind.
pub struct AuditRetentionService {
    tenants: Arc<dyn TenantRepository>,
    uow_factory: Arc<dyn UnitOfWorkFactory>,
    clock: Arc<dyn Clock>,
    retention: Option<Duration>,
}

impl AuditRetentionService {
    pub fn new(
        tenants: Arc<dyn TenantRepository>,
        uow_factory: Arc<dyn UnitOfWorkFactory>,
        clock: Arc<dyn Clock>,
        retention: Option<Duration>,
    ) -> Self {
        Self {
            tenants,
            uow_factory,
            clock,
            retention,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.retention.is_some()
    }

    pub async fn sweep(&self) -> ApplicationResult<RetentionReport> {
        let Some(retention) = self.retention else {
            return Ok(RetentionReport::default());
        };
        let now = self.clock.now();
        let cutoff = now - retention;

        let mut report = RetentionReport::default();
        for tenant in self.tenants.list(true).await? {
            let removed = self.sweep_tenant(tenant.id, cutoff, now).await?;
            report.tenants_swept += 1;
            report.entries_removed += removed;
        }

        info!(
            cutoff = %cutoff,
            tenants = report.tenants_swept,
            removed = report.entries_removed,
            "audit retention sweep finished"
        );
        Ok(report)
    }

    async fn sweep_tenant(
        &self,
        tenant_id: TenantId,
        cutoff: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> ApplicationResult<u64> {
        let mut uow = self.uow_factory.begin().await?;
        let mut removed = 0;
        for kind in ContentKind::ALL {
            removed += uow.purge_retired_history(tenant_id, kind, cutoff).await?;
        }
        if removed == 0 {
            return Ok(0);
        }

        uow.append(NewAuditEntry {
            tenant_id,
            user_id: None,
            action: AuditAction::Purge,
            entity_type: AUDIT_LOG_ENTITY.to_string(),
            entity_id: i64::from(tenant_id),
            before: None,
            after: Some(json!({
                "cutoff": cutoff.to_rfc3339(),
                "removed": removed,
            })),
            occurred_at: now,
        })
        .await?;
        uow.commit().await?;
        Ok(removed)
    }
}
