// src/application/services/audit_recorder.rs
use crate::application::context::RequestContext;
use crate::application::error::ApplicationResult;
use crate::application::ports::time::Clock;
use crate::domain::audit::{AuditAction, AuditEntry, NewAuditEntry};
use crate::domain::transaction::UnitOfWork;
use serde_json::Value;
use std::sync::Arc;

/// What changed, independent of who changed it.
#[derive(Debug, Clone)]
pub struct AuditChange {
    pub action: AuditAction,
    pub entity_type: String,
    pub entity_id: i64,
    pub before: Option<Value>,
    pub after: Option<Value>,
}

impl AuditChange {
    pub fn new(
        action: AuditAction,
        entity_type: impl Into<String>,
        entity_id: i64,
        before: Option<Value>,
        after: Option<Value>,
    ) -> Self {
        Self {
            action,
            entity_type: entity_type.into(),
            entity_id,
            before,
            after,
        }
    }

    pub fn created(entity_type: impl Into<String>, entity_id: i64, after: Value) -> Self {
        Self::new(AuditAction::Create, entity_type, entity_id, None, Some(after))
    }

    pub fn updated(
        entity_type: impl Into<String>,
        entity_id: i64,
        before: Value,
        after: Value,
    ) -> Self {
        Self::new(
            AuditAction::Update,
            entity_type,
            entity_id,
            Some(before),
            Some(after),
        )
    }
}

/// Appends history rows inside the caller's unit of work. An append failure
/// is returned to the caller, whose transaction then rolls back unchanged.
pub struct AuditRecorder {
    clock: Arc<dyn Clock>,
}

impl AuditRecorder {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    pub async fn record(
        &self,
        uow: &mut dyn UnitOfWork,
        ctx: &RequestContext,
        change: AuditChange,
    ) -> ApplicationResult<AuditEntry> {
        let entry = NewAuditEntry {
            tenant_id: ctx.tenant_id,
            user_id: ctx.user_id,
            action: change.action,
            entity_type: change.entity_type,
            entity_id: change.entity_id,
            before: change.before,
            after: change.after,
            occurred_at: self.clock.now(),
        };
        Ok(uow.append(entry).await?)
    }
}
