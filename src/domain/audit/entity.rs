// src/domain/audit/entity.rs
use crate::domain::audit::diff::changed_fields;
use crate::domain::errors::DomainError;
use crate::domain::tenant::TenantId;
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
    Restore,
    Purge,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Create => "create",
            AuditAction::Update => "update",
            AuditAction::Delete => "delete",
            AuditAction::Restore => "restore",
            AuditAction::Purge => "purge",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuditAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(AuditAction::Create),
            "update" => Ok(AuditAction::Update),
            "delete" => Ok(AuditAction::Delete),
            "restore" => Ok(AuditAction::Restore),
            "purge" => Ok(AuditAction::Purge),
            other => Err(DomainError::validation(
                "action",
                format!("unknown audit action `{other}`"),
            )),
        }
    }
}

/// Immutable history row. Snapshots are self-contained JSON so that entries
/// stay readable after the entity, its locales or its tenant change.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditEntry {
    pub id: i64,
    pub tenant_id: TenantId,
    pub user_id: Option<UserId>,
    pub action: AuditAction,
    pub entity_type: String,
    pub entity_id: i64,
    pub before: Option<Value>,
    pub after: Option<Value>,
    pub occurred_at: DateTime<Utc>,
}

impl AuditEntry {
    pub fn changed_fields(&self) -> Vec<String> {
        changed_fields(self.before.as_ref(), self.after.as_ref())
    }
}

#[derive(Debug, Clone)]
pub struct NewAuditEntry {
    pub tenant_id: TenantId,
    pub user_id: Option<UserId>,
    pub action: AuditAction,
    pub entity_type: String,
    pub entity_id: i64,
    pub before: Option<Value>,
    pub after: Option<Value>,
    pub occurred_at: DateTime<Utc>,
}
