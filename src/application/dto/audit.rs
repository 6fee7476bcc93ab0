use crate::domain::audit::AuditEntry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::serde_time;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntryDto {
    pub id: i64,
    pub user_id: Option<i64>,
    pub action: String,
    pub entity_type: String,
    pub entity_id: i64,
    pub before: Option<Value>,
    pub after: Option<Value>,
    pub changed_fields: Vec<String>,
    #[serde(with = "serde_time")]
    pub occurred_at: DateTime<Utc>,
}

impl From<AuditEntry> for AuditEntryDto {
    fn from(entry: AuditEntry) -> Self {
        let changed_fields = entry.changed_fields();
        Self {
            id: entry.id,
            user_id: entry.user_id.map(Into::into),
            action: entry.action.as_str().to_string(),
            entity_type: entry.entity_type,
            entity_id: entry.entity_id,
            before: entry.before,
            after: entry.after,
            changed_fields,
            occurred_at: entry.occurred_at,
        }
    }
}
