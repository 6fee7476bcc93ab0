// src/infrastructure/repositories/sqlite_audit_log.rs
use super::map_sqlx;
use crate::domain::audit::{
    AuditAction, AuditEntry, AuditEntryCursor, AuditFilter, AuditLogRepository, NewAuditEntry,
};
use crate::domain::content::ContentKind;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::tenant::TenantId;
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{FromRow, QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

const AUDIT_COLUMNS: &str =
    "id, tenant_id, user_id, action, entity_type, entity_id, before_state, after_state, occurred_at";

#[derive(Clone)]
pub struct SqliteAuditLogRepository {
    pool: SqlitePool,
}

impl SqliteAuditLogRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AuditRow {
    id: i64,
    tenant_id: i64,
    user_id: Option<i64>,
    action: String,
    entity_type: String,
    entity_id: i64,
    before_state: Option<String>,
    after_state: Option<String>,
    occurred_at: DateTime<Utc>,
}

impl TryFrom<AuditRow> for AuditEntry {
    type Error = DomainError;

    fn try_from(row: AuditRow) -> Result<Self, Self::Error> {
        Ok(AuditEntry {
            id: row.id,
            tenant_id: TenantId::new(row.tenant_id)?,
            user_id: row.user_id.map(UserId::new).transpose()?,
            action: row.action.parse::<AuditAction>()?,
            entity_type: row.entity_type,
            entity_id: row.entity_id,
            before: decode_snapshot(row.before_state)?,
            after: decode_snapshot(row.after_state)?,
            occurred_at: row.occurred_at,
        })
    }
}

fn decode_snapshot(raw: Option<String>) -> DomainResult<Option<Value>> {
    raw.map(|raw| {
        serde_json::from_str(&raw)
            .map_err(|err| DomainError::Persistence(format!("corrupt audit snapshot: {err}")))
    })
    .transpose()
}

fn encode_snapshot(value: Option<&Value>) -> Option<String> {
    value.map(Value::to_string)
}

fn apply_filter<'a>(builder: &mut QueryBuilder<'a, Sqlite>, filter: &'a AuditFilter) {
    if let Some(entity_type) = filter.entity_type.as_deref() {
        builder.push(" AND entity_type = ");
        builder.push_bind(entity_type);
    }
    if let Some(entity_id) = filter.entity_id {
        builder.push(" AND entity_id = ");
        builder.push_bind(entity_id);
    }
    if let Some(action) = filter.action {
        builder.push(" AND action = ");
        builder.push_bind(action.as_str());
    }
    if let Some(user_id) = filter.user_id {
        builder.push(" AND user_id = ");
        builder.push_bind(i64::from(user_id));
    }
    if let Some(after) = filter.occurred_after {
        builder.push(" AND occurred_at >= ");
        builder.push_bind(after);
    }
    if let Some(before) = filter.occurred_before {
        builder.push(" AND occurred_at < ");
        builder.push_bind(before);
    }
}

pub(super) async fn append(
    conn: &mut SqliteConnection,
    entry: NewAuditEntry,
) -> DomainResult<AuditEntry> {
    let row = sqlx::query_as::<_, AuditRow>(&format!(
        "INSERT INTO audit_entries (tenant_id, user_id, action, entity_type, entity_id, before_state, after_state, occurred_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?) RETURNING {AUDIT_COLUMNS}"
    ))
    .bind(i64::from(entry.tenant_id))
    .bind(entry.user_id.map(i64::from))
    .bind(entry.action.as_str())
    .bind(entry.entity_type.as_str())
    .bind(entry.entity_id)
    .bind(encode_snapshot(entry.before.as_ref()))
    .bind(encode_snapshot(entry.after.as_ref()))
    .bind(entry.occurred_at)
    .fetch_one(&mut *conn)
    .await
    .map_err(map_sqlx)?;

    AuditEntry::try_from(row)
}

/// History of entities that are soft-deleted or gone. Rows of live entities
/// are kept regardless of age.
pub(super) async fn purge_retired_history(
    conn: &mut SqliteConnection,
    tenant_id: TenantId,
    kind: ContentKind,
    cutoff: DateTime<Utc>,
) -> DomainResult<u64> {
    let table = kind.descriptor().table;
    let result = sqlx::query(&format!(
        "DELETE FROM audit_entries WHERE tenant_id = ? AND entity_type = ? AND occurred_at < ? \
         AND entity_id NOT IN (SELECT id FROM {table} WHERE tenant_id = ? AND deleted_at IS NULL)"
    ))
    .bind(i64::from(tenant_id))
    .bind(kind.entity_type())
    .bind(cutoff)
    .bind(i64::from(tenant_id))
    .execute(&mut *conn)
    .await
    .map_err(map_sqlx)?;

    Ok(result.rows_affected())
}

#[async_trait]
impl AuditLogRepository for SqliteAuditLogRepository {
    async fn list(
        &self,
        tenant_id: TenantId,
        filter: &AuditFilter,
        limit: u32,
        cursor: Option<AuditEntryCursor>,
    ) -> DomainResult<(Vec<AuditEntry>, Option<String>)> {
        let limit = limit.clamp(1, 100);
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "SELECT {AUDIT_COLUMNS} FROM audit_entries WHERE tenant_id = "
        ));
        builder.push_bind(i64::from(tenant_id));
        apply_filter(&mut builder, filter);
        if let Some(cursor) = &cursor {
            builder.push(" AND (occurred_at, id) < (");
            builder.push_bind(cursor.occurred_at);
            builder.push(", ");
            builder.push_bind(cursor.id);
            builder.push(")");
        }
        builder.push(" ORDER BY occurred_at DESC, id DESC LIMIT ");
        builder.push_bind(i64::from(limit) + 1);

        let rows = builder
            .build_query_as::<AuditRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let mut entries = rows
            .into_iter()
            .map(AuditEntry::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let mut next_cursor = None;
        if entries.len() > limit as usize {
            entries.pop();
            if let Some(last) = entries.last() {
                next_cursor = Some(AuditEntryCursor::new(last.occurred_at, last.id).encode());
            }
        }
        Ok((entries, next_cursor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rows_decode_snapshots_and_actions() {
        let entry = AuditEntry::try_from(AuditRow {
            id: 9,
            tenant_id: 1,
            user_id: Some(4),
            action: "update".into(),
            entity_type: "article".into(),
            entity_id: 12,
            before_state: Some(r#"{"status":"draft"}"#.into()),
            after_state: Some(r#"{"status":"published"}"#.into()),
            occurred_at: Utc::now(),
        })
        .unwrap();

        assert_eq!(entry.action, AuditAction::Update);
        assert_eq!(entry.after, Some(json!({ "status": "published" })));
        assert_eq!(entry.changed_fields(), vec!["status".to_string()]);
    }

    #[test]
    fn missing_snapshot_stays_none() {
        assert_eq!(decode_snapshot(None).unwrap(), None);
        assert!(decode_snapshot(Some("{".into())).is_err());
    }
}
