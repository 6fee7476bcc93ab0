// src/application/queries/audit/list.rs
use super::AuditQueryService;
use crate::{
    application::{
        context::RequestContext,
        dto::{AuditEntryDto, CursorPage, normalize_limit},
        error::ApplicationResult,
    },
    domain::{
        audit::{AuditAction, AuditFilter},
        content::ContentKind,
        errors::DomainError,
        user::UserId,
    },
};
use chrono::{DateTime, Utc};

/// Newest-first audit listing. All filters are optional and combine with AND.
#[derive(Debug, Clone, Default)]
pub struct ListAuditEntriesQuery {
    pub entity_type: Option<String>,
    pub entity_id: Option<i64>,
    pub action: Option<AuditAction>,
    pub user_id: Option<i64>,
    pub occurred_after: Option<DateTime<Utc>>,
    pub occurred_before: Option<DateTime<Utc>>,
    pub limit: u32,
    pub cursor: Option<String>,
}

impl ListAuditEntriesQuery {
    /// History of one content entity.
    pub fn for_entity(kind: ContentKind, entity_id: i64) -> Self {
        Self {
            entity_type: Some(kind.entity_type().to_string()),
            entity_id: Some(entity_id),
            ..Self::default()
        }
    }

    fn filter(&self) -> ApplicationResult<AuditFilter> {
        if let (Some(after), Some(before)) = (self.occurred_after, self.occurred_before) {
            if after > before {
                return Err(DomainError::validation(
                    "occurred_after",
                    "must not be later than occurred_before",
                )
                .into());
            }
        }
        Ok(AuditFilter {
            entity_type: self.entity_type.clone(),
            entity_id: self.entity_id,
            action: self.action,
            user_id: self.user_id.map(UserId::new).transpose()?,
            occurred_after: self.occurred_after,
            occurred_before: self.occurred_before,
        })
    }
}

impl AuditQueryService {
    pub async fn list(
        &self,
        ctx: &RequestContext,
        query: ListAuditEntriesQuery,
    ) -> ApplicationResult<CursorPage<AuditEntryDto>> {
        let tenant = self.tenants.existing(ctx.tenant_id).await?;
        let filter = query.filter()?;
        let limit = normalize_limit(query.limit);
        let typed_cursor = self.decode_cursor(query.cursor.as_deref())?;

        let (items, next_cursor) = self
            .repo
            .list(tenant.id, &filter, limit, typed_cursor)
            .await?;
        let dtos: Vec<_> = items.into_iter().map(AuditEntryDto::from).collect();
        Ok(CursorPage::new(dtos, next_cursor))
    }
}
