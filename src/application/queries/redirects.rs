// src/application/queries/redirects.rs
use crate::{
    application::{
        context::RequestContext,
        dto::{CursorPage, RedirectDto, RedirectTarget, normalize_limit},
        error::ApplicationResult,
        services::TenantResolver,
    },
    domain::{
        content::PublicPath,
        errors::DomainError,
        redirect::RedirectReadRepository,
        tenant::TenantId,
    },
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Answers "where did this path go?" for the router in front of the public
/// site. `None` means the path is not redirected.
#[async_trait]
pub trait RedirectLookup: Send + Sync {
    async fn resolve(
        &self,
        tenant_id: TenantId,
        path: &str,
    ) -> ApplicationResult<Option<RedirectTarget>>;
}

pub struct RedirectQueryService {
    tenants: Arc<TenantResolver>,
    repo: Arc<dyn RedirectReadRepository>,
}

impl RedirectQueryService {
    pub fn new(tenants: Arc<TenantResolver>, repo: Arc<dyn RedirectReadRepository>) -> Self {
        Self { tenants, repo }
    }

    /// Ordered by id. The cursor is the id of the last row of the previous
    /// page.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        limit: u32,
        cursor: Option<String>,
    ) -> ApplicationResult<CursorPage<RedirectDto>> {
        let scope = self.tenants.scope(ctx.tenant_id).await?;
        let limit = normalize_limit(limit);
        let after_id = cursor
            .as_deref()
            .map(|token| {
                token
                    .parse::<i64>()
                    .map_err(|_| DomainError::validation("cursor", "invalid cursor token"))
            })
            .transpose()?;

        let mut records = self.repo.list(&scope, limit + 1, after_id).await?;
        let next_cursor = if records.len() > limit as usize {
            records.truncate(limit as usize);
            records.last().map(|record| record.id.to_string())
        } else {
            None
        };
        let items = records.into_iter().map(RedirectDto::from).collect();
        Ok(CursorPage::new(items, next_cursor))
    }
}

#[async_trait]
impl RedirectLookup for RedirectQueryService {
    async fn resolve(
        &self,
        tenant_id: TenantId,
        path: &str,
    ) -> ApplicationResult<Option<RedirectTarget>> {
        let scope = self.tenants.scope(tenant_id).await?;
        // Malformed paths cannot have been stored, so they are simply not found.
        let Ok(path) = PublicPath::parse(path) else {
            debug!(tenant_id = %tenant_id, path, "unparseable path in redirect lookup");
            return Ok(None);
        };

        let record = self.repo.find_by_path(&scope, &path).await?;
        Ok(record.map(|record| RedirectTarget {
            location: record.to_path.into(),
            status_code: record.status.code(),
        }))
    }
}
