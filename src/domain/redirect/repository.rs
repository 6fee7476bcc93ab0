use crate::domain::content::PublicPath;
use crate::domain::errors::DomainResult;
use crate::domain::redirect::entity::{NewRedirect, RedirectRecord};
use crate::domain::tenant::TenantScope;
use async_trait::async_trait;

#[async_trait]
pub trait RedirectReadRepository: Send + Sync {
    async fn find_by_path(
        &self,
        scope: &TenantScope,
        from: &PublicPath,
    ) -> DomainResult<Option<RedirectRecord>>;

    /// Ordered by id, at most `limit` rows with id greater than `after_id`.
    async fn list(
        &self,
        scope: &TenantScope,
        limit: u32,
        after_id: Option<i64>,
    ) -> DomainResult<Vec<RedirectRecord>>;
}

/// Redirect writes performed inside a unit of work.
#[async_trait]
pub trait RedirectWriteRepository: Send {
    async fn find_redirect(
        &mut self,
        scope: &TenantScope,
        from: &PublicPath,
    ) -> DomainResult<Option<RedirectRecord>>;

    async fn redirects_targeting(
        &mut self,
        scope: &TenantScope,
        to: &PublicPath,
    ) -> DomainResult<Vec<RedirectRecord>>;

    /// Insert, or update the row with the same `from_path` in place.
    async fn upsert_redirect(
        &mut self,
        scope: &TenantScope,
        redirect: NewRedirect,
    ) -> DomainResult<RedirectRecord>;

    async fn delete_redirect(
        &mut self,
        scope: &TenantScope,
        from: &PublicPath,
    ) -> DomainResult<Option<RedirectRecord>>;
}
