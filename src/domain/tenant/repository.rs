use crate::domain::errors::DomainResult;
use crate::domain::tenant::entity::{NewTenant, Tenant};
use crate::domain::tenant::value_objects::{TenantId, TenantSlug};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait TenantRepository: Send + Sync {
    async fn find_by_id(&self, id: TenantId) -> DomainResult<Option<Tenant>>;
    async fn find_by_slug(&self, slug: &TenantSlug) -> DomainResult<Option<Tenant>>;
    async fn list(&self, include_inactive: bool) -> DomainResult<Vec<Tenant>>;
}

/// Tenant writes performed inside a unit of work.
#[async_trait]
pub trait TenantWriteRepository: Send {
    async fn find_tenant(&mut self, id: TenantId) -> DomainResult<Option<Tenant>>;
    async fn insert_tenant(&mut self, tenant: NewTenant) -> DomainResult<Tenant>;
    async fn set_tenant_active(
        &mut self,
        id: TenantId,
        active: bool,
        now: DateTime<Utc>,
    ) -> DomainResult<Tenant>;
}
