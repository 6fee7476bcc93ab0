// src/application/services/tenancy.rs
use crate::application::error::ApplicationResult;
use crate::domain::errors::DomainError;
use crate::domain::tenant::{Tenant, TenantId, TenantRepository, TenantScope, TenantSlug};
use std::sync::Arc;

/// Turns the tenant id carried by a request into a [`TenantScope`].
///
/// Unknown and inactive tenants both come back as `NotFound`.
pub struct TenantResolver {
    repo: Arc<dyn TenantRepository>,
}

impl TenantResolver {
    pub fn new(repo: Arc<dyn TenantRepository>) -> Self {
        Self { repo }
    }

    pub async fn scope(&self, tenant_id: TenantId) -> ApplicationResult<TenantScope> {
        let tenant = self
            .repo
            .find_by_id(tenant_id)
            .await?
            .ok_or_else(|| DomainError::not_found("tenant", tenant_id))?;
        Ok(TenantScope::for_tenant(&tenant)?)
    }

    pub async fn by_slug(&self, slug: &str) -> ApplicationResult<(Tenant, TenantScope)> {
        let not_found = || DomainError::not_found("tenant", slug);
        let slug = TenantSlug::new(slug).map_err(|_| not_found())?;
        let tenant = self
            .repo
            .find_by_slug(&slug)
            .await?
            .ok_or_else(not_found)?;
        let scope = TenantScope::for_tenant(&tenant)?;
        Ok((tenant, scope))
    }

    /// Tenant row regardless of its active flag, for history reads.
    pub async fn existing(&self, tenant_id: TenantId) -> ApplicationResult<Tenant> {
        Ok(self
            .repo
            .find_by_id(tenant_id)
            .await?
            .ok_or_else(|| DomainError::not_found("tenant", tenant_id))?)
    }
}
