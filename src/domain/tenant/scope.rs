// src/domain/tenant/scope.rs
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::tenant::entity::Tenant;
use crate::domain::tenant::value_objects::TenantId;

/// Proof that the caller resolved an active tenant.
///
/// Every content, locale and redirect repository method takes a scope instead
/// of a raw tenant id, and the SQL layer derives its mandatory `tenant_id`
/// predicate from it. The only way to obtain one is from an active [`Tenant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TenantScope {
    tenant_id: TenantId,
}

impl TenantScope {
    pub fn for_tenant(tenant: &Tenant) -> DomainResult<Self> {
        if !tenant.active {
            return Err(DomainError::not_found("tenant", tenant.id));
        }
        Ok(Self {
            tenant_id: tenant.id,
        })
    }

    pub fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }
}

/// Soft-delete filter applied next to the tenant predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Live,
    WithTrashed,
    TrashOnly,
}
