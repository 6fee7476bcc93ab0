// src/domain/tenant/entity.rs
use crate::domain::tenant::value_objects::{TenantId, TenantName, TenantSlug};
use chrono::{DateTime, Utc};

/// A customer organization. Tenants are deactivated, never deleted, so that
/// their audit and redirect history stays addressable.
#[derive(Debug, Clone)]
pub struct Tenant {
    pub id: TenantId,
    pub slug: TenantSlug,
    pub name: TenantName,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewTenant {
    pub slug: TenantSlug,
    pub name: TenantName,
    pub created_at: DateTime<Utc>,
}
