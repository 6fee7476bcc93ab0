// src/application/context.rs
use crate::domain::tenant::TenantId;
use crate::domain::user::UserId;

/// Caller identity handed to every service method. Tenant identity always
/// travels with the call; nothing is read from ambient state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestContext {
    pub tenant_id: TenantId,
    pub user_id: Option<UserId>,
}

impl RequestContext {
    pub fn new(tenant_id: TenantId, user_id: Option<UserId>) -> Self {
        Self { tenant_id, user_id }
    }

    /// Anonymous public reader.
    pub fn public(tenant_id: TenantId) -> Self {
        Self::new(tenant_id, None)
    }

    pub fn admin(tenant_id: TenantId, user_id: UserId) -> Self {
        Self::new(tenant_id, Some(user_id))
    }
}
