// src/application/queries/audit/service.rs
use std::sync::Arc;

use crate::{
    application::{error::ApplicationResult, services::TenantResolver},
    domain::audit::{AuditEntryCursor, AuditLogRepository},
};

/// Read access to the audit trail. History stays readable for deactivated
/// tenants.
pub struct AuditQueryService {
    pub(super) tenants: Arc<TenantResolver>,
    pub(super) repo: Arc<dyn AuditLogRepository>,
}

impl AuditQueryService {
    pub fn new(tenants: Arc<TenantResolver>, repo: Arc<dyn AuditLogRepository>) -> Self {
        Self { tenants, repo }
    }

    pub(super) fn decode_cursor(
        &self,
        cursor: Option<&str>,
    ) -> ApplicationResult<Option<AuditEntryCursor>> {
        match cursor {
            Some(token) => Ok(Some(AuditEntryCursor::decode(token)?)),
            None => Ok(None),
        }
    }
}
