// src/application/queries/tenants.rs
use crate::{
    application::{
        context::RequestContext,
        dto::{LocaleDto, TenantDto},
        error::ApplicationResult,
        services::TenantResolver,
    },
    domain::{
        locale::{LocaleRepository, LocaleSet},
        tenant::TenantRepository,
    },
};
use std::sync::Arc;

/// Tenant and locale registry reads.
pub struct TenantQueryService {
    tenants: Arc<TenantResolver>,
    repo: Arc<dyn TenantRepository>,
    locales: Arc<dyn LocaleRepository>,
}

impl TenantQueryService {
    pub fn new(
        tenants: Arc<TenantResolver>,
        repo: Arc<dyn TenantRepository>,
        locales: Arc<dyn LocaleRepository>,
    ) -> Self {
        Self {
            tenants,
            repo,
            locales,
        }
    }

    pub async fn list(&self, include_inactive: bool) -> ApplicationResult<Vec<TenantDto>> {
        let tenants = self.repo.list(include_inactive).await?;
        Ok(tenants.into_iter().map(TenantDto::from).collect())
    }

    /// Active tenants only.
    pub async fn get_by_slug(&self, slug: &str) -> ApplicationResult<TenantDto> {
        let (tenant, _) = self.tenants.by_slug(slug).await?;
        Ok(tenant.into())
    }

    /// Enabled locales of the calling tenant, default first.
    pub async fn locales(&self, ctx: &RequestContext) -> ApplicationResult<Vec<LocaleDto>> {
        let scope = self.tenants.scope(ctx.tenant_id).await?;
        let set = LocaleSet::new(self.locales.list_for_tenant(&scope).await?)?;
        let mut dtos: Vec<LocaleDto> = set.iter().map(LocaleDto::from).collect();
        dtos.sort_by_key(|locale| (!locale.is_default, locale.code.clone()));
        Ok(dtos)
    }
}
