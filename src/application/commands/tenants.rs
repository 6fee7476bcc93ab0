// src/application/commands/tenants.rs
use crate::{
    application::{
        context::RequestContext,
        dto::{
            TenantDto,
            tenants::{locale_snapshot, tenant_snapshot},
        },
        error::ApplicationResult,
        ports::time::Clock,
        services::{AuditChange, AuditRecorder},
    },
    domain::{
        errors::DomainError,
        locale::{LocaleCode, NewLocale},
        tenant::{NewTenant, TenantId, TenantName, TenantScope, TenantSlug},
        transaction::UnitOfWorkFactory,
        user::UserId,
    },
};
use std::sync::Arc;
use tracing::info;

pub struct CreateTenantCommand {
    pub slug: String,
    pub name: String,
    pub default_locale: String,
}

pub struct TenantCommandService {
    uow_factory: Arc<dyn UnitOfWorkFactory>,
    audit: Arc<AuditRecorder>,
    clock: Arc<dyn Clock>,
}

impl TenantCommandService {
    pub fn new(
        uow_factory: Arc<dyn UnitOfWorkFactory>,
        audit: Arc<AuditRecorder>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            uow_factory,
            audit,
            clock,
        }
    }

    /// Create a tenant together with its default locale.
    pub async fn create(
        &self,
        actor: Option<UserId>,
        command: CreateTenantCommand,
    ) -> ApplicationResult<TenantDto> {
        let slug = TenantSlug::new(command.slug)?;
        let name = TenantName::new(command.name)?;
        let code = LocaleCode::new(&command.default_locale)?;
        let now = self.clock.now();

        let mut uow = self.uow_factory.begin().await?;
        let tenant = uow
            .insert_tenant(NewTenant {
                slug,
                name,
                created_at: now,
            })
            .await?;
        let scope = TenantScope::for_tenant(&tenant)?;
        let locale = uow
            .insert_locale(
                &scope,
                NewLocale {
                    code,
                    is_default: true,
                    created_at: now,
                },
            )
            .await?;

        let ctx = RequestContext::new(tenant.id, actor);
        self.audit
            .record(
                &mut *uow,
                &ctx,
                AuditChange::created("tenant", tenant.id.into(), tenant_snapshot(&tenant)),
            )
            .await?;
        self.audit
            .record(
                &mut *uow,
                &ctx,
                AuditChange::created("locale", locale.id.into(), locale_snapshot(&locale)),
            )
            .await?;
        uow.commit().await?;

        info!(tenant_id = %tenant.id, slug = %tenant.slug, locale = %locale.code, "tenant created");
        Ok(tenant.into())
    }

    pub async fn deactivate(
        &self,
        actor: Option<UserId>,
        tenant_id: i64,
    ) -> ApplicationResult<TenantDto> {
        self.set_active(actor, tenant_id, false).await
    }

    pub async fn activate(
        &self,
        actor: Option<UserId>,
        tenant_id: i64,
    ) -> ApplicationResult<TenantDto> {
        self.set_active(actor, tenant_id, true).await
    }

    async fn set_active(
        &self,
        actor: Option<UserId>,
        tenant_id: i64,
        active: bool,
    ) -> ApplicationResult<TenantDto> {
        let tenant_id = TenantId::new(tenant_id)?;
        let now = self.clock.now();

        let mut uow = self.uow_factory.begin().await?;
        let before = uow
            .find_tenant(tenant_id)
            .await?
            .ok_or_else(|| DomainError::not_found("tenant", tenant_id))?;
        if before.active == active {
            return Ok(before.into());
        }

        let after = uow.set_tenant_active(tenant_id, active, now).await?;
        let ctx = RequestContext::new(tenant_id, actor);
        self.audit
            .record(
                &mut *uow,
                &ctx,
                AuditChange::updated(
                    "tenant",
                    tenant_id.into(),
                    tenant_snapshot(&before),
                    tenant_snapshot(&after),
                ),
            )
            .await?;
        uow.commit().await?;

        info!(tenant_id = %tenant_id, active, "tenant status changed");
        Ok(after.into())
    }
}
