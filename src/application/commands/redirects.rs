// src/application/commands/redirects.rs
use crate::{
    application::{
        context::RequestContext,
        dto::RedirectDto,
        error::ApplicationResult,
        ports::time::Clock,
        services::{AuditChange, AuditRecorder, RedirectManager, TenantResolver},
    },
    domain::{
        audit::AuditAction,
        content::PublicPath,
        errors::DomainError,
        redirect::RedirectStatus,
        transaction::UnitOfWorkFactory,
    },
};
use std::sync::Arc;
use tracing::info;

pub const REDIRECT_ENTITY: &str = "redirect";

pub struct CreateRedirectCommand {
    pub from_path: String,
    pub to_path: String,
    /// One of 301, 302, 307, 308. Defaults to 301.
    pub status_code: Option<u16>,
}

/// Hand-maintained redirects. They follow the same rules as the ones written
/// on content changes: no chains, no loops.
pub struct RedirectCommandService {
    tenants: Arc<TenantResolver>,
    uow_factory: Arc<dyn UnitOfWorkFactory>,
    redirects: RedirectManager,
    audit: Arc<AuditRecorder>,
    clock: Arc<dyn Clock>,
}

impl RedirectCommandService {
    pub fn new(
        tenants: Arc<TenantResolver>,
        uow_factory: Arc<dyn UnitOfWorkFactory>,
        audit: Arc<AuditRecorder>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            tenants,
            uow_factory,
            redirects: RedirectManager::new(),
            audit,
            clock,
        }
    }

    pub async fn create_manual(
        &self,
        ctx: &RequestContext,
        command: CreateRedirectCommand,
    ) -> ApplicationResult<RedirectDto> {
        let scope = self.tenants.scope(ctx.tenant_id).await?;
        let from = PublicPath::parse(&command.from_path)?;
        let to = PublicPath::parse(&command.to_path)?;
        let status = match command.status_code {
            Some(code) => RedirectStatus::try_from(i64::from(code))?,
            None => RedirectStatus::default(),
        };
        let now = self.clock.now();

        let mut uow = self.uow_factory.begin().await?;
        let existing = uow.find_redirect(&scope, &from).await?;
        let record = self
            .redirects
            .point(&mut *uow, &scope, &from, &to, status, now)
            .await?;

        let change = match existing {
            Some(previous) => AuditChange::updated(
                REDIRECT_ENTITY,
                record.id,
                previous.snapshot(),
                record.snapshot(),
            ),
            None => AuditChange::created(REDIRECT_ENTITY, record.id, record.snapshot()),
        };
        self.audit.record(&mut *uow, ctx, change).await?;
        uow.commit().await?;

        info!(
            tenant_id = %scope.tenant_id(),
            from = %record.from_path,
            to = %record.to_path,
            status = record.status.code(),
            "redirect saved"
        );
        Ok(record.into())
    }

    pub async fn remove(&self, ctx: &RequestContext, from_path: &str) -> ApplicationResult<()> {
        let scope = self.tenants.scope(ctx.tenant_id).await?;
        let from = PublicPath::parse(from_path)?;

        let mut uow = self.uow_factory.begin().await?;
        let removed = uow
            .delete_redirect(&scope, &from)
            .await?
            .ok_or_else(|| DomainError::not_found(REDIRECT_ENTITY, &from))?;
        self.audit
            .record(
                &mut *uow,
                ctx,
                AuditChange::new(
                    AuditAction::Delete,
                    REDIRECT_ENTITY,
                    removed.id,
                    Some(removed.snapshot()),
                    None,
                ),
            )
            .await?;
        uow.commit().await?;

        info!(tenant_id = %scope.tenant_id(), from = %from, "redirect removed");
        Ok(())
    }
}
