// src/application/commands/content/delete.rs
use super::ContentCommandService;
use crate::{
    application::{
        context::RequestContext, dto::ContentDto, error::ApplicationResult,
        services::AuditChange,
    },
    domain::{
        audit::AuditAction,
        concurrency::ConcurrencyGuard,
        content::{ContentKind, ContentWrite, EntityId, Version},
        errors::DomainError,
        locale::LocaleSet,
        redirect::RedirectPlan,
        tenant::{TenantScope, Visibility},
    },
};
use std::collections::BTreeMap;
use tracing::info;

pub struct DeleteContentCommand {
    pub kind: ContentKind,
    pub id: i64,
    pub expected_version: i64,
}

impl ContentCommandService {
    /// Soft delete. Public paths of a published entity become 301s to the
    /// locale home pages; the row stays in the trash view.
    pub async fn soft_delete(
        &self,
        ctx: &RequestContext,
        command: DeleteContentCommand,
    ) -> ApplicationResult<ContentDto> {
        let scope = self.tenants.scope(ctx.tenant_id).await?;
        let id = EntityId::new(command.id)?;
        let expected = Version::new(command.expected_version)?;

        let result = self
            .soft_delete_once(ctx, &scope, command.kind, id, expected)
            .await;
        self.reconcile(&scope, command.kind, id, Some(expected), result)
            .await
    }

    async fn soft_delete_once(
        &self,
        ctx: &RequestContext,
        scope: &TenantScope,
        kind: ContentKind,
        id: EntityId,
        expected: Version,
    ) -> ApplicationResult<ContentDto> {
        let now = self.clock.now();
        let mut uow = self.uow_factory.begin().await?;
        let locales = LocaleSet::new(uow.list_locales(scope).await?)?;
        let before = uow
            .find_content(scope, kind, id, Visibility::Live)
            .await?
            .ok_or_else(|| DomainError::not_found(kind.entity_type(), id))?;
        ConcurrencyGuard::ensure_current(&before, expected)?;

        let mut write = ContentWrite::from_entity(&before, now);
        write.deleted_at = Some(now);
        let outcome = uow.compare_and_set(scope, kind, id, expected, write).await?;
        let after = ConcurrencyGuard::settle(kind, id, expected, outcome)?;

        let plan = RedirectPlan::between(&before.public_paths(&locales), &BTreeMap::new(), &locales);
        self.redirects.apply(&mut *uow, scope, &plan, now).await?;
        self.audit
            .record(
                &mut *uow,
                ctx,
                AuditChange::new(
                    AuditAction::Delete,
                    kind.entity_type(),
                    id.into(),
                    Some(before.snapshot()),
                    Some(after.snapshot()),
                ),
            )
            .await?;
        uow.commit().await?;

        info!(
            tenant_id = %scope.tenant_id(),
            kind = %kind,
            id = %id,
            version = %after.version,
            redirects = plan.retired.len(),
            "content moved to trash"
        );
        Ok(ContentDto::from_entity(&after, &locales))
    }
}
