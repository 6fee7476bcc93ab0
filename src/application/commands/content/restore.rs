// src/application/commands/content/restore.rs
use super::ContentCommandService;
use crate::{
    application::{
        context::RequestContext, dto::ContentDto, error::ApplicationResult,
        services::AuditChange,
    },
    domain::{
        audit::AuditAction,
        concurrency::ConcurrencyGuard,
        content::{ContentDraft, ContentKind, ContentWrite, EntityId},
        errors::DomainError,
        locale::LocaleSet,
        redirect::RedirectPlan,
        tenant::{TenantScope, Visibility},
    },
};
use std::collections::BTreeMap;
use tracing::info;

pub struct RestoreContentCommand {
    pub kind: ContentKind,
    pub id: i64,
}

impl ContentCommandService {
    /// Bring a trashed entity back. Fails with a conflict when any of its slugs
    /// was taken by a live entity in the meantime.
    pub async fn restore(
        &self,
        ctx: &RequestContext,
        command: RestoreContentCommand,
    ) -> ApplicationResult<ContentDto> {
        let scope = self.tenants.scope(ctx.tenant_id).await?;
        let id = EntityId::new(command.id)?;

        let result = self.restore_once(ctx, &scope, command.kind, id).await;
        self.reconcile(&scope, command.kind, id, None, result).await
    }

    async fn restore_once(
        &self,
        ctx: &RequestContext,
        scope: &TenantScope,
        kind: ContentKind,
        id: EntityId,
    ) -> ApplicationResult<ContentDto> {
        let now = self.clock.now();
        let mut uow = self.uow_factory.begin().await?;
        let locales = LocaleSet::new(uow.list_locales(scope).await?)?;
        let before = uow
            .find_content(scope, kind, id, Visibility::TrashOnly)
            .await?
            .ok_or_else(|| DomainError::not_found(kind.entity_type(), id))?;

        // Locales may have changed while the entity sat in the trash.
        ContentDraft::from_entity(&before).validate(&locales)?;
        let mut write = ContentWrite::from_entity(&before, now);
        write.deleted_at = None;
        self.ensure_unique(&mut *uow, scope, kind, &write, &locales, Some(id))
            .await?;

        let expected = before.version;
        let outcome = uow.compare_and_set(scope, kind, id, expected, write).await?;
        let after = ConcurrencyGuard::settle(kind, id, expected, outcome)?;

        let plan = RedirectPlan::between(&BTreeMap::new(), &after.public_paths(&locales), &locales);
        self.redirects.apply(&mut *uow, scope, &plan, now).await?;
        self.audit
            .record(
                &mut *uow,
                ctx,
                AuditChange::new(
                    AuditAction::Restore,
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
            "content restored"
        );
        Ok(ContentDto::from_entity(&after, &locales))
    }
}
