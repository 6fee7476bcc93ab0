// src/application/commands/content/purge.rs
use super::ContentCommandService;
use crate::{
    application::{context::RequestContext, error::ApplicationResult, services::AuditChange},
    domain::{
        audit::AuditAction,
        content::{ContentKind, EntityId},
        errors::DomainError,
        tenant::Visibility,
    },
};
use tracing::info;

pub struct PurgeContentCommand {
    pub kind: ContentKind,
    pub id: i64,
}

impl ContentCommandService {
    /// Permanently remove a trashed entity and its translations. Redirects
    /// that were created for its paths stay in place.
    pub async fn purge(
        &self,
        ctx: &RequestContext,
        command: PurgeContentCommand,
    ) -> ApplicationResult<()> {
        let scope = self.tenants.scope(ctx.tenant_id).await?;
        let kind = command.kind;
        let id = EntityId::new(command.id)?;

        let mut uow = self.uow_factory.begin().await?;
        let before = uow
            .find_content(&scope, kind, id, Visibility::WithTrashed)
            .await?
            .ok_or_else(|| DomainError::not_found(kind.entity_type(), id))?;
        if !before.is_deleted() {
            return Err(DomainError::validation(
                "id",
                format!("{kind} {id} must be deleted before it can be purged"),
            )
            .into());
        }

        if !uow.purge_content(&scope, kind, id).await? {
            return Err(DomainError::not_found(kind.entity_type(), id).into());
        }
        self.audit
            .record(
                &mut *uow,
                ctx,
                AuditChange::new(
                    AuditAction::Purge,
                    kind.entity_type(),
                    id.into(),
                    Some(before.snapshot()),
                    None,
                ),
            )
            .await?;
        uow.commit().await?;

        info!(tenant_id = %scope.tenant_id(), kind = %kind, id = %id, "content purged");
        Ok(())
    }
}
