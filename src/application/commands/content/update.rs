// src/application/commands/content/update.rs
use super::{ContentCommandService, TranslationInput};
use crate::{
    application::{
        context::RequestContext,
        dto::ContentDto,
        error::ApplicationResult,
        services::AuditChange,
    },
    domain::{
        concurrency::ConcurrencyGuard,
        content::{
            ContentDraft, ContentKind, ContentPatch, ContentSlug, ContentStatus, EntityId, Version,
        },
        errors::DomainError,
        locale::{LocaleCode, LocaleSet},
        redirect::RedirectPlan,
        tenant::{TenantScope, Visibility},
    },
};
use serde_json::{Map, Value};
use tracing::info;

pub struct UpdateContentCommand {
    pub kind: ContentKind,
    pub id: i64,
    /// The version the caller read. The write is rejected if it moved.
    pub expected_version: i64,
    pub slug: Option<String>,
    pub status: Option<ContentStatus>,
    pub attributes: Option<Map<String, Value>>,
    /// Added or replaced translations.
    pub translations: Vec<TranslationInput>,
    pub remove_locales: Vec<String>,
}

impl UpdateContentCommand {
    pub fn new(kind: ContentKind, id: i64, expected_version: i64) -> Self {
        Self {
            kind,
            id,
            expected_version,
            slug: None,
            status: None,
            attributes: None,
            translations: Vec::new(),
            remove_locales: Vec::new(),
        }
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn with_status(mut self, status: ContentStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_attributes(mut self, attributes: Map<String, Value>) -> Self {
        self.attributes = Some(attributes);
        self
    }

    pub fn with_translation(mut self, translation: TranslationInput) -> Self {
        self.translations.push(translation);
        self
    }

    pub fn without_locale(mut self, locale: impl Into<String>) -> Self {
        self.remove_locales.push(locale.into());
        self
    }
}

impl ContentCommandService {
    pub async fn update(
        &self,
        ctx: &RequestContext,
        command: UpdateContentCommand,
    ) -> ApplicationResult<ContentDto> {
        let scope = self.tenants.scope(ctx.tenant_id).await?;
        let kind = command.kind;
        let id = EntityId::new(command.id)?;
        let expected = Version::new(command.expected_version)?;

        let result = self.update_once(ctx, &scope, id, expected, command).await;
        self.reconcile(&scope, kind, id, Some(expected), result).await
    }

    async fn update_once(
        &self,
        ctx: &RequestContext,
        scope: &TenantScope,
        id: EntityId,
        expected: Version,
        command: UpdateContentCommand,
    ) -> ApplicationResult<ContentDto> {
        let kind = command.kind;
        let patch = self.patch_from(command)?;
        let now = self.clock.now();

        let mut uow = self.uow_factory.begin().await?;
        let locales = LocaleSet::new(uow.list_locales(scope).await?)?;
        let before = uow
            .find_content(scope, kind, id, Visibility::Live)
            .await?
            .ok_or_else(|| DomainError::not_found(kind.entity_type(), id))?;
        ConcurrencyGuard::ensure_current(&before, expected)?;

        let draft = ContentDraft::from_entity(&before).apply(patch)?;
        draft.validate(&locales)?;
        let write = draft.into_write(&locales, before.published_at, now)?;
        self.ensure_unique(&mut *uow, scope, kind, &write, &locales, Some(id))
            .await?;

        let outcome = uow.compare_and_set(scope, kind, id, expected, write).await?;
        let after = ConcurrencyGuard::settle(kind, id, expected, outcome)?;

        let plan = RedirectPlan::between(
            &before.public_paths(&locales),
            &after.public_paths(&locales),
            &locales,
        );
        self.redirects.apply(&mut *uow, scope, &plan, now).await?;
        self.audit
            .record(
                &mut *uow,
                ctx,
                AuditChange::updated(
                    kind.entity_type(),
                    id.into(),
                    before.snapshot(),
                    after.snapshot(),
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
            "content updated"
        );
        Ok(ContentDto::from_entity(&after, &locales))
    }

    fn patch_from(&self, command: UpdateContentCommand) -> ApplicationResult<ContentPatch> {
        let slug = command.slug.map(ContentSlug::new).transpose()?;
        let remove_translations = command
            .remove_locales
            .iter()
            .map(LocaleCode::new)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ContentPatch {
            slug,
            status: command.status,
            attributes: command.attributes,
            upsert_translations: self.translation_drafts(command.translations)?,
            remove_translations,
        })
    }
}
