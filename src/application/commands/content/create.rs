// src/application/commands/content/create.rs
use super::{ContentCommandService, TranslationInput};
use crate::{
    application::{
        context::RequestContext,
        dto::ContentDto,
        error::{ApplicationError, ApplicationResult},
        services::AuditChange,
    },
    domain::{
        content::{ContentDraft, ContentKind, ContentSlug, ContentStatus},
        errors::DomainError,
        locale::LocaleSet,
        redirect::RedirectPlan,
    },
};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::info;

pub struct CreateContentCommand {
    pub kind: ContentKind,
    /// Language-independent slug; derived from the default-locale title when
    /// absent.
    pub slug: Option<String>,
    pub status: ContentStatus,
    pub attributes: Map<String, Value>,
    pub translations: Vec<TranslationInput>,
}

impl CreateContentCommand {
    pub fn builder(kind: ContentKind) -> CreateContentCommandBuilder {
        CreateContentCommandBuilder {
            kind,
            slug: None,
            status: ContentStatus::Draft,
            attributes: Map::new(),
            translations: Vec::new(),
        }
    }
}

pub struct CreateContentCommandBuilder {
    kind: ContentKind,
    slug: Option<String>,
    status: ContentStatus,
    attributes: Map<String, Value>,
    translations: Vec<TranslationInput>,
}

impl CreateContentCommandBuilder {
    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn status(mut self, status: ContentStatus) -> Self {
        self.status = status;
        self
    }

    pub fn attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    pub fn translation(mut self, translation: TranslationInput) -> Self {
        self.translations.push(translation);
        self
    }

    pub fn build(self) -> CreateContentCommand {
        CreateContentCommand {
            kind: self.kind,
            slug: self.slug,
            status: self.status,
            attributes: self.attributes,
            translations: self.translations,
        }
    }
}

impl ContentCommandService {
    pub async fn create(
        &self,
        ctx: &RequestContext,
        command: CreateContentCommand,
    ) -> ApplicationResult<ContentDto> {
        let scope = &self.tenants.scope(ctx.tenant_id).await?;
        let kind = command.kind;
        let now = self.clock.now();
        let mut uow = self.uow_factory.begin().await?;
        let locales = LocaleSet::new(uow.list_locales(scope).await?)?;

        let translations = self.translation_drafts(command.translations)?;
        let slug = match command.slug {
            Some(slug) => ContentSlug::new(slug)?,
            None => {
                let default_title = translations
                    .get(&locales.default_locale().code)
                    .or_else(|| translations.values().next())
                    .map(|translation| translation.title.clone())
                    .ok_or_else(|| {
                        ApplicationError::from(DomainError::validation(
                            "slug",
                            "slug is required when no translation is given",
                        ))
                    })?;
                self.derive_slug(None, &default_title)?
            }
        };

        let draft = ContentDraft {
            kind,
            slug,
            status: command.status,
            attributes: command.attributes,
            translations,
        };
        draft.validate(&locales)?;
        let write = draft.into_write(&locales, None, now)?;
        self.ensure_unique(&mut *uow, scope, kind, &write, &locales, None)
            .await?;

        let created = uow.insert_content(scope, kind, write).await?;

        let plan =
            RedirectPlan::between(&BTreeMap::new(), &created.public_paths(&locales), &locales);
        self.redirects.apply(&mut *uow, scope, &plan, now).await?;
        self.audit
            .record(
                &mut *uow,
                ctx,
                AuditChange::created(kind.entity_type(), created.id.into(), created.snapshot()),
            )
            .await?;
        uow.commit().await?;

        info!(
            tenant_id = %scope.tenant_id(),
            kind = %kind,
            id = %created.id,
            version = %created.version,
            "content created"
        );
        Ok(ContentDto::from_entity(&created, &locales))
    }
}
