// src/application/commands/content/service.rs
use crate::application::{
    error::{ApplicationError, ApplicationResult},
    ports::{time::Clock, util::SlugGenerator},
    services::{AuditRecorder, RedirectManager, TenantResolver},
};
use crate::domain::concurrency::ConcurrencyGuard;
use crate::domain::content::{
    ContentKind, ContentReadRepository, ContentSlug, ContentWrite, EntityId, TranslationDraft,
    Version,
};
use crate::domain::errors::DomainError;
use crate::domain::locale::{LocaleCode, LocaleSet};
use crate::domain::tenant::TenantScope;
use crate::domain::transaction::{UnitOfWork, UnitOfWorkFactory};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::warn;

/// One language of a create or update payload. A missing slug is derived
/// from the title.
#[derive(Debug, Clone)]
pub struct TranslationInput {
    pub locale: String,
    pub slug: Option<String>,
    pub title: String,
    pub fields: BTreeMap<String, String>,
}

impl TranslationInput {
    pub fn new(locale: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            slug: None,
            title: title.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }
}

/// Write side of the generic content store. Every method runs in a single
/// unit of work: entity row, translations, redirects and the audit entry
/// commit or roll back together.
pub struct ContentCommandService {
    pub(super) tenants: Arc<TenantResolver>,
    pub(super) uow_factory: Arc<dyn UnitOfWorkFactory>,
    pub(super) reader: Arc<dyn ContentReadRepository>,
    pub(super) redirects: RedirectManager,
    pub(super) audit: Arc<AuditRecorder>,
    pub(super) clock: Arc<dyn Clock>,
    pub(super) slugger: Arc<dyn SlugGenerator>,
}

impl ContentCommandService {
    pub fn new(
        tenants: Arc<TenantResolver>,
        uow_factory: Arc<dyn UnitOfWorkFactory>,
        reader: Arc<dyn ContentReadRepository>,
        audit: Arc<AuditRecorder>,
        clock: Arc<dyn Clock>,
        slugger: Arc<dyn SlugGenerator>,
    ) -> Self {
        Self {
            tenants,
            uow_factory,
            reader,
            redirects: RedirectManager::new(),
            audit,
            clock,
            slugger,
        }
    }

    pub(super) fn derive_slug(
        &self,
        explicit: Option<String>,
        title: &str,
    ) -> ApplicationResult<ContentSlug> {
        let raw = explicit.unwrap_or_else(|| self.slugger.slugify(title));
        Ok(ContentSlug::new(raw)?)
    }

    pub(super) fn translation_drafts(
        &self,
        inputs: Vec<TranslationInput>,
    ) -> ApplicationResult<BTreeMap<LocaleCode, TranslationDraft>> {
        let mut drafts = BTreeMap::new();
        for input in inputs {
            let code = LocaleCode::new(&input.locale)?;
            let slug = self.derive_slug(input.slug, &input.title)?;
            let draft = TranslationDraft {
                slug,
                title: input.title,
                fields: input.fields,
            };
            if drafts.insert(code.clone(), draft).is_some() {
                return Err(DomainError::validation(
                    format!("translations.{code}"),
                    "locale appears more than once",
                )
                .into());
            }
        }
        Ok(drafts)
    }

    /// Slug checks against other live entities of the same kind. The partial
    /// unique indexes enforce the same rules; checking first yields errors
    /// that name the offending field.
    pub(super) async fn ensure_unique(
        &self,
        uow: &mut dyn UnitOfWork,
        scope: &TenantScope,
        kind: ContentKind,
        write: &ContentWrite,
        locales: &LocaleSet,
        exclude: Option<EntityId>,
    ) -> ApplicationResult<()> {
        let entity_type = kind.entity_type();
        if let Some(owner) = uow
            .entity_slug_owner(scope, kind, &write.slug, exclude)
            .await?
        {
            return Err(DomainError::conflict(
                entity_type,
                "slug",
                format!("slug `{}` is already used by {entity_type} {owner}", write.slug),
            )
            .into());
        }

        for translation in &write.translations {
            if let Some(owner) = uow
                .localized_slug_owner(scope, kind, translation.locale_id, &translation.slug, exclude)
                .await?
            {
                let code = locales
                    .by_id(translation.locale_id)
                    .map(|locale| locale.code.to_string())
                    .unwrap_or_default();
                return Err(DomainError::conflict(
                    entity_type,
                    format!("translations.{code}.slug"),
                    format!(
                        "slug `{}` is already used by {entity_type} {owner}",
                        translation.slug
                    ),
                )
                .into());
            }
        }
        Ok(())
    }

    /// Storage contention surfaces after the transaction is gone. Re-read the
    /// stored version and report a version conflict when another writer moved
    /// it; otherwise the contention error stands and the caller may retry.
    pub(super) async fn reconcile<T>(
        &self,
        scope: &TenantScope,
        kind: ContentKind,
        id: EntityId,
        expected: Option<Version>,
        result: ApplicationResult<T>,
    ) -> ApplicationResult<T> {
        let err = match result {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        if !matches!(err, ApplicationError::Domain(DomainError::Contention(_))) {
            if err.is_retryable() {
                warn!(tenant_id = %scope.tenant_id(), kind = %kind, id = %id, error = %err, "concurrent write rejected");
            }
            return Err(err);
        }

        warn!(tenant_id = %scope.tenant_id(), kind = %kind, id = %id, error = %err, "write contention");
        match (expected, self.reader.current_version(scope, kind, id).await?) {
            (Some(expected), Some(actual)) if actual != expected => {
                Err(ConcurrencyGuard::conflict(kind, id, expected, actual).into())
            }
            _ => Err(err),
        }
    }
}
