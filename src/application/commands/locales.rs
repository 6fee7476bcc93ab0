// src/application/commands/locales.rs
use crate::{
    application::{
        context::RequestContext,
        dto::{LocaleDto, tenants::locale_snapshot},
        error::ApplicationResult,
        ports::time::Clock,
        services::{AuditChange, AuditRecorder, RedirectManager, TenantResolver},
    },
    domain::{
        audit::AuditAction,
        concurrency::ConcurrencyGuard,
        content::{ContentEntity, ContentKind, ContentStatus, ContentWrite},
        errors::DomainError,
        locale::{Locale, LocaleCode, LocaleRemovalMode, LocaleSet, NewLocale},
        redirect::RedirectPlan,
        tenant::TenantScope,
        transaction::{UnitOfWork, UnitOfWorkFactory},
    },
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::info;

/// Locale registry writes. Changing the default or removing a locale moves
/// public paths, so both run the redirect manager over the affected content.
pub struct LocaleCommandService {
    tenants: Arc<TenantResolver>,
    uow_factory: Arc<dyn UnitOfWorkFactory>,
    redirects: RedirectManager,
    audit: Arc<AuditRecorder>,
    clock: Arc<dyn Clock>,
}

impl LocaleCommandService {
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

    /// Enable a language. The first locale of a tenant becomes its default.
    pub async fn add(&self, ctx: &RequestContext, code: &str) -> ApplicationResult<LocaleDto> {
        let scope = self.tenants.scope(ctx.tenant_id).await?;
        let code = LocaleCode::new(code)?;
        let now = self.clock.now();

        let mut uow = self.uow_factory.begin().await?;
        let existing = uow.list_locales(&scope).await?;
        if existing.iter().any(|locale| locale.code == code) {
            return Err(DomainError::conflict(
                "locale",
                "code",
                format!("locale `{code}` is already enabled"),
            )
            .into());
        }

        let locale = uow
            .insert_locale(
                &scope,
                NewLocale {
                    code,
                    is_default: existing.is_empty(),
                    created_at: now,
                },
            )
            .await?;
        self.audit
            .record(
                &mut *uow,
                ctx,
                AuditChange::created("locale", locale.id.into(), locale_snapshot(&locale)),
            )
            .await?;
        uow.commit().await?;

        info!(tenant_id = %scope.tenant_id(), locale = %locale.code, "locale added");
        Ok((&locale).into())
    }

    /// Make `code` the default locale. Every published entity needs a
    /// translation in it; public paths of both the old and the new default
    /// change shape and are redirected accordingly.
    pub async fn set_default(
        &self,
        ctx: &RequestContext,
        code: &str,
    ) -> ApplicationResult<LocaleDto> {
        let scope = self.tenants.scope(ctx.tenant_id).await?;
        let code = LocaleCode::new(code)?;
        let now = self.clock.now();

        let mut uow = self.uow_factory.begin().await?;
        let before_set = LocaleSet::new(uow.list_locales(&scope).await?)?;
        let target = before_set.require(&code)?.clone();
        if target.is_default {
            return Ok((&target).into());
        }

        let mut public = Vec::new();
        for kind in ContentKind::ALL {
            for entity in uow.public_entities(&scope, kind).await? {
                if entity.translation(&code).is_none() {
                    return Err(DomainError::conflict(
                        "locale",
                        "code",
                        format!(
                            "published {kind} {} has no `{code}` translation",
                            entity.id
                        ),
                    )
                    .into());
                }
                public.push(entity);
            }
        }

        uow.set_default_locale(&scope, target.id).await?;
        let after_set = LocaleSet::new(uow.list_locales(&scope).await?)?;
        for entity in &public {
            let plan = RedirectPlan::between(
                &entity.public_paths(&before_set),
                &entity.public_paths(&after_set),
                &after_set,
            );
            self.redirects.apply(&mut *uow, &scope, &plan, now).await?;
        }

        // Both rows flip their flag; each gets its own entry.
        let previous = before_set.default_locale();
        let demoted = after_set.require(&previous.code)?;
        let promoted = after_set.default_locale().clone();
        for (before, after) in [(previous, demoted), (&target, &promoted)] {
            self.audit
                .record(
                    &mut *uow,
                    ctx,
                    AuditChange::updated(
                        "locale",
                        after.id.into(),
                        locale_snapshot(before),
                        locale_snapshot(after),
                    ),
                )
                .await?;
        }
        uow.commit().await?;

        info!(
            tenant_id = %scope.tenant_id(),
            locale = %promoted.code,
            entities = public.len(),
            "default locale changed"
        );
        Ok((&promoted).into())
    }

    /// Disable a language. With [`LocaleRemovalMode::Reject`] the call fails
    /// while live published content is translated into it. Otherwise every
    /// translation in the locale is dropped, each touched entity gets a new
    /// version and an audit entry, and published paths redirect to the
    /// default-locale path.
    pub async fn remove(
        &self,
        ctx: &RequestContext,
        code: &str,
        mode: LocaleRemovalMode,
    ) -> ApplicationResult<()> {
        let scope = self.tenants.scope(ctx.tenant_id).await?;
        let code = LocaleCode::new(code)?;
        let now = self.clock.now();

        let mut uow = self.uow_factory.begin().await?;
        let before_set = LocaleSet::new(uow.list_locales(&scope).await?)?;
        let target = before_set.require(&code)?.clone();
        if target.is_default {
            return Err(DomainError::validation(
                "locale",
                format!("`{code}` is the default locale and cannot be removed"),
            )
            .into());
        }
        let after_set = LocaleSet::new(
            before_set
                .iter()
                .filter(|locale| locale.id != target.id)
                .cloned()
                .collect(),
        )?;

        let mut migrated = 0usize;
        for kind in ContentKind::ALL {
            let affected = uow.entities_with_locale(&scope, kind, target.id).await?;
            if mode == LocaleRemovalMode::Reject {
                if let Some(entity) = affected.iter().find(|entity| entity.is_public()) {
                    return Err(DomainError::conflict(
                        "locale",
                        "code",
                        format!("locale `{code}` is used by published {kind} {}", entity.id),
                    )
                    .into());
                }
            }
            for entity in affected {
                self.drop_translation(
                    &mut *uow,
                    ctx,
                    &scope,
                    &target,
                    &before_set,
                    &after_set,
                    entity,
                    now,
                )
                .await?;
                migrated += 1;
            }
        }

        uow.delete_locale(&scope, target.id).await?;
        self.audit
            .record(
                &mut *uow,
                ctx,
                AuditChange::new(
                    AuditAction::Delete,
                    "locale",
                    target.id.into(),
                    Some(locale_snapshot(&target)),
                    None,
                ),
            )
            .await?;
        uow.commit().await?;

        info!(
            tenant_id = %scope.tenant_id(),
            locale = %code,
            migrated,
            "locale removed"
        );
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    async fn drop_translation(
        &self,
        uow: &mut dyn UnitOfWork,
        ctx: &RequestContext,
        scope: &TenantScope,
        target: &Locale,
        before_set: &LocaleSet,
        after_set: &LocaleSet,
        entity: ContentEntity,
        now: DateTime<Utc>,
    ) -> ApplicationResult<()> {
        let kind = entity.kind;
        let mut write = ContentWrite::from_entity(&entity, now);
        write
            .translations
            .retain(|translation| translation.locale_id != target.id);
        debug_assert!(
            entity.status != ContentStatus::Published
                || write
                    .translations
                    .iter()
                    .any(|t| t.locale_id == after_set.default_locale().id)
        );

        let outcome = uow
            .compare_and_set(scope, kind, entity.id, entity.version, write)
            .await?;
        let after = ConcurrencyGuard::settle(kind, entity.id, entity.version, outcome)?;

        let plan = RedirectPlan::between(
            &entity.public_paths(before_set),
            &after.public_paths(after_set),
            after_set,
        );
        self.redirects.apply(uow, scope, &plan, now).await?;
        self.audit
            .record(
                uow,
                ctx,
                AuditChange::updated(
                    kind.entity_type(),
                    entity.id.into(),
                    entity.snapshot(),
                    after.snapshot(),
                ),
            )
            .await?;
        Ok(())
    }
}
