// src/infrastructure/repositories/unit_of_work.rs
use super::{
    map_sqlx, sqlite_audit_log, sqlite_content, sqlite_locale, sqlite_redirect, sqlite_tenant,
};
use crate::domain::audit::{AuditEntry, AuditWriteRepository, NewAuditEntry};
use crate::domain::concurrency::CasOutcome;
use crate::domain::content::{
    ContentEntity, ContentKind, ContentSlug, ContentWrite, ContentWriteRepository, EntityId,
    PublicPath, Version,
};
use crate::domain::errors::DomainResult;
use crate::domain::locale::{Locale, LocaleId, LocaleWriteRepository, NewLocale};
use crate::domain::redirect::{NewRedirect, RedirectRecord, RedirectWriteRepository};
use crate::domain::tenant::{
    NewTenant, Tenant, TenantId, TenantScope, TenantWriteRepository, Visibility,
};
use crate::domain::transaction::{UnitOfWork, UnitOfWorkFactory};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::debug;

#[derive(Clone)]
pub struct SqliteUnitOfWorkFactory {
    pool: SqlitePool,
}

impl SqliteUnitOfWorkFactory {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UnitOfWorkFactory for SqliteUnitOfWorkFactory {
    /// Write units take the write lock up front. Competing writers wait on the
    /// busy timeout and then read the committed state inside their own unit.
    async fn begin(&self) -> DomainResult<Box<dyn UnitOfWork>> {
        let tx = self
            .pool
            .begin_with("BEGIN IMMEDIATE")
            .await
            .map_err(map_sqlx)?;
        Ok(Box::new(SqliteUnitOfWork { tx }))
    }
}

/// Open SQLite transaction. Dropped without commit, it rolls back.
pub struct SqliteUnitOfWork {
    tx: Transaction<'static, Sqlite>,
}

#[async_trait]
impl UnitOfWork for SqliteUnitOfWork {
    async fn commit(self: Box<Self>) -> DomainResult<()> {
        self.tx.commit().await.map_err(map_sqlx)?;
        debug!("transaction committed");
        Ok(())
    }
}

#[async_trait]
impl TenantWriteRepository for SqliteUnitOfWork {
    async fn find_tenant(&mut self, id: TenantId) -> DomainResult<Option<Tenant>> {
        sqlite_tenant::find_tenant(&mut self.tx, id).await
    }

    async fn insert_tenant(&mut self, tenant: NewTenant) -> DomainResult<Tenant> {
        sqlite_tenant::insert_tenant(&mut self.tx, tenant).await
    }

    async fn set_tenant_active(
        &mut self,
        id: TenantId,
        active: bool,
        now: DateTime<Utc>,
    ) -> DomainResult<Tenant> {
        sqlite_tenant::set_tenant_active(&mut self.tx, id, active, now).await
    }
}

#[async_trait]
impl LocaleWriteRepository for SqliteUnitOfWork {
    async fn list_locales(&mut self, scope: &TenantScope) -> DomainResult<Vec<Locale>> {
        sqlite_locale::list_locales(&mut self.tx, scope).await
    }

    async fn insert_locale(
        &mut self,
        scope: &TenantScope,
        locale: NewLocale,
    ) -> DomainResult<Locale> {
        sqlite_locale::insert_locale(&mut self.tx, scope, locale).await
    }

    async fn set_default_locale(&mut self, scope: &TenantScope, id: LocaleId) -> DomainResult<()> {
        sqlite_locale::set_default_locale(&mut self.tx, scope, id).await
    }

    async fn delete_locale(&mut self, scope: &TenantScope, id: LocaleId) -> DomainResult<()> {
        sqlite_locale::delete_locale(&mut self.tx, scope, id).await
    }
}

#[async_trait]
impl ContentWriteRepository for SqliteUnitOfWork {
    async fn find_content(
        &mut self,
        scope: &TenantScope,
        kind: ContentKind,
        id: EntityId,
        visibility: Visibility,
    ) -> DomainResult<Option<ContentEntity>> {
        sqlite_content::find_content(&mut self.tx, scope, kind, id, visibility).await
    }

    async fn entity_slug_owner(
        &mut self,
        scope: &TenantScope,
        kind: ContentKind,
        slug: &ContentSlug,
        exclude: Option<EntityId>,
    ) -> DomainResult<Option<EntityId>> {
        sqlite_content::entity_slug_owner(&mut self.tx, scope, kind, slug, exclude).await
    }

    async fn localized_slug_owner(
        &mut self,
        scope: &TenantScope,
        kind: ContentKind,
        locale_id: LocaleId,
        slug: &ContentSlug,
        exclude: Option<EntityId>,
    ) -> DomainResult<Option<EntityId>> {
        sqlite_content::localized_slug_owner(&mut self.tx, scope, kind, locale_id, slug, exclude)
            .await
    }

    async fn insert_content(
        &mut self,
        scope: &TenantScope,
        kind: ContentKind,
        write: ContentWrite,
    ) -> DomainResult<ContentEntity> {
        sqlite_content::insert_content(&mut self.tx, scope, kind, write).await
    }

    async fn compare_and_set(
        &mut self,
        scope: &TenantScope,
        kind: ContentKind,
        id: EntityId,
        expected: Version,
        write: ContentWrite,
    ) -> DomainResult<CasOutcome> {
        sqlite_content::compare_and_set(&mut self.tx, scope, kind, id, expected, write).await
    }

    async fn entities_with_locale(
        &mut self,
        scope: &TenantScope,
        kind: ContentKind,
        locale_id: LocaleId,
    ) -> DomainResult<Vec<ContentEntity>> {
        sqlite_content::entities_with_locale(&mut self.tx, scope, kind, locale_id).await
    }

    async fn public_entities(
        &mut self,
        scope: &TenantScope,
        kind: ContentKind,
    ) -> DomainResult<Vec<ContentEntity>> {
        sqlite_content::public_entities(&mut self.tx, scope, kind).await
    }

    async fn purge_content(
        &mut self,
        scope: &TenantScope,
        kind: ContentKind,
        id: EntityId,
    ) -> DomainResult<bool> {
        sqlite_content::purge_content(&mut self.tx, scope, kind, id).await
    }
}

#[async_trait]
impl RedirectWriteRepository for SqliteUnitOfWork {
    async fn find_redirect(
        &mut self,
        scope: &TenantScope,
        from: &PublicPath,
    ) -> DomainResult<Option<RedirectRecord>> {
        sqlite_redirect::find_redirect(&mut self.tx, scope, from).await
    }

    async fn redirects_targeting(
        &mut self,
        scope: &TenantScope,
        to: &PublicPath,
    ) -> DomainResult<Vec<RedirectRecord>> {
        sqlite_redirect::redirects_targeting(&mut self.tx, scope, to).await
    }

    async fn upsert_redirect(
        &mut self,
        scope: &TenantScope,
        redirect: NewRedirect,
    ) -> DomainResult<RedirectRecord> {
        sqlite_redirect::upsert_redirect(&mut self.tx, scope, redirect).await
    }

    async fn delete_redirect(
        &mut self,
        scope: &TenantScope,
        from: &PublicPath,
    ) -> DomainResult<Option<RedirectRecord>> {
        sqlite_redirect::delete_redirect(&mut self.tx, scope, from).await
    }
}

#[async_trait]
impl AuditWriteRepository for SqliteUnitOfWork {
    async fn append(&mut self, entry: NewAuditEntry) -> DomainResult<AuditEntry> {
        sqlite_audit_log::append(&mut self.tx, entry).await
    }

    async fn purge_retired_history(
        &mut self,
        tenant_id: TenantId,
        kind: ContentKind,
        cutoff: DateTime<Utc>,
    ) -> DomainResult<u64> {
        sqlite_audit_log::purge_retired_history(&mut self.tx, tenant_id, kind, cutoff).await
    }
}
