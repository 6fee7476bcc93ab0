use crate::domain::errors::DomainResult;
use crate::domain::locale::entity::{Locale, NewLocale};
use crate::domain::locale::value_objects::LocaleId;
use crate::domain::tenant::TenantScope;
use async_trait::async_trait;

#[async_trait]
pub trait LocaleRepository: Send + Sync {
    async fn list_for_tenant(&self, scope: &TenantScope) -> DomainResult<Vec<Locale>>;
}

#[async_trait]
pub trait LocaleWriteRepository: Send {
    async fn list_locales(&mut self, scope: &TenantScope) -> DomainResult<Vec<Locale>>;
    async fn insert_locale(&mut self, scope: &TenantScope, locale: NewLocale)
    -> DomainResult<Locale>;
    /// Move the default flag to `id`, clearing it on every other locale.
    async fn set_default_locale(&mut self, scope: &TenantScope, id: LocaleId)
    -> DomainResult<()>;
    async fn delete_locale(&mut self, scope: &TenantScope, id: LocaleId) -> DomainResult<()>;
}
