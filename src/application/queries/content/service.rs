// src/application/queries/content/service.rs
use std::sync::Arc;

use crate::{
    application::{
        error::ApplicationResult,
        services::TenantResolver,
    },
    domain::{
        content::{ContentListCursor, ContentReadRepository, LocalizationResolver},
        locale::{LocaleCode, LocaleRepository, LocaleSet},
        tenant::TenantScope,
    },
};

/// Read side of the generic content store. Every query resolves the tenant
/// scope first; repositories cannot be reached without one.
pub struct ContentQueryService {
    pub(super) tenants: Arc<TenantResolver>,
    pub(super) content: Arc<dyn ContentReadRepository>,
    pub(super) locales: Arc<dyn LocaleRepository>,
    pub(super) resolver: LocalizationResolver,
}

impl ContentQueryService {
    pub fn new(
        tenants: Arc<TenantResolver>,
        content: Arc<dyn ContentReadRepository>,
        locales: Arc<dyn LocaleRepository>,
    ) -> Self {
        Self {
            tenants,
            content,
            locales,
            resolver: LocalizationResolver,
        }
    }

    pub(super) async fn locale_set(&self, scope: &TenantScope) -> ApplicationResult<LocaleSet> {
        Ok(LocaleSet::new(self.locales.list_for_tenant(scope).await?)?)
    }

    /// Requested language, or the tenant default when none was asked for.
    /// Unknown codes are rejected; enabled-ness is not required so that a
    /// reader asking for a disabled language still gets the fallback.
    pub(super) fn requested_locale(
        &self,
        locales: &LocaleSet,
        requested: Option<&str>,
    ) -> ApplicationResult<LocaleCode> {
        match requested {
            Some(code) => Ok(LocaleCode::new(code)?),
            None => Ok(locales.default_locale().code.clone()),
        }
    }

    pub(super) fn decode_cursor(
        &self,
        token: Option<&str>,
    ) -> ApplicationResult<Option<ContentListCursor>> {
        Ok(token.map(ContentListCursor::decode).transpose()?)
    }
}
