// src/domain/content/resolver.rs
//! Language selection for reads.
//!
//! The requested locale wins when the entity has a record for it; otherwise the
//! tenant default is served. Records are never merged field by field.
use crate::domain::content::entity::{ContentEntity, LocalizedRecord};
use crate::domain::content::path::PublicPath;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::locale::{LocaleCode, LocaleSet};

/// Who is reading. Public readers never see incomplete entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    Public,
    Admin,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocalizedView {
    pub requested: LocaleCode,
    pub served: LocaleCode,
    pub record: LocalizedRecord,
    pub path: Option<PublicPath>,
}

impl LocalizedView {
    pub fn is_fallback(&self) -> bool {
        self.requested != self.served
    }
}

/// Neither the requested nor the default locale has a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingTranslation {
    pub requested: LocaleCode,
    pub default_locale: LocaleCode,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Localized(LocalizedView),
    Missing(MissingTranslation),
}

impl Resolution {
    /// Public callers get `NotFound` for incomplete entities; admins get the
    /// missing-translation flag.
    pub fn for_audience(
        self,
        audience: Audience,
        entity: &ContentEntity,
    ) -> DomainResult<Resolution> {
        match (self, audience) {
            (Resolution::Missing(_), Audience::Public) => {
                Err(DomainError::not_found(entity.kind.entity_type(), entity.id))
            }
            (resolution, _) => Ok(resolution),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalizationResolver;

impl LocalizationResolver {
    pub fn resolve(
        &self,
        entity: &ContentEntity,
        requested: &LocaleCode,
        locales: &LocaleSet,
    ) -> Resolution {
        let default_code = &locales.default_locale().code;
        let record = entity
            .translation(requested)
            .or_else(|| entity.translation(default_code));

        let Some(record) = record else {
            return Resolution::Missing(MissingTranslation {
                requested: requested.clone(),
                default_locale: default_code.clone(),
            });
        };

        let path = entity
            .public_paths(locales)
            .remove(&record.locale_code);

        Resolution::Localized(LocalizedView {
            requested: requested.clone(),
            served: record.locale_code.clone(),
            record: record.clone(),
            path,
        })
    }
}
