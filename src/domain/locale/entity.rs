// src/domain/locale/entity.rs
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::locale::value_objects::{LocaleCode, LocaleId};
use crate::domain::tenant::TenantId;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Locale {
    pub id: LocaleId,
    pub tenant_id: TenantId,
    pub code: LocaleCode,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewLocale {
    pub code: LocaleCode,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
}

/// The enabled languages of one tenant, with its single default.
#[derive(Debug, Clone)]
pub struct LocaleSet {
    locales: Vec<Locale>,
    default_index: usize,
}

impl LocaleSet {
    pub fn new(locales: Vec<Locale>) -> DomainResult<Self> {
        let mut defaults = locales
            .iter()
            .enumerate()
            .filter(|(_, locale)| locale.is_default);
        let default_index = match (defaults.next(), defaults.next()) {
            (Some((index, _)), None) => index,
            (None, _) => {
                return Err(DomainError::validation(
                    "locale",
                    "tenant has no default locale",
                ));
            }
            (Some(_), Some(_)) => {
                return Err(DomainError::Persistence(
                    "tenant has more than one default locale".into(),
                ));
            }
        };
        Ok(Self {
            locales,
            default_index,
        })
    }

    pub fn default_locale(&self) -> &Locale {
        &self.locales[self.default_index]
    }

    pub fn find(&self, code: &LocaleCode) -> Option<&Locale> {
        self.locales.iter().find(|locale| &locale.code == code)
    }

    /// Look up an enabled locale, reporting unknown codes as validation errors.
    pub fn require(&self, code: &LocaleCode) -> DomainResult<&Locale> {
        self.find(code).ok_or_else(|| {
            DomainError::validation(
                "locale",
                format!("locale `{code}` is not enabled for this tenant"),
            )
        })
    }

    pub fn by_id(&self, id: LocaleId) -> Option<&Locale> {
        self.locales.iter().find(|locale| locale.id == id)
    }

    pub fn is_default(&self, code: &LocaleCode) -> bool {
        &self.default_locale().code == code
    }

    pub fn iter(&self) -> impl Iterator<Item = &Locale> {
        self.locales.iter()
    }
}
