use crate::domain::locale::Locale;
use crate::domain::tenant::Tenant;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::serde_time;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantDto {
    pub id: i64,
    pub slug: String,
    pub name: String,
    pub active: bool,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
}

impl From<Tenant> for TenantDto {
    fn from(tenant: Tenant) -> Self {
        Self {
            id: tenant.id.into(),
            slug: tenant.slug.as_str().to_string(),
            name: tenant.name.as_str().to_string(),
            active: tenant.active,
            created_at: tenant.created_at,
            updated_at: tenant.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocaleDto {
    pub id: i64,
    pub code: String,
    pub is_default: bool,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
}

impl From<&Locale> for LocaleDto {
    fn from(locale: &Locale) -> Self {
        Self {
            id: locale.id.into(),
            code: locale.code.to_string(),
            is_default: locale.is_default,
            created_at: locale.created_at,
        }
    }
}

pub(crate) fn tenant_snapshot(tenant: &Tenant) -> Value {
    json!({
        "slug": tenant.slug.as_str(),
        "name": tenant.name.as_str(),
        "active": tenant.active,
    })
}

pub(crate) fn locale_snapshot(locale: &Locale) -> Value {
    json!({
        "code": locale.code.as_str(),
        "is_default": locale.is_default,
    })
}
