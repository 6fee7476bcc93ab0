use crate::domain::content::{
    ContentEntity, LocalizedRecord, LocalizedView, MissingTranslation, Resolution,
};
use crate::domain::locale::LocaleSet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::serde_time;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationDto {
    pub locale: String,
    pub slug: String,
    pub title: String,
    pub fields: BTreeMap<String, String>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
}

impl From<&LocalizedRecord> for TranslationDto {
    fn from(record: &LocalizedRecord) -> Self {
        Self {
            locale: record.locale_code.to_string(),
            slug: record.slug.to_string(),
            title: record.title.clone(),
            fields: record.fields.clone(),
            updated_at: record.updated_at,
        }
    }
}

/// Admin view: every translation, the version to send back on the next
/// write, and the public URL per locale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentDto {
    pub id: i64,
    pub kind: String,
    pub slug: String,
    pub status: String,
    pub version: i64,
    pub attributes: Map<String, Value>,
    pub translations: Vec<TranslationDto>,
    pub paths: BTreeMap<String, String>,
    #[serde(default, with = "serde_time::option")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
    #[serde(default, with = "serde_time::option")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl ContentDto {
    pub fn from_entity(entity: &ContentEntity, locales: &LocaleSet) -> Self {
        Self {
            id: entity.id.into(),
            kind: entity.kind.entity_type().to_string(),
            slug: entity.slug.to_string(),
            status: entity.status.as_str().to_string(),
            version: entity.version.value(),
            attributes: entity.attributes.clone(),
            translations: entity.translations.iter().map(Into::into).collect(),
            paths: entity
                .public_paths(locales)
                .into_iter()
                .map(|(code, path)| (code.to_string(), path.to_string()))
                .collect(),
            published_at: entity.published_at,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
            deleted_at: entity.deleted_at,
        }
    }
}

/// One language of an entity as served to a reader.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalizedContentDto {
    pub id: i64,
    pub kind: String,
    pub status: String,
    pub version: i64,
    pub requested_locale: String,
    pub locale: String,
    pub fallback: bool,
    pub slug: String,
    pub title: String,
    pub fields: BTreeMap<String, String>,
    pub attributes: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, with = "serde_time::option")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
}

impl LocalizedContentDto {
    pub fn new(entity: &ContentEntity, view: LocalizedView) -> Self {
        let fallback = view.is_fallback();
        Self {
            id: entity.id.into(),
            kind: entity.kind.entity_type().to_string(),
            status: entity.status.as_str().to_string(),
            version: entity.version.value(),
            requested_locale: view.requested.to_string(),
            locale: view.served.to_string(),
            fallback,
            slug: view.record.slug.to_string(),
            title: view.record.title,
            fields: view.record.fields,
            attributes: entity.attributes.clone(),
            path: view.path.map(String::from),
            published_at: entity.published_at,
            updated_at: entity.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissingTranslationDto {
    pub requested_locale: String,
    pub default_locale: String,
}

impl From<MissingTranslation> for MissingTranslationDto {
    fn from(missing: MissingTranslation) -> Self {
        Self {
            requested_locale: missing.requested.to_string(),
            default_locale: missing.default_locale.to_string(),
        }
    }
}

/// Admin read of one entity, optionally resolved for a locale. Incomplete
/// entities carry `missing_translation` instead of `localized`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminContentDto {
    #[serde(flatten)]
    pub content: ContentDto,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub localized: Option<LocalizedContentDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_translation: Option<MissingTranslationDto>,
}

impl AdminContentDto {
    pub fn new(
        entity: &ContentEntity,
        locales: &LocaleSet,
        resolution: Option<Resolution>,
    ) -> Self {
        let (localized, missing_translation) = match resolution {
            Some(Resolution::Localized(view)) => {
                (Some(LocalizedContentDto::new(entity, view)), None)
            }
            Some(Resolution::Missing(missing)) => (None, Some(missing.into())),
            None => (None, None),
        };
        Self {
            content: ContentDto::from_entity(entity, locales),
            localized,
            missing_translation,
        }
    }
}
