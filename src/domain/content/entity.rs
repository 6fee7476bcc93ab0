// src/domain/content/entity.rs
use crate::domain::content::kind::ContentKind;
use crate::domain::content::path::PublicPath;
use crate::domain::content::value_objects::{ContentSlug, ContentStatus, EntityId, Version};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::locale::{LocaleCode, LocaleId, LocaleSet};
use crate::domain::tenant::{TenantId, Visibility};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;

const TITLE_MAX_LEN: usize = 300;

/// One language version of a content entity.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalizedRecord {
    pub id: i64,
    pub locale_id: LocaleId,
    pub locale_code: LocaleCode,
    pub slug: ContentSlug,
    pub title: String,
    pub fields: BTreeMap<String, String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContentEntity {
    pub id: EntityId,
    pub tenant_id: TenantId,
    pub kind: ContentKind,
    pub slug: ContentSlug,
    pub status: ContentStatus,
    pub version: Version,
    pub attributes: Map<String, Value>,
    pub translations: Vec<LocalizedRecord>,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl ContentEntity {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Only live, published entities own public URLs.
    pub fn is_public(&self) -> bool {
        self.status == ContentStatus::Published && !self.is_deleted()
    }

    pub fn translation(&self, code: &LocaleCode) -> Option<&LocalizedRecord> {
        self.translations.iter().find(|t| &t.locale_code == code)
    }

    /// The public URL of every translation, keyed by locale. Empty unless the
    /// entity is public.
    pub fn public_paths(&self, locales: &LocaleSet) -> BTreeMap<LocaleCode, PublicPath> {
        if !self.is_public() {
            return BTreeMap::new();
        }
        self.translations
            .iter()
            .filter_map(|record| {
                let locale = locales.by_id(record.locale_id)?;
                Some((
                    locale.code.clone(),
                    PublicPath::for_record(self.kind, locale, &record.slug),
                ))
            })
            .collect()
    }

    /// Self-contained JSON state used for audit before/after images.
    pub fn snapshot(&self) -> Value {
        let translations: Map<String, Value> = self
            .translations
            .iter()
            .map(|record| {
                (
                    record.locale_code.to_string(),
                    json!({
                        "slug": record.slug.as_str(),
                        "title": record.title,
                        "fields": record.fields,
                    }),
                )
            })
            .collect();

        json!({
            "id": i64::from(self.id),
            "kind": self.kind.entity_type(),
            "slug": self.slug.as_str(),
            "status": self.status.as_str(),
            "version": self.version.value(),
            "attributes": self.attributes,
            "published_at": self.published_at.map(|t| t.to_rfc3339()),
            "deleted_at": self.deleted_at.map(|t| t.to_rfc3339()),
            "translations": translations,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranslationDraft {
    pub slug: ContentSlug,
    pub title: String,
    pub fields: BTreeMap<String, String>,
}

/// Requested state of an entity before it is written: either the create
/// payload or the current entity with a patch applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentDraft {
    pub kind: ContentKind,
    pub slug: ContentSlug,
    pub status: ContentStatus,
    pub attributes: Map<String, Value>,
    pub translations: BTreeMap<LocaleCode, TranslationDraft>,
}

/// Partial update. Absent fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct ContentPatch {
    pub slug: Option<ContentSlug>,
    pub status: Option<ContentStatus>,
    pub attributes: Option<Map<String, Value>>,
    pub upsert_translations: BTreeMap<LocaleCode, TranslationDraft>,
    pub remove_translations: Vec<LocaleCode>,
}

impl ContentPatch {
    pub fn is_empty(&self) -> bool {
        self.slug.is_none()
            && self.status.is_none()
            && self.attributes.is_none()
            && self.upsert_translations.is_empty()
            && self.remove_translations.is_empty()
    }
}

impl ContentDraft {
    pub fn from_entity(entity: &ContentEntity) -> Self {
        Self {
            kind: entity.kind,
            slug: entity.slug.clone(),
            status: entity.status,
            attributes: entity.attributes.clone(),
            translations: entity
                .translations
                .iter()
                .map(|record| {
                    (
                        record.locale_code.clone(),
                        TranslationDraft {
                            slug: record.slug.clone(),
                            title: record.title.clone(),
                            fields: record.fields.clone(),
                        },
                    )
                })
                .collect(),
        }
    }

    pub fn apply(mut self, patch: ContentPatch) -> DomainResult<Self> {
        if let Some(code) = patch
            .remove_translations
            .iter()
            .find(|code| patch.upsert_translations.contains_key(*code))
        {
            return Err(DomainError::validation(
                format!("translations.{code}"),
                "translation cannot be updated and removed in one request",
            ));
        }

        if let Some(slug) = patch.slug {
            self.slug = slug;
        }
        if let Some(status) = patch.status {
            check_transition(self.status, status)?;
            self.status = status;
        }
        if let Some(attributes) = patch.attributes {
            self.attributes = attributes;
        }
        for (code, translation) in patch.upsert_translations {
            self.translations.insert(code, translation);
        }
        for code in &patch.remove_translations {
            self.translations.remove(code);
        }
        Ok(self)
    }

    /// Field rules, attribute rules, enabled locales and the publish gate.
    pub fn validate(&self, locales: &LocaleSet) -> DomainResult<()> {
        self.kind.validate_attributes(&self.attributes)?;

        for (code, translation) in &self.translations {
            locales.require(code)?;
            let title = translation.title.trim();
            if title.is_empty() {
                return Err(DomainError::validation(
                    format!("translations.{code}.title"),
                    "title cannot be empty",
                ));
            }
            if title.chars().count() > TITLE_MAX_LEN {
                return Err(DomainError::validation(
                    format!("translations.{code}.title"),
                    format!("title exceeds {TITLE_MAX_LEN} characters"),
                ));
            }
            self.kind.validate_fields(code.as_str(), &translation.fields)?;
        }

        let default_code = &locales.default_locale().code;
        if self.status == ContentStatus::Published && !self.translations.contains_key(default_code)
        {
            return Err(DomainError::validation(
                "status",
                format!("publishing requires a `{default_code}` translation"),
            ));
        }
        Ok(())
    }

    /// Resolve locale codes to ids and fix the timestamps of the write.
    pub fn into_write(
        self,
        locales: &LocaleSet,
        previous_published_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> DomainResult<ContentWrite> {
        let published_at = match self.status {
            ContentStatus::Published => Some(previous_published_at.unwrap_or(now)),
            _ => None,
        };
        let translations = self
            .translations
            .into_iter()
            .map(|(code, draft)| {
                let locale = locales.require(&code)?;
                Ok(TranslationWrite {
                    locale_id: locale.id,
                    slug: draft.slug,
                    title: draft.title.trim().to_string(),
                    fields: draft.fields,
                })
            })
            .collect::<DomainResult<Vec<_>>>()?;

        Ok(ContentWrite {
            slug: self.slug,
            status: self.status,
            attributes: self.attributes,
            published_at,
            deleted_at: None,
            translations,
            written_at: now,
        })
    }
}

pub fn check_transition(from: ContentStatus, to: ContentStatus) -> DomainResult<()> {
    if from.can_transition_to(to) {
        Ok(())
    } else {
        Err(DomainError::validation(
            "status",
            format!("cannot move from {from} to {to}"),
        ))
    }
}

/// Full row image handed to the store on insert and compare-and-set.
#[derive(Debug, Clone)]
pub struct ContentWrite {
    pub slug: ContentSlug,
    pub status: ContentStatus,
    pub attributes: Map<String, Value>,
    pub published_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub translations: Vec<TranslationWrite>,
    pub written_at: DateTime<Utc>,
}

impl ContentWrite {
    /// Rewrite an entity unchanged apart from the timestamp.
    pub fn from_entity(entity: &ContentEntity, now: DateTime<Utc>) -> Self {
        Self {
            slug: entity.slug.clone(),
            status: entity.status,
            attributes: entity.attributes.clone(),
            published_at: entity.published_at,
            deleted_at: entity.deleted_at,
            translations: entity
                .translations
                .iter()
                .map(|record| TranslationWrite {
                    locale_id: record.locale_id,
                    slug: record.slug.clone(),
                    title: record.title.clone(),
                    fields: record.fields.clone(),
                })
                .collect(),
            written_at: now,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TranslationWrite {
    pub locale_id: LocaleId,
    pub slug: ContentSlug,
    pub title: String,
    pub fields: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ContentListFilter {
    pub status: Option<ContentStatus>,
    pub visibility: Visibility,
}
