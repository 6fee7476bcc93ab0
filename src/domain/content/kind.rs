// src/domain/content/kind.rs
//! Content types served by the generic store.
//!
//! Each kind is described by a [`ContentDescriptor`] (tables, public path
//! segment, localized field list). Rules that only apply to one kind live in
//! [`ContentKind::validate_attributes`].
use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{collections::BTreeMap, fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Article,
    Service,
    Employee,
    Case,
    Faq,
    Review,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalizedField {
    pub name: &'static str,
    pub required: bool,
    pub max_len: usize,
}

impl LocalizedField {
    const fn required(name: &'static str, max_len: usize) -> Self {
        Self {
            name,
            required: true,
            max_len,
        }
    }

    const fn optional(name: &'static str, max_len: usize) -> Self {
        Self {
            name,
            required: false,
            max_len,
        }
    }
}

#[derive(Debug)]
pub struct ContentDescriptor {
    pub entity_type: &'static str,
    pub table: &'static str,
    pub translations_table: &'static str,
    pub path_segment: &'static str,
    pub localized_fields: &'static [LocalizedField],
}

const LONG_TEXT: usize = 100_000;
const SHORT_TEXT: usize = 500;

static ARTICLE: ContentDescriptor = ContentDescriptor {
    entity_type: "article",
    table: "articles",
    translations_table: "article_translations",
    path_segment: "articles",
    localized_fields: &[
        LocalizedField::optional("summary", SHORT_TEXT),
        LocalizedField::required("body", LONG_TEXT),
    ],
};

static SERVICE: ContentDescriptor = ContentDescriptor {
    entity_type: "service",
    table: "services",
    translations_table: "service_translations",
    path_segment: "services",
    localized_fields: &[
        LocalizedField::optional("summary", SHORT_TEXT),
        LocalizedField::required("body", LONG_TEXT),
    ],
};

static EMPLOYEE: ContentDescriptor = ContentDescriptor {
    entity_type: "employee",
    table: "employees",
    translations_table: "employee_translations",
    path_segment: "team",
    localized_fields: &[
        LocalizedField::required("position", SHORT_TEXT),
        LocalizedField::optional("bio", LONG_TEXT),
    ],
};

static CASE: ContentDescriptor = ContentDescriptor {
    entity_type: "case",
    table: "cases",
    translations_table: "case_translations",
    path_segment: "cases",
    localized_fields: &[
        LocalizedField::optional("client", SHORT_TEXT),
        LocalizedField::optional("challenge", LONG_TEXT),
        LocalizedField::required("solution", LONG_TEXT),
    ],
};

static FAQ: ContentDescriptor = ContentDescriptor {
    entity_type: "faq",
    table: "faqs",
    translations_table: "faq_translations",
    path_segment: "faq",
    localized_fields: &[LocalizedField::required("answer", LONG_TEXT)],
};

static REVIEW: ContentDescriptor = ContentDescriptor {
    entity_type: "review",
    table: "reviews",
    translations_table: "review_translations",
    path_segment: "reviews",
    localized_fields: &[
        LocalizedField::required("author_name", SHORT_TEXT),
        LocalizedField::required("text", LONG_TEXT),
    ],
};

impl ContentKind {
    pub const ALL: [ContentKind; 6] = [
        ContentKind::Article,
        ContentKind::Service,
        ContentKind::Employee,
        ContentKind::Case,
        ContentKind::Faq,
        ContentKind::Review,
    ];

    pub fn descriptor(self) -> &'static ContentDescriptor {
        match self {
            ContentKind::Article => &ARTICLE,
            ContentKind::Service => &SERVICE,
            ContentKind::Employee => &EMPLOYEE,
            ContentKind::Case => &CASE,
            ContentKind::Faq => &FAQ,
            ContentKind::Review => &REVIEW,
        }
    }

    pub fn entity_type(self) -> &'static str {
        self.descriptor().entity_type
    }

    pub fn from_entity_type(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.entity_type() == value)
    }

    /// Check a translation's field map against the kind's localized field list.
    pub fn validate_fields(
        self,
        locale: &str,
        fields: &BTreeMap<String, String>,
    ) -> DomainResult<()> {
        let spec = self.descriptor().localized_fields;

        if let Some(unknown) = fields
            .keys()
            .find(|key| !spec.iter().any(|field| field.name == key.as_str()))
        {
            return Err(DomainError::validation(
                format!("translations.{locale}.fields.{unknown}"),
                format!("{} has no localized field `{unknown}`", self.entity_type()),
            ));
        }

        for field in spec {
            let path = || format!("translations.{locale}.fields.{}", field.name);
            match fields.get(field.name) {
                Some(value) if value.chars().count() > field.max_len => {
                    return Err(DomainError::validation(
                        path(),
                        format!("exceeds {} characters", field.max_len),
                    ));
                }
                Some(value) if field.required && value.trim().is_empty() => {
                    return Err(DomainError::validation(path(), "cannot be empty"));
                }
                None if field.required => {
                    return Err(DomainError::validation(path(), "is required"));
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Kind-specific rules for language-independent attributes.
    pub fn validate_attributes(self, attributes: &Map<String, Value>) -> DomainResult<()> {
        match self {
            ContentKind::Article | ContentKind::Case => Ok(()),
            ContentKind::Service => match attributes.get("price_from") {
                None | Some(Value::Null) => Ok(()),
                Some(Value::Number(n)) if n.as_f64().is_some_and(|v| v >= 0.0) => Ok(()),
                Some(_) => Err(DomainError::validation(
                    "attributes.price_from",
                    "must be a non-negative number",
                )),
            },
            ContentKind::Employee => match attributes.get("email") {
                None | Some(Value::Null) => Ok(()),
                Some(Value::String(email)) if email.contains('@') => Ok(()),
                Some(_) => Err(DomainError::validation(
                    "attributes.email",
                    "must be an email address",
                )),
            },
            ContentKind::Faq => match attributes.get("sort_order") {
                None | Some(Value::Null) => Ok(()),
                Some(Value::Number(n)) if n.is_i64() => Ok(()),
                Some(_) => Err(DomainError::validation(
                    "attributes.sort_order",
                    "must be an integer",
                )),
            },
            ContentKind::Review => match attributes.get("rating").and_then(Value::as_i64) {
                Some(rating) if (1..=5).contains(&rating) => Ok(()),
                _ => Err(DomainError::validation(
                    "attributes.rating",
                    "reviews need an integer rating between 1 and 5",
                )),
            },
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.entity_type())
    }
}

impl FromStr for ContentKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_entity_type(s).ok_or_else(|| {
            DomainError::validation("kind", format!("unknown content kind `{s}`"))
        })
    }
}
