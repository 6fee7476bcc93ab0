// src/domain/content/path.rs
use crate::domain::content::kind::ContentKind;
use crate::domain::content::value_objects::ContentSlug;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::locale::{Locale, LocaleCode};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Site-relative URL path: leading slash, no trailing slash (except `/`), no
/// query string or fragment, no empty segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PublicPath(String);

impl PublicPath {
    const MAX_LEN: usize = 2048;

    pub fn parse(value: impl AsRef<str>) -> DomainResult<Self> {
        let raw = value.as_ref().trim();
        if raw.contains(['?', '#']) || raw.chars().any(char::is_whitespace) {
            return Err(DomainError::validation(
                "path",
                "path cannot contain a query, fragment or whitespace",
            ));
        }
        if raw.len() > Self::MAX_LEN {
            return Err(DomainError::validation(
                "path",
                format!("path exceeds {} characters", Self::MAX_LEN),
            ));
        }

        let segments: Vec<&str> = raw.split('/').filter(|s| !s.is_empty()).collect();
        if segments.iter().any(|s| *s == "." || *s == "..") {
            return Err(DomainError::validation(
                "path",
                "path cannot contain relative segments",
            ));
        }
        Ok(Self(format!("/{}", segments.join("/"))))
    }

    /// Public URL of one localized record.
    pub fn for_record(kind: ContentKind, locale: &Locale, slug: &ContentSlug) -> Self {
        let segment = kind.descriptor().path_segment;
        if locale.is_default {
            Self(format!("/{segment}/{slug}"))
        } else {
            Self(format!("/{}/{segment}/{slug}", locale.code))
        }
    }

    /// Landing page of a locale.
    pub fn home(locale: &Locale) -> Self {
        Self::home_for(&locale.code, locale.is_default)
    }

    pub fn home_for(code: &LocaleCode, is_default: bool) -> Self {
        if is_default {
            Self("/".to_string())
        } else {
            Self(format!("/{code}"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PublicPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PublicPath {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<PublicPath> for String {
    fn from(value: PublicPath) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::locale::LocaleId;
    use crate::domain::tenant::TenantId;
    use chrono::Utc;

    fn locale(code: &str, is_default: bool) -> Locale {
        Locale {
            id: LocaleId::new(1).unwrap(),
            tenant_id: TenantId::new(1).unwrap(),
            code: LocaleCode::new(code).unwrap(),
            is_default,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn normalizes_slashes() {
        assert_eq!(PublicPath::parse("services/x/").unwrap().as_str(), "/services/x");
        assert_eq!(PublicPath::parse("//a//b").unwrap().as_str(), "/a/b");
        assert_eq!(PublicPath::parse("").unwrap().as_str(), "/");
        assert!(PublicPath::parse("/a?b=1").is_err());
        assert!(PublicPath::parse("/a/../b").is_err());
    }

    #[test]
    fn default_locale_paths_have_no_prefix() {
        let slug = ContentSlug::new("consulting").unwrap();
        let en = locale("en", true);
        let de = locale("de", false);
        assert_eq!(
            PublicPath::for_record(ContentKind::Service, &en, &slug).as_str(),
            "/services/consulting"
        );
        assert_eq!(
            PublicPath::for_record(ContentKind::Employee, &de, &slug).as_str(),
            "/de/team/consulting"
        );
        assert_eq!(PublicPath::home(&en).as_str(), "/");
        assert_eq!(PublicPath::home(&de).as_str(), "/de");
    }
}
