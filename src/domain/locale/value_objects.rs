use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocaleId(i64);

impl LocaleId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::validation("locale_id", "locale id must be positive"))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<LocaleId> for i64 {
    fn from(value: LocaleId) -> Self {
        value.0
    }
}

/// Language tag in canonical casing: `en`, `de`, `pt-BR`, `zh-Hant`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LocaleCode(String);

impl LocaleCode {
    pub fn new(value: impl AsRef<str>) -> DomainResult<Self> {
        let raw = value.as_ref().trim();
        let invalid = || {
            DomainError::validation(
                "locale",
                format!("`{raw}` is not a supported language tag"),
            )
        };

        let mut parts = raw.split(['-', '_']);
        let language = parts.next().filter(|l| !l.is_empty()).ok_or_else(invalid)?;
        if !(2..=3).contains(&language.len()) || !language.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(invalid());
        }

        let mut canonical = language.to_ascii_lowercase();
        if let Some(subtag) = parts.next() {
            if !(2..=8).contains(&subtag.len()) || !subtag.chars().all(|c| c.is_ascii_alphanumeric())
            {
                return Err(invalid());
            }
            canonical.push('-');
            let all_alpha = subtag.chars().all(|c| c.is_ascii_alphabetic());
            match subtag.len() {
                2 if all_alpha => canonical.push_str(&subtag.to_ascii_uppercase()),
                4 if all_alpha => {
                    let lower = subtag.to_ascii_lowercase();
                    let mut chars = lower.chars();
                    if let Some(first) = chars.next() {
                        canonical.push(first.to_ascii_uppercase());
                        canonical.push_str(chars.as_str());
                    }
                }
                _ => canonical.push_str(&subtag.to_ascii_lowercase()),
            }
        }
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(Self(canonical))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocaleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for LocaleCode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LocaleCode> for String {
    fn from(value: LocaleCode) -> Self {
        value.0
    }
}

/// What to do with content that still uses a locale being removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocaleRemovalMode {
    /// Refuse when live published content has a translation in the locale.
    Reject,
    /// Drop the translations and redirect their public paths to the
    /// default-locale path of the same entity.
    MigrateToDefault,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonicalizes_casing() {
        assert_eq!(LocaleCode::new("EN").unwrap().as_str(), "en");
        assert_eq!(LocaleCode::new("pt_br").unwrap().as_str(), "pt-BR");
        assert_eq!(LocaleCode::new("zh-hant").unwrap().as_str(), "zh-Hant");
        assert_eq!(LocaleCode::new("es-419").unwrap().as_str(), "es-419");
    }

    #[test]
    fn rejects_malformed_tags() {
        for bad in ["", "e", "english", "en-", "en-US-x", "e1"] {
            assert!(LocaleCode::new(bad).is_err(), "{bad} should be rejected");
        }
    }
}
