use crate::domain::errors::{DomainError, DomainResult};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(i64);

impl EntityId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::validation("id", "entity id must be positive"))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<EntityId> for i64 {
    fn from(value: EntityId) -> Self {
        value.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// URL segment: lowercase ASCII letters, digits and single inner hyphens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentSlug(String);

impl ContentSlug {
    const MAX_LEN: usize = 200;

    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(DomainError::validation("slug", "slug cannot be empty"));
        }
        if value.len() > Self::MAX_LEN {
            return Err(DomainError::validation(
                "slug",
                format!("slug exceeds {} characters", Self::MAX_LEN),
            ));
        }
        let charset_ok = value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        if !charset_ok || value.starts_with('-') || value.ends_with('-') || value.contains("--") {
            return Err(DomainError::validation(
                "slug",
                format!("`{value}` is not a valid slug"),
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ContentSlug> for String {
    fn from(value: ContentSlug) -> Self {
        value.0
    }
}

/// Optimistic-locking counter. Starts at 1 and grows by exactly one per write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Version(i64);

impl Version {
    pub const INITIAL: Version = Version(1);

    pub fn new(value: i64) -> DomainResult<Self> {
        if value < 1 {
            Err(DomainError::validation("expected_version", "version starts at 1"))
        } else {
            Ok(Self(value))
        }
    }

    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    pub fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

impl ContentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentStatus::Draft => "draft",
            ContentStatus::Published => "published",
            ContentStatus::Archived => "archived",
        }
    }

    /// Archived content has to go back through draft before it is republished.
    pub fn can_transition_to(self, next: ContentStatus) -> bool {
        use ContentStatus::*;
        matches!(
            (self, next),
            (Draft, Draft)
                | (Published, Published)
                | (Archived, Archived)
                | (Draft, Published)
                | (Draft, Archived)
                | (Published, Draft)
                | (Published, Archived)
                | (Archived, Draft)
        )
    }
}

impl FromStr for ContentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(ContentStatus::Draft),
            "published" => Ok(ContentStatus::Published),
            "archived" => Ok(ContentStatus::Archived),
            other => Err(DomainError::validation(
                "status",
                format!("unknown status `{other}`"),
            )),
        }
    }
}

impl fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keyset cursor for content listings (newest id first).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentListCursor {
    pub last_id: EntityId,
}

impl ContentListCursor {
    pub fn new(last_id: EntityId) -> Self {
        Self { last_id }
    }

    pub fn encode(&self) -> String {
        URL_SAFE_NO_PAD.encode(format!("content|{}", self.last_id).as_bytes())
    }

    pub fn decode(token: &str) -> DomainResult<Self> {
        let invalid = || DomainError::validation("cursor", "invalid cursor token");
        let bytes = URL_SAFE_NO_PAD.decode(token).map_err(|_| invalid())?;
        let raw = String::from_utf8(bytes).map_err(|_| invalid())?;
        let id = raw
            .strip_prefix("content|")
            .and_then(|id| id.parse::<i64>().ok())
            .ok_or_else(invalid)?;
        Ok(Self::new(EntityId::new(id).map_err(|_| invalid())?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_rules() {
        assert!(ContentSlug::new("consulting").is_ok());
        assert!(ContentSlug::new("it-consulting-2024").is_ok());
        for bad in ["", "Consulting", "a b", "-x", "x-", "a--b", "über"] {
            assert!(ContentSlug::new(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn archived_cannot_jump_to_published() {
        assert!(ContentStatus::Draft.can_transition_to(ContentStatus::Published));
        assert!(ContentStatus::Archived.can_transition_to(ContentStatus::Draft));
        assert!(!ContentStatus::Archived.can_transition_to(ContentStatus::Published));
    }

    #[test]
    fn version_increments_by_one() {
        assert_eq!(Version::INITIAL.next().value(), 2);
        assert!(Version::new(0).is_err());
    }

    #[test]
    fn cursor_rejects_foreign_tokens() {
        let cursor = ContentListCursor::new(EntityId::new(42).unwrap());
        let decoded = ContentListCursor::decode(&cursor.encode()).unwrap();
        assert_eq!(decoded, cursor);
        assert!(ContentListCursor::decode("not-base64!").is_err());
        assert!(ContentListCursor::decode(&URL_SAFE_NO_PAD.encode("audit|1")).is_err());
    }
}
