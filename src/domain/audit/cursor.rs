use crate::domain::errors::{DomainError, DomainResult};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};

/// Keyset position in the newest-first audit listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntryCursor {
    pub occurred_at: DateTime<Utc>,
    pub id: i64,
}

impl AuditEntryCursor {
    pub fn new(occurred_at: DateTime<Utc>, id: i64) -> Self {
        Self { occurred_at, id }
    }

    pub fn encode(&self) -> String {
        let raw = format!("{}|{}", self.occurred_at.to_rfc3339(), self.id);
        URL_SAFE_NO_PAD.encode(raw.as_bytes())
    }

    pub fn decode(token: &str) -> DomainResult<Self> {
        let invalid = || DomainError::validation("cursor", "invalid cursor token");
        let bytes = URL_SAFE_NO_PAD.decode(token).map_err(|_| invalid())?;
        let raw = String::from_utf8(bytes).map_err(|_| invalid())?;
        let (occurred_at, id) = raw.split_once('|').ok_or_else(invalid)?;
        let occurred_at = DateTime::parse_from_rfc3339(occurred_at)
            .map_err(|_| invalid())?
            .with_timezone(&Utc);
        let id = id.parse::<i64>().map_err(|_| invalid())?;
        Ok(Self::new(occurred_at, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_keeps_position() {
        let now = Utc::now();
        let cursor = AuditEntryCursor::new(now, 42);
        let decoded = AuditEntryCursor::decode(&cursor.encode()).expect("decode should succeed");
        assert_eq!(decoded.id, 42);
        assert_eq!(decoded.occurred_at.timestamp(), now.timestamp());
    }

    #[test]
    fn garbage_is_a_validation_error() {
        assert!(matches!(
            AuditEntryCursor::decode("%%%"),
            Err(DomainError::Validation { .. })
        ));
        let no_separator = URL_SAFE_NO_PAD.encode("2024-01-01T00:00:00Z");
        assert!(AuditEntryCursor::decode(&no_separator).is_err());
    }
}
