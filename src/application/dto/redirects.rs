use crate::domain::redirect::RedirectRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::serde_time;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedirectDto {
    pub id: i64,
    pub from_path: String,
    pub to_path: String,
    pub status_code: u16,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
}

impl From<RedirectRecord> for RedirectDto {
    fn from(record: RedirectRecord) -> Self {
        Self {
            id: record.id,
            from_path: record.from_path.into(),
            to_path: record.to_path.into(),
            status_code: record.status.code(),
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Answer of a redirect lookup: where to send the client and how.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectTarget {
    pub location: String,
    pub status_code: u16,
}
