// src/domain/redirect/entity.rs
use crate::domain::content::PublicPath;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::tenant::TenantId;
use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RedirectStatus {
    #[default]
    MovedPermanently,
    Found,
    TemporaryRedirect,
    PermanentRedirect,
}

impl RedirectStatus {
    pub fn code(self) -> u16 {
        match self {
            RedirectStatus::MovedPermanently => 301,
            RedirectStatus::Found => 302,
            RedirectStatus::TemporaryRedirect => 307,
            RedirectStatus::PermanentRedirect => 308,
        }
    }
}

impl TryFrom<i64> for RedirectStatus {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            301 => Ok(RedirectStatus::MovedPermanently),
            302 => Ok(RedirectStatus::Found),
            307 => Ok(RedirectStatus::TemporaryRedirect),
            308 => Ok(RedirectStatus::PermanentRedirect),
            other => Err(DomainError::validation(
                "status_code",
                format!("{other} is not a redirect status"),
            )),
        }
    }
}

impl fmt::Display for RedirectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RedirectRecord {
    pub id: i64,
    pub tenant_id: TenantId,
    pub from_path: PublicPath,
    pub to_path: PublicPath,
    pub status: RedirectStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RedirectRecord {
    pub fn snapshot(&self) -> Value {
        json!({
            "from_path": self.from_path.as_str(),
            "to_path": self.to_path.as_str(),
            "status_code": self.status.code(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct NewRedirect {
    pub from_path: PublicPath,
    pub to_path: PublicPath,
    pub status: RedirectStatus,
    pub written_at: DateTime<Utc>,
}

impl NewRedirect {
    pub fn new(
        from_path: PublicPath,
        to_path: PublicPath,
        status: RedirectStatus,
        written_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        if from_path == to_path {
            return Err(DomainError::conflict(
                "redirect",
                "to_path",
                format!("{from_path} cannot redirect to itself"),
            ));
        }
        Ok(Self {
            from_path,
            to_path,
            status,
            written_at,
        })
    }
}
