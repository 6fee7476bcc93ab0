// src/application/error.rs
use crate::domain::errors::DomainError;
use thiserror::Error;

pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("infrastructure failure: {0}")]
    Infrastructure(String),
}

/// Coarse classification callers branch on (HTTP status, retry policy).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    VersionConflict,
    Validation,
    Contention,
    Internal,
}

impl ApplicationError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn infrastructure(msg: impl Into<String>) -> Self {
        Self::Infrastructure(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(err) => match err {
                DomainError::Validation { .. } => ErrorKind::Validation,
                DomainError::NotFound { .. } => ErrorKind::NotFound,
                DomainError::Conflict { .. } => ErrorKind::Conflict,
                DomainError::VersionConflict { .. } => ErrorKind::VersionConflict,
                DomainError::Contention(_) => ErrorKind::Contention,
                DomainError::Persistence(_) => ErrorKind::Internal,
            },
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::Infrastructure(_) => ErrorKind::Internal,
        }
    }

    /// Version conflicts and contention succeed on retry with fresh data.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::VersionConflict | ErrorKind::Contention
        )
    }
}
