// src/domain/errors.rs
use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

/// Failure taxonomy shared by every content operation.
///
/// `NotFound` is returned both for absent rows and for rows hidden by tenant or
/// soft-delete scoping; callers cannot tell the two apart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("validation error on {field}: {message}")]
    Validation { field: String, message: String },
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },
    #[error("conflict on {entity_type}.{field}: {message}")]
    Conflict {
        entity_type: String,
        field: String,
        message: String,
    },
    #[error("version conflict on {entity_type} {id}: expected {expected}, actual {actual}")]
    VersionConflict {
        entity_type: String,
        id: i64,
        expected: i64,
        actual: i64,
    },
    #[error("write contention: {0}")]
    Contention(String),
    #[error("persistence error: {0}")]
    Persistence(String),
}

impl DomainError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn not_found(entity_type: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    pub fn conflict(
        entity_type: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Conflict {
            entity_type: entity_type.into(),
            field: field.into(),
            message: message.into(),
        }
    }

    /// Version conflicts and storage contention can be retried with fresh data.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::VersionConflict { .. } | Self::Contention(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_concurrency_failures_are_retryable() {
        let conflict = DomainError::VersionConflict {
            entity_type: "article".into(),
            id: 1,
            expected: 1,
            actual: 2,
        };
        assert!(conflict.is_retryable());
        assert!(DomainError::Contention("busy".into()).is_retryable());
        assert!(!DomainError::not_found("article", 1).is_retryable());
        assert!(!DomainError::conflict("article", "slug", "taken").is_retryable());
    }

    #[test]
    fn messages_carry_structured_detail() {
        let err = DomainError::conflict("service", "slug", "slug already in use");
        assert_eq!(
            err.to_string(),
            "conflict on service.slug: slug already in use"
        );
    }
}
