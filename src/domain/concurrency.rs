// src/domain/concurrency.rs
//! Optimistic locking.
//!
//! Writers pass the version they read. The store compares and increments in
//! one statement and reports the outcome; this module turns outcomes into
//! entities or typed errors.
use crate::domain::content::{ContentEntity, ContentKind, EntityId, Version};
use crate::domain::errors::{DomainError, DomainResult};

#[derive(Debug, Clone, PartialEq)]
pub enum CasOutcome {
    /// Stored version matched; the row now carries `expected + 1`.
    Applied(ContentEntity),
    /// Another writer got there first.
    Stale { actual: Version },
    Missing,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConcurrencyGuard;

impl ConcurrencyGuard {
    /// Cheap pre-check against the state read inside the transaction. The
    /// atomic check in the store remains authoritative.
    pub fn ensure_current(entity: &ContentEntity, expected: Version) -> DomainResult<()> {
        if entity.version == expected {
            Ok(())
        } else {
            Err(Self::conflict(entity.kind, entity.id, expected, entity.version))
        }
    }

    pub fn settle(
        kind: ContentKind,
        id: EntityId,
        expected: Version,
        outcome: CasOutcome,
    ) -> DomainResult<ContentEntity> {
        match outcome {
            CasOutcome::Applied(entity) => {
                debug_assert_eq!(entity.version, expected.next());
                Ok(entity)
            }
            CasOutcome::Stale { actual } => Err(Self::conflict(kind, id, expected, actual)),
            CasOutcome::Missing => Err(DomainError::not_found(kind.entity_type(), id)),
        }
    }

    pub fn conflict(
        kind: ContentKind,
        id: EntityId,
        expected: Version,
        actual: Version,
    ) -> DomainError {
        DomainError::VersionConflict {
            entity_type: kind.entity_type().to_string(),
            id: i64::from(id),
            expected: expected.value(),
            actual: actual.value(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_outcome_reports_both_versions() {
        let id = EntityId::new(4).unwrap();
        let expected = Version::INITIAL;
        let actual = Version::new(2).unwrap();
        let err = ConcurrencyGuard::settle(
            ContentKind::Article,
            id,
            expected,
            CasOutcome::Stale { actual },
        )
        .unwrap_err();

        assert_eq!(
            err,
            DomainError::VersionConflict {
                entity_type: "article".into(),
                id: 4,
                expected: 1,
                actual: 2,
            }
        );
        assert!(err.is_retryable());
    }

    #[test]
    fn missing_row_is_not_found() {
        let err = ConcurrencyGuard::settle(
            ContentKind::Faq,
            EntityId::new(5).unwrap(),
            Version::INITIAL,
            CasOutcome::Missing,
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
