// src/infrastructure/repositories/error.rs
use crate::domain::content::ContentKind;
use crate::domain::errors::DomainError;
use sqlx::error::ErrorKind;

const SQLITE_BUSY: &str = "5";
const SQLITE_LOCKED: &str = "6";
const SQLITE_BUSY_RECOVERY: &str = "261";
const SQLITE_BUSY_SNAPSHOT: &str = "517";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(code) = db_err.code() {
                if matches!(
                    code.as_ref(),
                    SQLITE_BUSY | SQLITE_LOCKED | SQLITE_BUSY_RECOVERY | SQLITE_BUSY_SNAPSHOT
                ) {
                    return DomainError::Contention(db_err.message().to_string());
                }
            }

            match db_err.kind() {
                ErrorKind::UniqueViolation => unique_violation(db_err.message()),
                ErrorKind::ForeignKeyViolation => {
                    DomainError::not_found("reference", "referenced record not found")
                }
                ErrorKind::CheckViolation => {
                    DomainError::validation("record", db_err.message().to_string())
                }
                _ => DomainError::Persistence(db_err.message().to_string()),
            }
        }
        sqlx::Error::PoolTimedOut => DomainError::Contention("connection pool timed out".into()),
        _ => DomainError::Persistence(err.to_string()),
    }
}

/// SQLite reports unique violations as
/// `UNIQUE constraint failed: table.col_a, table.col_b` without naming the
/// index, so the table and the last column identify the conflict.
fn unique_violation(message: &str) -> DomainError {
    let columns = message
        .rsplit_once(": ")
        .map(|(_, columns)| columns)
        .unwrap_or(message);
    let last = columns.rsplit(", ").next().unwrap_or(columns);
    let Some((table, column)) = last.split_once('.') else {
        return DomainError::conflict("record", "unique", message.to_string());
    };

    let (entity_type, field) = match table {
        "tenants" => ("tenant", column.to_string()),
        "locales" if column == "tenant_id" => ("locale", "is_default".to_string()),
        "locales" => ("locale", column.to_string()),
        "redirects" => ("redirect", column.to_string()),
        _ => match content_table(table) {
            Some((kind, true)) => (kind.entity_type(), format!("translations.{column}")),
            Some((kind, false)) => (kind.entity_type(), column.to_string()),
            None => ("record", column.to_string()),
        },
    };
    DomainError::conflict(entity_type, field, format!("{column} already in use"))
}

fn content_table(table: &str) -> Option<(ContentKind, bool)> {
    ContentKind::ALL.into_iter().find_map(|kind| {
        let descriptor = kind.descriptor();
        if descriptor.table == table {
            Some((kind, false))
        } else if descriptor.translations_table == table {
            Some((kind, true))
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_messages_name_the_entity_and_field() {
        assert_eq!(
            unique_violation("UNIQUE constraint failed: services.tenant_id, services.slug"),
            DomainError::conflict("service", "slug", "slug already in use")
        );
        assert_eq!(
            unique_violation(
                "UNIQUE constraint failed: faq_translations.locale_id, faq_translations.slug"
            ),
            DomainError::conflict("faq", "translations.slug", "slug already in use")
        );
        assert_eq!(
            unique_violation("UNIQUE constraint failed: tenants.slug"),
            DomainError::conflict("tenant", "slug", "slug already in use")
        );
        assert_eq!(
            unique_violation("UNIQUE constraint failed: locales.tenant_id"),
            DomainError::conflict("locale", "is_default", "tenant_id already in use")
        );
    }

    #[test]
    fn unparseable_message_is_still_a_conflict() {
        assert!(matches!(
            unique_violation("something odd"),
            DomainError::Conflict { .. }
        ));
    }
}
