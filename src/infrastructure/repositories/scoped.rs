// src/infrastructure/repositories/scoped.rs
//! Query builders that cannot be created without a tenant predicate.
use crate::domain::tenant::{TenantScope, Visibility};
use sqlx::{QueryBuilder, Sqlite};

/// `SELECT {columns} FROM {from} WHERE {alias}tenant_id = ?`.
///
/// Further conditions are appended with `AND`.
pub(super) fn select<'a>(
    columns: &str,
    from: &str,
    alias: Option<&str>,
    scope: &TenantScope,
) -> QueryBuilder<'a, Sqlite> {
    let mut builder = QueryBuilder::new(format!("SELECT {columns} FROM {from} WHERE "));
    push_tenant(&mut builder, alias, scope);
    builder
}

/// `DELETE FROM {table} WHERE tenant_id = ?`.
pub(super) fn delete<'a>(table: &str, scope: &TenantScope) -> QueryBuilder<'a, Sqlite> {
    let mut builder = QueryBuilder::new(format!("DELETE FROM {table} WHERE "));
    push_tenant(&mut builder, None, scope);
    builder
}

fn push_tenant(builder: &mut QueryBuilder<'_, Sqlite>, alias: Option<&str>, scope: &TenantScope) {
    if let Some(alias) = alias {
        builder.push(alias);
        builder.push(".");
    }
    builder.push("tenant_id = ");
    builder.push_bind(i64::from(scope.tenant_id()));
}

pub(super) fn push_visibility(
    builder: &mut QueryBuilder<'_, Sqlite>,
    alias: Option<&str>,
    visibility: Visibility,
) {
    let column = match alias {
        Some(alias) => format!("{alias}.deleted_at"),
        None => "deleted_at".to_string(),
    };
    match visibility {
        Visibility::Live => {
            builder.push(format!(" AND {column} IS NULL"));
        }
        Visibility::TrashOnly => {
            builder.push(format!(" AND {column} IS NOT NULL"));
        }
        Visibility::WithTrashed => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tenant::{Tenant, TenantId, TenantName, TenantSlug};
    use chrono::Utc;

    fn scope() -> TenantScope {
        let tenant = Tenant {
            id: TenantId::new(7).unwrap(),
            slug: TenantSlug::new("acme").unwrap(),
            name: TenantName::new("Acme").unwrap(),
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        TenantScope::for_tenant(&tenant).unwrap()
    }

    #[test]
    fn every_select_starts_with_the_tenant_predicate() {
        let mut builder = select("id", "articles", None, &scope());
        push_visibility(&mut builder, None, Visibility::Live);
        assert_eq!(
            builder.sql(),
            "SELECT id FROM articles WHERE tenant_id = ? AND deleted_at IS NULL"
        );

        let mut aliased = select("e.id", "faqs e", Some("e"), &scope());
        push_visibility(&mut aliased, Some("e"), Visibility::TrashOnly);
        assert_eq!(
            aliased.sql(),
            "SELECT e.id FROM faqs e WHERE e.tenant_id = ? AND e.deleted_at IS NOT NULL"
        );
    }

    #[test]
    fn deletes_are_scoped_too() {
        assert_eq!(
            delete("redirects", &scope()).sql(),
            "DELETE FROM redirects WHERE tenant_id = ?"
        );
    }
}
