// src/infrastructure/repositories/sqlite_locale.rs
use super::{map_sqlx, scoped};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::locale::{Locale, LocaleCode, LocaleId, LocaleRepository, NewLocale};
use crate::domain::tenant::{TenantId, TenantScope};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqliteConnection, SqlitePool};

const LOCALE_COLUMNS: &str = "id, tenant_id, code, is_default, created_at";

#[derive(Clone)]
pub struct SqliteLocaleRepository {
    pool: SqlitePool,
}

impl SqliteLocaleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct LocaleRow {
    id: i64,
    tenant_id: i64,
    code: String,
    is_default: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<LocaleRow> for Locale {
    type Error = DomainError;

    fn try_from(row: LocaleRow) -> Result<Self, Self::Error> {
        Ok(Locale {
            id: LocaleId::new(row.id)?,
            tenant_id: TenantId::new(row.tenant_id)?,
            code: LocaleCode::new(&row.code)?,
            is_default: row.is_default,
            created_at: row.created_at,
        })
    }
}

pub(super) async fn list_locales(
    conn: &mut SqliteConnection,
    scope: &TenantScope,
) -> DomainResult<Vec<Locale>> {
    let mut builder = scoped::select(LOCALE_COLUMNS, "locales", None, scope);
    builder.push(" ORDER BY id");
    let rows = builder
        .build_query_as::<LocaleRow>()
        .fetch_all(&mut *conn)
        .await
        .map_err(map_sqlx)?;

    rows.into_iter().map(Locale::try_from).collect()
}

pub(super) async fn insert_locale(
    conn: &mut SqliteConnection,
    scope: &TenantScope,
    locale: NewLocale,
) -> DomainResult<Locale> {
    let row = sqlx::query_as::<_, LocaleRow>(&format!(
        "INSERT INTO locales (tenant_id, code, is_default, created_at) VALUES (?, ?, ?, ?) RETURNING {LOCALE_COLUMNS}"
    ))
    .bind(i64::from(scope.tenant_id()))
    .bind(locale.code.as_str())
    .bind(locale.is_default)
    .bind(locale.created_at)
    .fetch_one(&mut *conn)
    .await
    .map_err(map_sqlx)?;

    Locale::try_from(row)
}

pub(super) async fn set_default_locale(
    conn: &mut SqliteConnection,
    scope: &TenantScope,
    id: LocaleId,
) -> DomainResult<()> {
    let tenant_id = i64::from(scope.tenant_id());
    // Clear first: the partial unique index allows one default per tenant.
    sqlx::query("UPDATE locales SET is_default = 0 WHERE tenant_id = ? AND is_default = 1")
        .bind(tenant_id)
        .execute(&mut *conn)
        .await
        .map_err(map_sqlx)?;

    let result = sqlx::query("UPDATE locales SET is_default = 1 WHERE tenant_id = ? AND id = ?")
        .bind(tenant_id)
        .bind(i64::from(id))
        .execute(&mut *conn)
        .await
        .map_err(map_sqlx)?;

    if result.rows_affected() == 0 {
        return Err(DomainError::not_found("locale", i64::from(id)));
    }
    Ok(())
}

pub(super) async fn delete_locale(
    conn: &mut SqliteConnection,
    scope: &TenantScope,
    id: LocaleId,
) -> DomainResult<()> {
    let mut builder = scoped::delete("locales", scope);
    builder.push(" AND id = ");
    builder.push_bind(i64::from(id));
    let result = builder
        .build()
        .execute(&mut *conn)
        .await
        .map_err(map_sqlx)?;

    if result.rows_affected() == 0 {
        return Err(DomainError::not_found("locale", i64::from(id)));
    }
    Ok(())
}

#[async_trait]
impl LocaleRepository for SqliteLocaleRepository {
    async fn list_for_tenant(&self, scope: &TenantScope) -> DomainResult<Vec<Locale>> {
        let mut conn = self.pool.acquire().await.map_err(map_sqlx)?;
        list_locales(&mut conn, scope).await
    }
}
