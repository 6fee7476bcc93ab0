// src/infrastructure/repositories/sqlite_redirect.rs
use super::{map_sqlx, scoped};
use crate::domain::content::PublicPath;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::redirect::{NewRedirect, RedirectReadRepository, RedirectRecord, RedirectStatus};
use crate::domain::tenant::{TenantId, TenantScope};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqliteConnection, SqlitePool};

const REDIRECT_COLUMNS: &str = "id, tenant_id, from_path, to_path, status_code, created_at, updated_at";

#[derive(Clone)]
pub struct SqliteRedirectRepository {
    pool: SqlitePool,
}

impl SqliteRedirectRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct RedirectRow {
    id: i64,
    tenant_id: i64,
    from_path: String,
    to_path: String,
    status_code: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<RedirectRow> for RedirectRecord {
    type Error = DomainError;

    fn try_from(row: RedirectRow) -> Result<Self, Self::Error> {
        Ok(RedirectRecord {
            id: row.id,
            tenant_id: TenantId::new(row.tenant_id)?,
            from_path: PublicPath::parse(&row.from_path)?,
            to_path: PublicPath::parse(&row.to_path)?,
            status: RedirectStatus::try_from(row.status_code)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

pub(super) async fn find_redirect(
    conn: &mut SqliteConnection,
    scope: &TenantScope,
    from: &PublicPath,
) -> DomainResult<Option<RedirectRecord>> {
    let mut builder = scoped::select(REDIRECT_COLUMNS, "redirects", None, scope);
    builder.push(" AND from_path = ");
    builder.push_bind(from.as_str().to_string());

    let row = builder
        .build_query_as::<RedirectRow>()
        .fetch_optional(&mut *conn)
        .await
        .map_err(map_sqlx)?;
    row.map(RedirectRecord::try_from).transpose()
}

pub(super) async fn redirects_targeting(
    conn: &mut SqliteConnection,
    scope: &TenantScope,
    to: &PublicPath,
) -> DomainResult<Vec<RedirectRecord>> {
    let mut builder = scoped::select(REDIRECT_COLUMNS, "redirects", None, scope);
    builder.push(" AND to_path = ");
    builder.push_bind(to.as_str().to_string());
    builder.push(" ORDER BY id");

    let rows = builder
        .build_query_as::<RedirectRow>()
        .fetch_all(&mut *conn)
        .await
        .map_err(map_sqlx)?;
    rows.into_iter().map(RedirectRecord::try_from).collect()
}

pub(super) async fn upsert_redirect(
    conn: &mut SqliteConnection,
    scope: &TenantScope,
    redirect: NewRedirect,
) -> DomainResult<RedirectRecord> {
    let row = sqlx::query_as::<_, RedirectRow>(&format!(
        "INSERT INTO redirects (tenant_id, from_path, to_path, status_code, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?) \
         ON CONFLICT (tenant_id, from_path) DO UPDATE SET \
         to_path = excluded.to_path, status_code = excluded.status_code, updated_at = excluded.updated_at \
         RETURNING {REDIRECT_COLUMNS}"
    ))
    .bind(i64::from(scope.tenant_id()))
    .bind(redirect.from_path.as_str())
    .bind(redirect.to_path.as_str())
    .bind(i64::from(redirect.status.code()))
    .bind(redirect.written_at)
    .bind(redirect.written_at)
    .fetch_one(&mut *conn)
    .await
    .map_err(map_sqlx)?;

    RedirectRecord::try_from(row)
}

pub(super) async fn delete_redirect(
    conn: &mut SqliteConnection,
    scope: &TenantScope,
    from: &PublicPath,
) -> DomainResult<Option<RedirectRecord>> {
    let mut builder = scoped::delete("redirects", scope);
    builder.push(" AND from_path = ");
    builder.push_bind(from.as_str().to_string());
    builder.push(format!(" RETURNING {REDIRECT_COLUMNS}"));

    let row = builder
        .build_query_as::<RedirectRow>()
        .fetch_optional(&mut *conn)
        .await
        .map_err(map_sqlx)?;
    row.map(RedirectRecord::try_from).transpose()
}

#[async_trait]
impl RedirectReadRepository for SqliteRedirectRepository {
    async fn find_by_path(
        &self,
        scope: &TenantScope,
        from: &PublicPath,
    ) -> DomainResult<Option<RedirectRecord>> {
        let mut conn = self.pool.acquire().await.map_err(map_sqlx)?;
        find_redirect(&mut conn, scope, from).await
    }

    async fn list(
        &self,
        scope: &TenantScope,
        limit: u32,
        after_id: Option<i64>,
    ) -> DomainResult<Vec<RedirectRecord>> {
        let mut builder = scoped::select(REDIRECT_COLUMNS, "redirects", None, scope);
        if let Some(after_id) = after_id {
            builder.push(" AND id > ");
            builder.push_bind(after_id);
        }
        builder.push(" ORDER BY id LIMIT ");
        builder.push_bind(i64::from(limit.max(1)));

        let rows = builder
            .build_query_as::<RedirectRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;
        rows.into_iter().map(RedirectRecord::try_from).collect()
    }
}
