// src/infrastructure/repositories/sqlite_tenant.rs
use super::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::tenant::{
    NewTenant, Tenant, TenantId, TenantName, TenantRepository, TenantSlug,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqliteConnection, SqlitePool};

const TENANT_COLUMNS: &str = "id, slug, name, active, created_at, updated_at";

#[derive(Clone)]
pub struct SqliteTenantRepository {
    pool: SqlitePool,
}

impl SqliteTenantRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct TenantRow {
    id: i64,
    slug: String,
    name: String,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TenantRow> for Tenant {
    type Error = DomainError;

    fn try_from(row: TenantRow) -> Result<Self, Self::Error> {
        Ok(Tenant {
            id: TenantId::new(row.id)?,
            slug: TenantSlug::new(row.slug)?,
            name: TenantName::new(row.name)?,
            active: row.active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

pub(super) async fn find_tenant(
    conn: &mut SqliteConnection,
    id: TenantId,
) -> DomainResult<Option<Tenant>> {
    let row = sqlx::query_as::<_, TenantRow>(&format!(
        "SELECT {TENANT_COLUMNS} FROM tenants WHERE id = ?"
    ))
    .bind(i64::from(id))
    .fetch_optional(&mut *conn)
    .await
    .map_err(map_sqlx)?;

    row.map(Tenant::try_from).transpose()
}

pub(super) async fn insert_tenant(
    conn: &mut SqliteConnection,
    tenant: NewTenant,
) -> DomainResult<Tenant> {
    let row = sqlx::query_as::<_, TenantRow>(&format!(
        "INSERT INTO tenants (slug, name, active, created_at, updated_at) VALUES (?, ?, 1, ?, ?) RETURNING {TENANT_COLUMNS}"
    ))
    .bind(tenant.slug.as_str())
    .bind(tenant.name.as_str())
    .bind(tenant.created_at)
    .bind(tenant.created_at)
    .fetch_one(&mut *conn)
    .await
    .map_err(map_sqlx)?;

    Tenant::try_from(row)
}

pub(super) async fn set_tenant_active(
    conn: &mut SqliteConnection,
    id: TenantId,
    active: bool,
    now: DateTime<Utc>,
) -> DomainResult<Tenant> {
    let row = sqlx::query_as::<_, TenantRow>(&format!(
        "UPDATE tenants SET active = ?, updated_at = ? WHERE id = ? RETURNING {TENANT_COLUMNS}"
    ))
    .bind(active)
    .bind(now)
    .bind(i64::from(id))
    .fetch_optional(&mut *conn)
    .await
    .map_err(map_sqlx)?;

    row.map(Tenant::try_from)
        .transpose()?
        .ok_or_else(|| DomainError::not_found("tenant", id))
}

#[async_trait]
impl TenantRepository for SqliteTenantRepository {
    async fn find_by_id(&self, id: TenantId) -> DomainResult<Option<Tenant>> {
        let mut conn = self.pool.acquire().await.map_err(map_sqlx)?;
        find_tenant(&mut conn, id).await
    }

    async fn find_by_slug(&self, slug: &TenantSlug) -> DomainResult<Option<Tenant>> {
        let row = sqlx::query_as::<_, TenantRow>(&format!(
            "SELECT {TENANT_COLUMNS} FROM tenants WHERE slug = ?"
        ))
        .bind(slug.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Tenant::try_from).transpose()
    }

    async fn list(&self, include_inactive: bool) -> DomainResult<Vec<Tenant>> {
        let sql = if include_inactive {
            format!("SELECT {TENANT_COLUMNS} FROM tenants ORDER BY id")
        } else {
            format!("SELECT {TENANT_COLUMNS} FROM tenants WHERE active = 1 ORDER BY id")
        };
        let rows = sqlx::query_as::<_, TenantRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        rows.into_iter().map(Tenant::try_from).collect()
    }
}
