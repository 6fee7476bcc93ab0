// src/infrastructure/repositories/sqlite_content.rs
//! One implementation for every content kind. Table names come from the
//! kind's descriptor; all other SQL is shared.
use super::{map_sqlx, scoped};
use crate::domain::concurrency::CasOutcome;
use crate::domain::content::{
    ContentEntity, ContentKind, ContentListCursor, ContentListFilter, ContentReadRepository,
    ContentSlug, ContentStatus, ContentWrite, EntityId, LocalizedRecord, TranslationWrite,
    Version,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::locale::{LocaleCode, LocaleId};
use crate::domain::tenant::{TenantId, TenantScope, Visibility};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqliteConnection, SqlitePool};
use std::collections::HashMap;

const ENTITY_COLUMNS: &str = "e.id, e.tenant_id, e.slug, e.status, e.version, e.attributes, e.published_at, e.created_at, e.updated_at, e.deleted_at";

#[derive(Clone)]
pub struct SqliteContentRepository {
    pool: SqlitePool,
}

impl SqliteContentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct EntityRow {
    id: i64,
    tenant_id: i64,
    slug: String,
    status: String,
    version: i64,
    attributes: String,
    published_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, FromRow)]
struct TranslationRow {
    id: i64,
    entity_id: i64,
    locale_id: i64,
    locale_code: String,
    slug: String,
    title: String,
    fields: String,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TranslationRow> for LocalizedRecord {
    type Error = DomainError;

    fn try_from(row: TranslationRow) -> Result<Self, Self::Error> {
        Ok(LocalizedRecord {
            id: row.id,
            locale_id: LocaleId::new(row.locale_id)?,
            locale_code: LocaleCode::new(&row.locale_code)?,
            slug: ContentSlug::new(row.slug)?,
            title: row.title,
            fields: decode_json(&row.fields)?,
            updated_at: row.updated_at,
        })
    }
}

fn entity_from_row(
    kind: ContentKind,
    row: EntityRow,
    translations: Vec<LocalizedRecord>,
) -> DomainResult<ContentEntity> {
    Ok(ContentEntity {
        id: EntityId::new(row.id)?,
        tenant_id: TenantId::new(row.tenant_id)?,
        kind,
        slug: ContentSlug::new(row.slug)?,
        status: row.status.parse::<ContentStatus>()?,
        version: Version::new(row.version)?,
        attributes: decode_json::<Map<String, Value>>(&row.attributes)?,
        translations,
        published_at: row.published_at,
        created_at: row.created_at,
        updated_at: row.updated_at,
        deleted_at: row.deleted_at,
    })
}

fn decode_json<T: serde::de::DeserializeOwned>(raw: &str) -> DomainResult<T> {
    serde_json::from_str(raw)
        .map_err(|err| DomainError::Persistence(format!("corrupt json column: {err}")))
}

fn encode_json<T: serde::Serialize>(value: &T) -> DomainResult<String> {
    serde_json::to_string(value)
        .map_err(|err| DomainError::Persistence(format!("unserializable json column: {err}")))
}

fn entity_select<'a>(kind: ContentKind, scope: &TenantScope) -> QueryBuilder<'a, Sqlite> {
    let from = format!("{} e", kind.descriptor().table);
    scoped::select(ENTITY_COLUMNS, &from, Some("e"), scope)
}

/// Attach translations to a batch of entity rows, keeping row order.
async fn hydrate(
    conn: &mut SqliteConnection,
    scope: &TenantScope,
    kind: ContentKind,
    rows: Vec<EntityRow>,
) -> DomainResult<Vec<ContentEntity>> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let from = format!(
        "{} t JOIN locales l ON l.id = t.locale_id",
        kind.descriptor().translations_table
    );
    let mut builder = scoped::select(
        "t.id, t.entity_id, t.locale_id, l.code AS locale_code, t.slug, t.title, t.fields, t.updated_at",
        &from,
        Some("t"),
        scope,
    );
    builder.push(" AND t.entity_id IN (");
    let mut ids = builder.separated(", ");
    for row in &rows {
        ids.push_bind(row.id);
    }
    builder.push(") ORDER BY t.entity_id, l.code");

    let translation_rows = builder
        .build_query_as::<TranslationRow>()
        .fetch_all(&mut *conn)
        .await
        .map_err(map_sqlx)?;

    let mut by_entity: HashMap<i64, Vec<LocalizedRecord>> = HashMap::new();
    for row in translation_rows {
        let entity_id = row.entity_id;
        by_entity
            .entry(entity_id)
            .or_default()
            .push(LocalizedRecord::try_from(row)?);
    }

    rows.into_iter()
        .map(|row| {
            let translations = by_entity.remove(&row.id).unwrap_or_default();
            entity_from_row(kind, row, translations)
        })
        .collect()
}

async fn fetch_entities(
    conn: &mut SqliteConnection,
    scope: &TenantScope,
    kind: ContentKind,
    mut builder: QueryBuilder<'_, Sqlite>,
) -> DomainResult<Vec<ContentEntity>> {
    let rows = builder
        .build_query_as::<EntityRow>()
        .fetch_all(&mut *conn)
        .await
        .map_err(map_sqlx)?;
    hydrate(conn, scope, kind, rows).await
}

pub(super) async fn find_content(
    conn: &mut SqliteConnection,
    scope: &TenantScope,
    kind: ContentKind,
    id: EntityId,
    visibility: Visibility,
) -> DomainResult<Option<ContentEntity>> {
    let mut builder = entity_select(kind, scope);
    builder.push(" AND e.id = ");
    builder.push_bind(i64::from(id));
    scoped::push_visibility(&mut builder, Some("e"), visibility);

    Ok(fetch_entities(conn, scope, kind, builder).await?.pop())
}

pub(super) async fn find_by_localized_slug(
    conn: &mut SqliteConnection,
    scope: &TenantScope,
    kind: ContentKind,
    locale_id: LocaleId,
    slug: &ContentSlug,
) -> DomainResult<Option<ContentEntity>> {
    let descriptor = kind.descriptor();
    let from = format!(
        "{} e JOIN {} t ON t.entity_id = e.id AND t.tenant_id = e.tenant_id",
        descriptor.table, descriptor.translations_table
    );
    let mut builder = scoped::select(ENTITY_COLUMNS, &from, Some("e"), scope);
    builder.push(" AND t.locale_id = ");
    builder.push_bind(i64::from(locale_id));
    builder.push(" AND t.slug = ");
    builder.push_bind(slug.as_str().to_string());
    builder.push(" AND t.deleted_at IS NULL");
    scoped::push_visibility(&mut builder, Some("e"), Visibility::Live);

    Ok(fetch_entities(conn, scope, kind, builder).await?.pop())
}

pub(super) async fn list_page(
    conn: &mut SqliteConnection,
    scope: &TenantScope,
    kind: ContentKind,
    filter: ContentListFilter,
    limit: u32,
    cursor: Option<ContentListCursor>,
) -> DomainResult<(Vec<ContentEntity>, Option<String>)> {
    let limit = limit.clamp(1, 100);
    let mut builder = entity_select(kind, scope);
    scoped::push_visibility(&mut builder, Some("e"), filter.visibility);
    if let Some(status) = filter.status {
        builder.push(" AND e.status = ");
        builder.push_bind(status.as_str());
    }
    if let Some(cursor) = cursor {
        builder.push(" AND e.id < ");
        builder.push_bind(i64::from(cursor.last_id));
    }
    builder.push(" ORDER BY e.id DESC LIMIT ");
    builder.push_bind(i64::from(limit) + 1);

    let mut entities = fetch_entities(conn, scope, kind, builder).await?;

    let mut next_cursor = None;
    if entities.len() > limit as usize {
        entities.pop();
        if let Some(last) = entities.last() {
            next_cursor = Some(ContentListCursor::new(last.id).encode());
        }
    }
    Ok((entities, next_cursor))
}

pub(super) async fn current_version(
    conn: &mut SqliteConnection,
    scope: &TenantScope,
    kind: ContentKind,
    id: EntityId,
) -> DomainResult<Option<Version>> {
    let from = kind.descriptor().table;
    let mut builder = scoped::select("version", from, None, scope);
    builder.push(" AND id = ");
    builder.push_bind(i64::from(id));

    let version: Option<i64> = builder
        .build_query_scalar()
        .fetch_optional(&mut *conn)
        .await
        .map_err(map_sqlx)?;
    version.map(Version::new).transpose()
}

pub(super) async fn entity_slug_owner(
    conn: &mut SqliteConnection,
    scope: &TenantScope,
    kind: ContentKind,
    slug: &ContentSlug,
    exclude: Option<EntityId>,
) -> DomainResult<Option<EntityId>> {
    let mut builder = scoped::select("id", kind.descriptor().table, None, scope);
    builder.push(" AND slug = ");
    builder.push_bind(slug.as_str().to_string());
    scoped::push_visibility(&mut builder, None, Visibility::Live);
    if let Some(exclude) = exclude {
        builder.push(" AND id <> ");
        builder.push_bind(i64::from(exclude));
    }
    builder.push(" LIMIT 1");

    let owner: Option<i64> = builder
        .build_query_scalar()
        .fetch_optional(&mut *conn)
        .await
        .map_err(map_sqlx)?;
    owner.map(EntityId::new).transpose()
}

pub(super) async fn localized_slug_owner(
    conn: &mut SqliteConnection,
    scope: &TenantScope,
    kind: ContentKind,
    locale_id: LocaleId,
    slug: &ContentSlug,
    exclude: Option<EntityId>,
) -> DomainResult<Option<EntityId>> {
    let mut builder = scoped::select(
        "entity_id",
        kind.descriptor().translations_table,
        None,
        scope,
    );
    builder.push(" AND locale_id = ");
    builder.push_bind(i64::from(locale_id));
    builder.push(" AND slug = ");
    builder.push_bind(slug.as_str().to_string());
    scoped::push_visibility(&mut builder, None, Visibility::Live);
    if let Some(exclude) = exclude {
        builder.push(" AND entity_id <> ");
        builder.push_bind(i64::from(exclude));
    }
    builder.push(" LIMIT 1");

    let owner: Option<i64> = builder
        .build_query_scalar()
        .fetch_optional(&mut *conn)
        .await
        .map_err(map_sqlx)?;
    owner.map(EntityId::new).transpose()
}

/// Make the stored translations match `translations` exactly. Rows whose
/// content is unchanged keep their id and `updated_at`.
async fn sync_translations(
    conn: &mut SqliteConnection,
    scope: &TenantScope,
    kind: ContentKind,
    entity_id: i64,
    translations: &[TranslationWrite],
    deleted_at: Option<DateTime<Utc>>,
    written_at: DateTime<Utc>,
) -> DomainResult<()> {
    let table = kind.descriptor().translations_table;

    let mut stale = scoped::delete(table, scope);
    stale.push(" AND entity_id = ");
    stale.push_bind(entity_id);
    if !translations.is_empty() {
        stale.push(" AND locale_id NOT IN (");
        let mut kept = stale.separated(", ");
        for translation in translations {
            kept.push_bind(i64::from(translation.locale_id));
        }
        stale.push(")");
    }
    stale
        .build()
        .execute(&mut *conn)
        .await
        .map_err(map_sqlx)?;

    let upsert = format!(
        "INSERT INTO {table} (tenant_id, entity_id, locale_id, slug, title, fields, updated_at, deleted_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?) \
         ON CONFLICT (entity_id, locale_id) DO UPDATE SET \
         updated_at = CASE WHEN slug IS excluded.slug AND title IS excluded.title AND fields IS excluded.fields \
         THEN updated_at ELSE excluded.updated_at END, \
         slug = excluded.slug, title = excluded.title, fields = excluded.fields, deleted_at = excluded.deleted_at \
         WHERE tenant_id = excluded.tenant_id"
    );
    for translation in translations {
        let fields = encode_json(&translation.fields)?;
        sqlx::query(&upsert)
            .bind(i64::from(scope.tenant_id()))
            .bind(entity_id)
            .bind(i64::from(translation.locale_id))
            .bind(translation.slug.as_str())
            .bind(translation.title.as_str())
            .bind(fields)
            .bind(written_at)
            .bind(deleted_at)
            .execute(&mut *conn)
            .await
            .map_err(map_sqlx)?;
    }
    Ok(())
}

pub(super) async fn insert_content(
    conn: &mut SqliteConnection,
    scope: &TenantScope,
    kind: ContentKind,
    write: ContentWrite,
) -> DomainResult<ContentEntity> {
    let table = kind.descriptor().table;
    let id = sqlx::query_scalar::<_, i64>(&format!(
        "INSERT INTO {table} (tenant_id, slug, status, version, attributes, published_at, created_at, updated_at, deleted_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING id"
    ))
    .bind(i64::from(scope.tenant_id()))
    .bind(write.slug.as_str())
    .bind(write.status.as_str())
    .bind(Version::INITIAL.value())
    .bind(encode_json(&write.attributes)?)
    .bind(write.published_at)
    .bind(write.written_at)
    .bind(write.written_at)
    .bind(write.deleted_at)
    .fetch_one(&mut *conn)
    .await
    .map_err(map_sqlx)?;

    sync_translations(
        conn,
        scope,
        kind,
        id,
        &write.translations,
        write.deleted_at,
        write.written_at,
    )
    .await?;

    let id = EntityId::new(id)?;
    find_content(conn, scope, kind, id, Visibility::WithTrashed)
        .await?
        .ok_or_else(|| DomainError::Persistence(format!("inserted {kind} {id} vanished")))
}

pub(super) async fn compare_and_set(
    conn: &mut SqliteConnection,
    scope: &TenantScope,
    kind: ContentKind,
    id: EntityId,
    expected: Version,
    write: ContentWrite,
) -> DomainResult<CasOutcome> {
    let table = kind.descriptor().table;
    let result = sqlx::query(&format!(
        "UPDATE {table} SET slug = ?, status = ?, version = version + 1, attributes = ?, \
         published_at = ?, deleted_at = ?, updated_at = ? \
         WHERE tenant_id = ? AND id = ? AND version = ?"
    ))
    .bind(write.slug.as_str())
    .bind(write.status.as_str())
    .bind(encode_json(&write.attributes)?)
    .bind(write.published_at)
    .bind(write.deleted_at)
    .bind(write.written_at)
    .bind(i64::from(scope.tenant_id()))
    .bind(i64::from(id))
    .bind(expected.value())
    .execute(&mut *conn)
    .await
    .map_err(map_sqlx)?;

    if result.rows_affected() == 0 {
        return Ok(match current_version(conn, scope, kind, id).await? {
            Some(actual) => CasOutcome::Stale { actual },
            None => CasOutcome::Missing,
        });
    }

    sync_translations(
        conn,
        scope,
        kind,
        i64::from(id),
        &write.translations,
        write.deleted_at,
        write.written_at,
    )
    .await?;

    let entity = find_content(conn, scope, kind, id, Visibility::WithTrashed)
        .await?
        .ok_or_else(|| DomainError::not_found(kind.entity_type(), id))?;
    Ok(CasOutcome::Applied(entity))
}

pub(super) async fn entities_with_locale(
    conn: &mut SqliteConnection,
    scope: &TenantScope,
    kind: ContentKind,
    locale_id: LocaleId,
) -> DomainResult<Vec<ContentEntity>> {
    let descriptor = kind.descriptor();
    let mut builder = entity_select(kind, scope);
    builder.push(format!(
        " AND e.id IN (SELECT entity_id FROM {} WHERE locale_id = ",
        descriptor.translations_table
    ));
    builder.push_bind(i64::from(locale_id));
    builder.push(") ORDER BY e.id");

    fetch_entities(conn, scope, kind, builder).await
}

pub(super) async fn public_entities(
    conn: &mut SqliteConnection,
    scope: &TenantScope,
    kind: ContentKind,
) -> DomainResult<Vec<ContentEntity>> {
    let mut builder = entity_select(kind, scope);
    builder.push(" AND e.status = ");
    builder.push_bind(ContentStatus::Published.as_str());
    scoped::push_visibility(&mut builder, Some("e"), Visibility::Live);
    builder.push(" ORDER BY e.id");

    fetch_entities(conn, scope, kind, builder).await
}

pub(super) async fn purge_content(
    conn: &mut SqliteConnection,
    scope: &TenantScope,
    kind: ContentKind,
    id: EntityId,
) -> DomainResult<bool> {
    let mut builder = scoped::delete(kind.descriptor().table, scope);
    builder.push(" AND id = ");
    builder.push_bind(i64::from(id));
    scoped::push_visibility(&mut builder, None, Visibility::TrashOnly);

    let result = builder
        .build()
        .execute(&mut *conn)
        .await
        .map_err(map_sqlx)?;
    Ok(result.rows_affected() > 0)
}

#[async_trait]
impl ContentReadRepository for SqliteContentRepository {
    async fn find_by_id(
        &self,
        scope: &TenantScope,
        kind: ContentKind,
        id: EntityId,
        visibility: Visibility,
    ) -> DomainResult<Option<ContentEntity>> {
        let mut conn = self.pool.acquire().await.map_err(map_sqlx)?;
        find_content(&mut conn, scope, kind, id, visibility).await
    }

    async fn find_by_localized_slug(
        &self,
        scope: &TenantScope,
        kind: ContentKind,
        locale_id: LocaleId,
        slug: &ContentSlug,
    ) -> DomainResult<Option<ContentEntity>> {
        let mut conn = self.pool.acquire().await.map_err(map_sqlx)?;
        find_by_localized_slug(&mut conn, scope, kind, locale_id, slug).await
    }

    async fn list_page(
        &self,
        scope: &TenantScope,
        kind: ContentKind,
        filter: ContentListFilter,
        limit: u32,
        cursor: Option<ContentListCursor>,
    ) -> DomainResult<(Vec<ContentEntity>, Option<String>)> {
        let mut conn = self.pool.acquire().await.map_err(map_sqlx)?;
        list_page(&mut conn, scope, kind, filter, limit, cursor).await
    }

    async fn current_version(
        &self,
        scope: &TenantScope,
        kind: ContentKind,
        id: EntityId,
    ) -> DomainResult<Option<Version>> {
        let mut conn = self.pool.acquire().await.map_err(map_sqlx)?;
        current_version(&mut conn, scope, kind, id).await
    }
}
