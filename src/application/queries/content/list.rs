// src/application/queries/content/list.rs
use super::ContentQueryService;
use crate::{
    application::{
        context::RequestContext,
        dto::{ContentDto, CursorPage, LocalizedContentDto, normalize_limit},
        error::ApplicationResult,
    },
    domain::{
        content::{ContentKind, ContentListFilter, ContentStatus, Resolution},
        tenant::Visibility,
    },
};

pub struct ListContentQuery {
    pub kind: ContentKind,
    pub status: Option<ContentStatus>,
    pub visibility: Visibility,
    pub limit: u32,
    pub cursor: Option<String>,
}

impl ListContentQuery {
    pub fn new(kind: ContentKind) -> Self {
        Self {
            kind,
            status: None,
            visibility: Visibility::Live,
            limit: 0,
            cursor: None,
        }
    }
}

pub struct ListPublicContentQuery {
    pub kind: ContentKind,
    pub locale: Option<String>,
    pub limit: u32,
    pub cursor: Option<String>,
}

impl ContentQueryService {
    pub async fn list_admin(
        &self,
        ctx: &RequestContext,
        query: ListContentQuery,
    ) -> ApplicationResult<CursorPage<ContentDto>> {
        let scope = self.tenants.scope(ctx.tenant_id).await?;
        let cursor = self.decode_cursor(query.cursor.as_deref())?;
        let filter = ContentListFilter {
            status: query.status,
            visibility: query.visibility,
        };

        let (records, next_cursor) = self
            .content
            .list_page(&scope, query.kind, filter, normalize_limit(query.limit), cursor)
            .await?;
        let locales = self.locale_set(&scope).await?;

        let items = records
            .iter()
            .map(|entity| ContentDto::from_entity(entity, &locales))
            .collect();
        Ok(CursorPage::new(items, next_cursor))
    }

    /// Admin trash view.
    pub async fn list_trash(
        &self,
        ctx: &RequestContext,
        kind: ContentKind,
        limit: u32,
        cursor: Option<String>,
    ) -> ApplicationResult<CursorPage<ContentDto>> {
        self.list_admin(
            ctx,
            ListContentQuery {
                kind,
                status: None,
                visibility: Visibility::TrashOnly,
                limit,
                cursor,
            },
        )
        .await
    }

    /// Published, live entities resolved for one language. Entities with no
    /// usable translation are left out of the page.
    pub async fn list_public(
        &self,
        ctx: &RequestContext,
        query: ListPublicContentQuery,
    ) -> ApplicationResult<CursorPage<LocalizedContentDto>> {
        let scope = self.tenants.scope(ctx.tenant_id).await?;
        let cursor = self.decode_cursor(query.cursor.as_deref())?;
        let locales = self.locale_set(&scope).await?;
        let requested = self.requested_locale(&locales, query.locale.as_deref())?;
        let filter = ContentListFilter {
            status: Some(ContentStatus::Published),
            visibility: Visibility::Live,
        };

        let (records, next_cursor) = self
            .content
            .list_page(&scope, query.kind, filter, normalize_limit(query.limit), cursor)
            .await?;

        let items = records
            .iter()
            .filter_map(|entity| match self.resolver.resolve(entity, &requested, &locales) {
                Resolution::Localized(view) => Some(LocalizedContentDto::new(entity, view)),
                Resolution::Missing(_) => None,
            })
            .collect();
        Ok(CursorPage::new(items, next_cursor))
    }
}
