// src/application/queries/content/get.rs
use super::ContentQueryService;
use crate::{
    application::{
        context::RequestContext,
        dto::{AdminContentDto, LocalizedContentDto},
        error::ApplicationResult,
    },
    domain::{
        content::{Audience, ContentKind, ContentSlug, EntityId, Resolution},
        errors::DomainError,
        tenant::Visibility,
    },
};

pub struct GetContentQuery {
    pub kind: ContentKind,
    pub id: i64,
    /// Resolve a localized view for this language as well.
    pub locale: Option<String>,
    /// Admin trash view: also return soft-deleted entities.
    pub include_deleted: bool,
}

pub struct GetPublicContentQuery {
    pub kind: ContentKind,
    pub id: i64,
    pub locale: Option<String>,
}

pub struct GetPublicContentBySlugQuery {
    pub kind: ContentKind,
    pub locale: Option<String>,
    pub slug: String,
}

impl ContentQueryService {
    pub async fn get_admin(
        &self,
        ctx: &RequestContext,
        query: GetContentQuery,
    ) -> ApplicationResult<AdminContentDto> {
        let scope = self.tenants.scope(ctx.tenant_id).await?;
        let kind = query.kind;
        let id = EntityId::new(query.id)?;
        let visibility = if query.include_deleted {
            Visibility::WithTrashed
        } else {
            Visibility::Live
        };

        let entity = self
            .content
            .find_by_id(&scope, kind, id, visibility)
            .await?
            .ok_or_else(|| DomainError::not_found(kind.entity_type(), id))?;
        let locales = self.locale_set(&scope).await?;

        let resolution = match query.locale.as_deref() {
            Some(code) => {
                let requested = self.requested_locale(&locales, Some(code))?;
                let resolution = self.resolver.resolve(&entity, &requested, &locales);
                Some(resolution.for_audience(Audience::Admin, &entity)?)
            }
            None => None,
        };
        Ok(AdminContentDto::new(&entity, &locales, resolution))
    }

    /// Published, live entities only. Entities without a record in either the
    /// requested or the default locale are reported as not found.
    pub async fn get_public(
        &self,
        ctx: &RequestContext,
        query: GetPublicContentQuery,
    ) -> ApplicationResult<LocalizedContentDto> {
        let scope = self.tenants.scope(ctx.tenant_id).await?;
        let kind = query.kind;
        let id = EntityId::new(query.id)?;
        let not_found = || DomainError::not_found(kind.entity_type(), id);

        let entity = self
            .content
            .find_by_id(&scope, kind, id, Visibility::Live)
            .await?
            .filter(|entity| entity.is_public())
            .ok_or_else(not_found)?;
        let locales = self.locale_set(&scope).await?;
        let requested = self.requested_locale(&locales, query.locale.as_deref())?;

        match self
            .resolver
            .resolve(&entity, &requested, &locales)
            .for_audience(Audience::Public, &entity)?
        {
            Resolution::Localized(view) => Ok(LocalizedContentDto::new(&entity, view)),
            Resolution::Missing(_) => Err(not_found().into()),
        }
    }

    /// Look up a published entity by its localized slug. A slug of the default
    /// locale also matches when the requested locale has no record of its own.
    pub async fn get_public_by_slug(
        &self,
        ctx: &RequestContext,
        query: GetPublicContentBySlugQuery,
    ) -> ApplicationResult<LocalizedContentDto> {
        let scope = self.tenants.scope(ctx.tenant_id).await?;
        let kind = query.kind;
        let not_found = || DomainError::not_found(kind.entity_type(), &query.slug);
        let slug = ContentSlug::new(query.slug.as_str()).map_err(|_| not_found())?;

        let locales = self.locale_set(&scope).await?;
        let requested = self.requested_locale(&locales, query.locale.as_deref())?;
        let default_locale = locales.default_locale();

        let mut entity = None;
        if let Some(locale) = locales.find(&requested) {
            entity = self
                .content
                .find_by_localized_slug(&scope, kind, locale.id, &slug)
                .await?;
        }
        if entity.is_none() && requested != default_locale.code {
            entity = self
                .content
                .find_by_localized_slug(&scope, kind, default_locale.id, &slug)
                .await?
                .filter(|candidate| candidate.translation(&requested).is_none());
        }
        let entity = entity
            .filter(|entity| entity.is_public())
            .ok_or_else(not_found)?;

        match self
            .resolver
            .resolve(&entity, &requested, &locales)
            .for_audience(Audience::Public, &entity)?
        {
            Resolution::Localized(view) => Ok(LocalizedContentDto::new(&entity, view)),
            Resolution::Missing(_) => Err(not_found().into()),
        }
    }
}
