use crate::domain::concurrency::CasOutcome;
use crate::domain::content::entity::{ContentEntity, ContentListFilter, ContentWrite};
use crate::domain::content::kind::ContentKind;
use crate::domain::content::value_objects::{ContentListCursor, ContentSlug, EntityId, Version};
use crate::domain::errors::DomainResult;
use crate::domain::locale::LocaleId;
use crate::domain::tenant::{TenantScope, Visibility};
use async_trait::async_trait;

#[async_trait]
pub trait ContentReadRepository: Send + Sync {
    async fn find_by_id(
        &self,
        scope: &TenantScope,
        kind: ContentKind,
        id: EntityId,
        visibility: Visibility,
    ) -> DomainResult<Option<ContentEntity>>;

    /// Live entity owning `slug` in the given locale.
    async fn find_by_localized_slug(
        &self,
        scope: &TenantScope,
        kind: ContentKind,
        locale_id: LocaleId,
        slug: &ContentSlug,
    ) -> DomainResult<Option<ContentEntity>>;

    /// Newest first, at most `limit` rows after `cursor`, plus the encoded
    /// cursor of the next page when more rows exist.
    async fn list_page(
        &self,
        scope: &TenantScope,
        kind: ContentKind,
        filter: ContentListFilter,
        limit: u32,
        cursor: Option<ContentListCursor>,
    ) -> DomainResult<(Vec<ContentEntity>, Option<String>)>;

    /// Stored version regardless of soft-delete state.
    async fn current_version(
        &self,
        scope: &TenantScope,
        kind: ContentKind,
        id: EntityId,
    ) -> DomainResult<Option<Version>>;
}

/// Content writes performed inside a unit of work.
#[async_trait]
pub trait ContentWriteRepository: Send {
    async fn find_content(
        &mut self,
        scope: &TenantScope,
        kind: ContentKind,
        id: EntityId,
        visibility: Visibility,
    ) -> DomainResult<Option<ContentEntity>>;

    /// Live entity (other than `exclude`) that holds the language-independent slug.
    async fn entity_slug_owner(
        &mut self,
        scope: &TenantScope,
        kind: ContentKind,
        slug: &ContentSlug,
        exclude: Option<EntityId>,
    ) -> DomainResult<Option<EntityId>>;

    /// Live entity (other than `exclude`) that holds a localized slug.
    async fn localized_slug_owner(
        &mut self,
        scope: &TenantScope,
        kind: ContentKind,
        locale_id: LocaleId,
        slug: &ContentSlug,
        exclude: Option<EntityId>,
    ) -> DomainResult<Option<EntityId>>;

    async fn insert_content(
        &mut self,
        scope: &TenantScope,
        kind: ContentKind,
        write: ContentWrite,
    ) -> DomainResult<ContentEntity>;

    /// Replace the stored state if and only if the stored version still equals
    /// `expected`, incrementing it by one in the same statement.
    async fn compare_and_set(
        &mut self,
        scope: &TenantScope,
        kind: ContentKind,
        id: EntityId,
        expected: Version,
        write: ContentWrite,
    ) -> DomainResult<CasOutcome>;

    /// Every entity, live or trashed, with a translation in `locale_id`.
    async fn entities_with_locale(
        &mut self,
        scope: &TenantScope,
        kind: ContentKind,
        locale_id: LocaleId,
    ) -> DomainResult<Vec<ContentEntity>>;

    async fn public_entities(
        &mut self,
        scope: &TenantScope,
        kind: ContentKind,
    ) -> DomainResult<Vec<ContentEntity>>;

    /// Remove a soft-deleted entity and its translations. Returns false when no
    /// trashed row matched.
    async fn purge_content(
        &mut self,
        scope: &TenantScope,
        kind: ContentKind,
        id: EntityId,
    ) -> DomainResult<bool>;
}
