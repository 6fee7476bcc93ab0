pub mod entity;
pub mod kind;
pub mod path;
pub mod repository;
pub mod resolver;
pub mod value_objects;

pub use entity::{
    ContentDraft, ContentEntity, ContentListFilter, ContentPatch, ContentWrite, LocalizedRecord,
    TranslationDraft, TranslationWrite, check_transition,
};
pub use kind::{ContentDescriptor, ContentKind, LocalizedField};
pub use path::PublicPath;
pub use repository::{ContentReadRepository, ContentWriteRepository};
pub use resolver::{
    Audience, LocalizationResolver, LocalizedView, MissingTranslation, Resolution,
};
pub use value_objects::{ContentListCursor, ContentSlug, ContentStatus, EntityId, Version};
