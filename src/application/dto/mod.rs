pub mod audit;
pub mod content;
pub mod pagination;
pub mod redirects;
pub mod serde_time;
pub mod tenants;

pub use audit::AuditEntryDto;
pub use content::{
    AdminContentDto, ContentDto, LocalizedContentDto, MissingTranslationDto, TranslationDto,
};
pub use pagination::{CursorPage, normalize_limit};
pub use redirects::{RedirectDto, RedirectTarget};
pub use tenants::{LocaleDto, TenantDto};
