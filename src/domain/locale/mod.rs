pub mod entity;
pub mod repository;
pub mod value_objects;

pub use entity::{Locale, LocaleSet, NewLocale};
pub use repository::{LocaleRepository, LocaleWriteRepository};
pub use value_objects::{LocaleCode, LocaleId, LocaleRemovalMode};
