// src/application/queries/content/mod.rs
mod get;
mod list;
mod service;

pub use get::{GetContentQuery, GetPublicContentBySlugQuery, GetPublicContentQuery};
pub use list::{ListContentQuery, ListPublicContentQuery};
pub use service::ContentQueryService;
