//! Multi-tenant content core: tenant-scoped storage for localized site
//! content, optimistic locking, automatic redirects and an append-only audit
//! trail.
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
