// src/application/queries/audit/mod.rs
mod list;
mod service;

pub use list::ListAuditEntriesQuery;
pub use service::AuditQueryService;
