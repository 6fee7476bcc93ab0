pub mod cursor;
pub mod diff;
pub mod entity;
pub mod repository;

pub use cursor::AuditEntryCursor;
pub use diff::changed_fields;
pub use entity::{AuditAction, AuditEntry, NewAuditEntry};
pub use repository::{AuditFilter, AuditLogRepository, AuditWriteRepository};
