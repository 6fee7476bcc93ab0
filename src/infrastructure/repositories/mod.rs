// src/infrastructure/repositories/mod.rs
mod error;
mod scoped;
mod sqlite_audit_log;
mod sqlite_content;
mod sqlite_locale;
mod sqlite_redirect;
mod sqlite_tenant;
mod unit_of_work;

pub use error::map_sqlx;
pub use sqlite_audit_log::SqliteAuditLogRepository;
pub use sqlite_content::SqliteContentRepository;
pub use sqlite_locale::SqliteLocaleRepository;
pub use sqlite_redirect::SqliteRedirectRepository;
pub use sqlite_tenant::SqliteTenantRepository;
pub use unit_of_work::{SqliteUnitOfWork, SqliteUnitOfWorkFactory};
