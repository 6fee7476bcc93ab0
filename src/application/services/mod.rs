// src/application/services/mod.rs
pub mod audit_recorder;
pub mod redirect_manager;
pub mod retention;
pub mod tenancy;

pub use audit_recorder::{AuditChange, AuditRecorder};
pub use redirect_manager::RedirectManager;
pub use retention::{AuditRetentionService, RetentionReport};
pub use tenancy::TenantResolver;

use std::sync::Arc;

use crate::{
    application::{
        commands::{
            content::ContentCommandService, locales::LocaleCommandService,
            redirects::RedirectCommandService, tenants::TenantCommandService,
        },
        ports::{time::Clock, util::SlugGenerator},
        queries::{
            audit::AuditQueryService,
            content::ContentQueryService,
            redirects::{RedirectLookup, RedirectQueryService},
            tenants::TenantQueryService,
        },
    },
    domain::{
        audit::AuditLogRepository, content::ContentReadRepository, locale::LocaleRepository,
        redirect::RedirectReadRepository, tenant::TenantRepository,
        transaction::UnitOfWorkFactory,
    },
};

pub struct ApplicationServices {
    pub tenant_commands: Arc<TenantCommandService>,
    pub locale_commands: Arc<LocaleCommandService>,
    pub content_commands: Arc<ContentCommandService>,
    pub redirect_commands: Arc<RedirectCommandService>,
    pub tenant_queries: Arc<TenantQueryService>,
    pub content_queries: Arc<ContentQueryService>,
    pub audit_queries: Arc<AuditQueryService>,
    pub redirect_queries: Arc<RedirectQueryService>,
    pub retention: Arc<AuditRetentionService>,
    tenants: Arc<TenantResolver>,
}

impl ApplicationServices {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        tenant_repo: Arc<dyn TenantRepository>,
        locale_repo: Arc<dyn LocaleRepository>,
        content_repo: Arc<dyn ContentReadRepository>,
        redirect_repo: Arc<dyn RedirectReadRepository>,
        audit_log_repo: Arc<dyn AuditLogRepository>,
        uow_factory: Arc<dyn UnitOfWorkFactory>,
        clock: Arc<dyn Clock>,
        slugger: Arc<dyn SlugGenerator>,
        audit_retention: Option<chrono::Duration>,
    ) -> Self {
        let tenants = Arc::new(TenantResolver::new(Arc::clone(&tenant_repo)));
        let audit = Arc::new(AuditRecorder::new(Arc::clone(&clock)));

        let tenant_commands = Arc::new(TenantCommandService::new(
            Arc::clone(&uow_factory),
            Arc::clone(&audit),
            Arc::clone(&clock),
        ));
        let locale_commands = Arc::new(LocaleCommandService::new(
            Arc::clone(&tenants),
            Arc::clone(&uow_factory),
            Arc::clone(&audit),
            Arc::clone(&clock),
        ));
        let content_commands = Arc::new(ContentCommandService::new(
            Arc::clone(&tenants),
            Arc::clone(&uow_factory),
            Arc::clone(&content_repo),
            Arc::clone(&audit),
            Arc::clone(&clock),
            slugger,
        ));
        let redirect_commands = Arc::new(RedirectCommandService::new(
            Arc::clone(&tenants),
            Arc::clone(&uow_factory),
            Arc::clone(&audit),
            Arc::clone(&clock),
        ));

        let tenant_queries = Arc::new(TenantQueryService::new(
            Arc::clone(&tenants),
            Arc::clone(&tenant_repo),
            Arc::clone(&locale_repo),
        ));
        let content_queries = Arc::new(ContentQueryService::new(
            Arc::clone(&tenants),
            content_repo,
            locale_repo,
        ));
        let audit_queries = Arc::new(AuditQueryService::new(
            Arc::clone(&tenants),
            audit_log_repo,
        ));
        let redirect_queries = Arc::new(RedirectQueryService::new(
            Arc::clone(&tenants),
            redirect_repo,
        ));

        let retention = Arc::new(AuditRetentionService::new(
            tenant_repo,
            uow_factory,
            clock,
            audit_retention,
        ));

        Self {
            tenant_commands,
            locale_commands,
            content_commands,
            redirect_commands,
            tenant_queries,
            content_queries,
            audit_queries,
            redirect_queries,
            retention,
            tenants,
        }
    }

    pub fn tenant_resolver(&self) -> Arc<TenantResolver> {
        Arc::clone(&self.tenants)
    }

    pub fn redirect_lookup(&self) -> Arc<dyn RedirectLookup> {
        Arc::clone(&self.redirect_queries) as Arc<dyn RedirectLookup>
    }
}
