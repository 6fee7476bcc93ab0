// tests/support/helpers.rs
use super::mocks::{DummySlug, TestClock};
use axum::body::{self, Body};
use axum::http::StatusCode;
use axum::response::Response;
use mokkan_sites::application::{
    RequestContext,
    commands::tenants::CreateTenantCommand,
    error::{ApplicationError, ErrorKind},
    ports::{time::Clock, util::SlugGenerator},
    services::ApplicationServices,
};
use mokkan_sites::domain::{
    audit::AuditLogRepository, content::ContentReadRepository, locale::LocaleRepository,
    redirect::RedirectReadRepository, tenant::TenantId, tenant::TenantRepository,
    transaction::UnitOfWorkFactory, user::UserId,
};
use mokkan_sites::infrastructure::{
    database::{self, DatabaseSettings},
    repositories::{
        SqliteAuditLogRepository, SqliteContentRepository, SqliteLocaleRepository,
        SqliteRedirectRepository, SqliteTenantRepository, SqliteUnitOfWorkFactory,
    },
};
use mokkan_sites::presentation::http::{routes::build_router, state::HttpState};
use serde_json::Value;
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

pub const ADMIN_USER: i64 = 7;

/// Fresh database with migrations applied and the full service graph wired
/// over it. In-memory unless built with [`TestApp::on_disk`].
pub struct TestApp {
    pub pool: SqlitePool,
    pub services: Arc<ApplicationServices>,
    pub clock: Arc<TestClock>,
    _dir: Option<TempDir>,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_retention(None).await
    }

    pub async fn with_retention(retention: Option<chrono::Duration>) -> Self {
        Self::build(&DatabaseSettings::in_memory(), retention, None).await
    }

    /// WAL database file in a temporary directory behind a pool of several
    /// connections, so concurrent units of work really overlap.
    pub async fn on_disk() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let settings = DatabaseSettings {
            url: format!("sqlite://{}", dir.path().join("sites.db").display()),
            max_connections: 8,
            busy_timeout: Duration::from_secs(10),
        };
        Self::build(&settings, None, Some(dir)).await
    }

    async fn build(
        settings: &DatabaseSettings,
        retention: Option<chrono::Duration>,
        dir: Option<TempDir>,
    ) -> Self {
        let pool = database::init_pool(settings)
            .await
            .expect("open sqlite");
        database::run_migrations(&pool)
            .await
            .expect("run migrations");

        let clock = Arc::new(TestClock::new());
        let tenant_repo: Arc<dyn TenantRepository> =
            Arc::new(SqliteTenantRepository::new(pool.clone()));
        let locale_repo: Arc<dyn LocaleRepository> =
            Arc::new(SqliteLocaleRepository::new(pool.clone()));
        let content_repo: Arc<dyn ContentReadRepository> =
            Arc::new(SqliteContentRepository::new(pool.clone()));
        let redirect_repo: Arc<dyn RedirectReadRepository> =
            Arc::new(SqliteRedirectRepository::new(pool.clone()));
        let audit_repo: Arc<dyn AuditLogRepository> =
            Arc::new(SqliteAuditLogRepository::new(pool.clone()));
        let uow_factory: Arc<dyn UnitOfWorkFactory> =
            Arc::new(SqliteUnitOfWorkFactory::new(pool.clone()));
        let clock_port: Arc<dyn Clock> = clock.clone();
        let slugger: Arc<dyn SlugGenerator> = Arc::new(DummySlug);

        let services = Arc::new(ApplicationServices::new(
            tenant_repo,
            locale_repo,
            content_repo,
            redirect_repo,
            audit_repo,
            uow_factory,
            clock_port,
            slugger,
            retention,
        ));

        Self {
            pool,
            services,
            clock,
            _dir: dir,
        }
    }

    /// Create a tenant whose only locale is `default_locale` and return an
    /// admin context for it.
    pub async fn tenant(&self, slug: &str, default_locale: &str) -> RequestContext {
        let tenant = self
            .services
            .tenant_commands
            .create(
                Some(admin_user()),
                CreateTenantCommand {
                    slug: slug.to_string(),
                    name: format!("{slug} corp"),
                    default_locale: default_locale.to_string(),
                },
            )
            .await
            .expect("create tenant");
        RequestContext::admin(TenantId::new(tenant.id).unwrap(), admin_user())
    }

    /// Tenant with `en` as default plus the given extra locales.
    pub async fn tenant_with_locales(&self, slug: &str, extra: &[&str]) -> RequestContext {
        let ctx = self.tenant(slug, "en").await;
        for code in extra {
            self.services
                .locale_commands
                .add(&ctx, code)
                .await
                .expect("add locale");
        }
        ctx
    }

    pub fn router(&self) -> axum::Router {
        build_router(HttpState {
            services: Arc::clone(&self.services),
        })
    }
}

pub fn admin_user() -> UserId {
    UserId::new(ADMIN_USER).unwrap()
}

pub fn assert_kind(err: &ApplicationError, expected: ErrorKind) {
    assert_eq!(err.kind(), expected, "unexpected error: {err}");
}

/// Assert that a response is an error JSON body with the expected status and
/// error string.
pub async fn assert_error_response(resp: Response, expected_status: StatusCode, expected_error: &str) {
    assert_eq!(resp.status(), expected_status);
    let (parts, body_stream) = resp.into_parts();
    let body_bytes = body::to_bytes(body_stream, 1024 * 1024)
        .await
        .expect("read body");
    let ct = parts
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert!(ct.starts_with("application/json"), "unexpected content-type: {ct}");
    let json: Value = serde_json::from_slice(&body_bytes).expect("json error body");
    assert_eq!(json["error"].as_str().unwrap_or(""), expected_error);
    assert!(!json["message"].as_str().unwrap_or("").is_empty());
}

pub async fn body_json(resp: Response<Body>) -> Value {
    let bytes = body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}
