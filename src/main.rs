use anyhow::Result;
use mokkan_sites::application::{
    ports::{time::Clock, util::SlugGenerator},
    services::{ApplicationServices, AuditRetentionService},
};
use mokkan_sites::config::AppConfig;
use mokkan_sites::domain::{
    audit::AuditLogRepository, content::ContentReadRepository, locale::LocaleRepository,
    redirect::RedirectReadRepository, tenant::TenantRepository, transaction::UnitOfWorkFactory,
};
use mokkan_sites::infrastructure::{
    database,
    repositories::{
        SqliteAuditLogRepository, SqliteContentRepository, SqliteLocaleRepository,
        SqliteRedirectRepository, SqliteTenantRepository, SqliteUnitOfWorkFactory,
    },
    time::SystemClock,
    util::DefaultSlugGenerator,
};
use mokkan_sites::presentation::http::{routes::build_router, state::HttpState};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let pool = database::init_pool(config.database()).await?;
    database::run_migrations(&pool).await?;

    let tenant_repo: Arc<dyn TenantRepository> =
        Arc::new(SqliteTenantRepository::new(pool.clone()));
    let locale_repo: Arc<dyn LocaleRepository> =
        Arc::new(SqliteLocaleRepository::new(pool.clone()));
    let content_repo: Arc<dyn ContentReadRepository> =
        Arc::new(SqliteContentRepository::new(pool.clone()));
    let redirect_repo: Arc<dyn RedirectReadRepository> =
        Arc::new(SqliteRedirectRepository::new(pool.clone()));
    let audit_log_repo: Arc<dyn AuditLogRepository> =
        Arc::new(SqliteAuditLogRepository::new(pool.clone()));
    let uow_factory: Arc<dyn UnitOfWorkFactory> =
        Arc::new(SqliteUnitOfWorkFactory::new(pool.clone()));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let slugger: Arc<dyn SlugGenerator> = Arc::new(DefaultSlugGenerator);

    let services = Arc::new(ApplicationServices::new(
        tenant_repo,
        locale_repo,
        content_repo,
        redirect_repo,
        audit_log_repo,
        uow_factory,
        clock,
        slugger,
        config.audit_retention(),
    ));

    if services.retention.is_enabled() {
        tokio::spawn(run_retention(
            Arc::clone(&services.retention),
            config.retention_interval(),
        ));
    } else {
        tracing::info!("audit retention disabled; history is kept forever");
    }

    let state = HttpState {
        services: Arc::clone(&services),
    };
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!("listening on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    Ok(())
}

async fn run_retention(retention: Arc<AuditRetentionService>, every: Duration) {
    let mut ticker = tokio::time::interval(every);
    loop {
        ticker.tick().await;
        if let Err(err) = retention.sweep().await {
            tracing::warn!(error = %err, "audit retention sweep failed");
        }
    }
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
