// src/infrastructure/database.rs
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous},
};
use std::{str::FromStr, time::Duration};
use tracing::info;

/// Connection settings for the SQLite store.
#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub busy_timeout: Duration,
}

impl DatabaseSettings {
    /// Private in-memory database. Every connection of a `:memory:` URL gets
    /// its own database, so the pool is pinned to a single connection that
    /// never expires.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            busy_timeout: Duration::from_secs(5),
        }
    }

    fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

pub async fn init_pool(settings: &DatabaseSettings) -> Result<SqlitePool, sqlx::Error> {
    let in_memory = settings.is_in_memory();
    let mut options = SqliteConnectOptions::from_str(&settings.url)?
        .foreign_keys(true)
        .busy_timeout(settings.busy_timeout);
    if !in_memory {
        options = options
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);
    }

    let mut pool_options = SqlitePoolOptions::new();
    pool_options = if in_memory {
        pool_options
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        pool_options.max_connections(settings.max_connections.max(1))
    };

    let pool = pool_options.connect_with(options).await?;
    info!(
        url = %settings.url,
        in_memory,
        max_connections = if in_memory { 1 } else { settings.max_connections },
        "sqlite pool ready"
    );
    Ok(pool)
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
