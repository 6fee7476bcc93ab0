// src/config.rs
use crate::infrastructure::database::DatabaseSettings;
use std::{env, str::FromStr, time::Duration};
use thiserror::Error;

#[derive(Clone, Debug)]
pub struct AppConfig {
    database: DatabaseSettings,
    listen_addr: String,
    audit_retention: Option<chrono::Duration>,
    retention_interval: Duration,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

fn default_database_url() -> String {
    "sqlite://mokkan_sites.db".into()
}

fn default_listen_addr() -> String {
    "127.0.0.1:8080".into()
}

const DEFAULT_MAX_CONNECTIONS: u32 = 8;
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_RETENTION_INTERVAL_SECS: u64 = 3_600;

impl AppConfig {
    /// Build configuration from environment variables, reading a `.env` file
    /// first when one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same rules as [`AppConfig::from_env`] over an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(default_database_url);
        if database_url.trim().is_empty() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }
        let listen_addr = lookup("LISTEN_ADDR").unwrap_or_else(default_listen_addr);

        let max_connections =
            parse_var(&lookup, "DB_MAX_CONNECTIONS")?.unwrap_or(DEFAULT_MAX_CONNECTIONS);
        if max_connections == 0 {
            return Err(ConfigError::Invalid(
                "DB_MAX_CONNECTIONS must be at least 1".into(),
            ));
        }
        let busy_timeout_ms =
            parse_var(&lookup, "DB_BUSY_TIMEOUT_MS")?.unwrap_or(DEFAULT_BUSY_TIMEOUT_MS);

        // Unset keeps audit history forever.
        let audit_retention = match parse_var::<i64>(&lookup, "AUDIT_RETENTION_DAYS")? {
            Some(days) if days <= 0 => {
                return Err(ConfigError::Invalid(
                    "AUDIT_RETENTION_DAYS must be positive".into(),
                ));
            }
            Some(days) => Some(chrono::Duration::days(days)),
            None => None,
        };
        let interval_secs = parse_var(&lookup, "AUDIT_RETENTION_INTERVAL_SECS")?
            .unwrap_or(DEFAULT_RETENTION_INTERVAL_SECS)
            .max(1);

        Ok(Self {
            database: DatabaseSettings {
                url: database_url,
                max_connections,
                busy_timeout: Duration::from_millis(busy_timeout_ms),
            },
            listen_addr,
            audit_retention,
            retention_interval: Duration::from_secs(interval_secs),
        })
    }

    pub fn database(&self) -> &DatabaseSettings {
        &self.database
    }

    pub fn listen_addr(&self) -> &str {
        &self.listen_addr
    }

    pub fn audit_retention(&self) -> Option<chrono::Duration> {
        self.audit_retention
    }

    pub fn retention_interval(&self) -> Duration {
        self.retention_interval
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(format!("{key} has an invalid value: {raw}"))),
        _ => Ok(None),
    }
}
