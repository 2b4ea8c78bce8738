//! Server configuration loaded from environment variables.
//!
//! SYSTEM CONTEXT
//! ==============
//! `main` loads `.env` through `dotenvy` first, then builds one
//! `ServerConfig`. Only `PORT` is strictly validated; every tuning knob falls
//! back to its default when missing or unparsable.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::str::FromStr;

pub(crate) const DEFAULT_PORT: u16 = 3000;
pub(crate) const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
pub(crate) const DEFAULT_FLUSH_INTERVAL_MS: u64 = 250;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT: {0:?}")]
    InvalidPort(String),
}

/// Runtime settings for the HTTP server and optional persistence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    /// TCP port to listen on (`PORT`).
    pub port: u16,
    /// Postgres URL (`DATABASE_URL`). `None` keeps the workspace in memory only.
    pub database_url: Option<String>,
    /// Pool size (`DB_MAX_CONNECTIONS`).
    pub db_max_connections: u32,
    /// Delay between dirty-entity flushes (`FLUSH_INTERVAL_MS`).
    pub flush_interval_ms: u64,
    /// Insert demo users, a sprint, and tasks at startup (`SEED_DEMO_DATA`).
    pub seed_demo_data: bool,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPort`] if `PORT` is set but is not a valid port number.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?,
            Err(_) => DEFAULT_PORT,
        };

        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        Ok(Self {
            port,
            database_url,
            db_max_connections: env_parse("DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS),
            flush_interval_ms: env_parse("FLUSH_INTERVAL_MS", DEFAULT_FLUSH_INTERVAL_MS),
            seed_demo_data: env_bool("SEED_DEMO_DATA").unwrap_or(false),
        })
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}
