//! Database configuration loaded from environment variables.

use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Default database URL (in-memory SQLite, handy for local runs)
pub const DEFAULT_DATABASE_URL: &str = "sqlite::memory:";

/// Store-specific engine options passed through to the connection pool.
///
/// Every field is optional; unset fields keep the driver defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineOptions {
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub connect_timeout_secs: Option<u64>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
    /// Log every SQL statement through the driver
    pub sql_logging: Option<bool>,
}

/// Database configuration.
#[derive(Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default)]
    pub engine: EngineOptions,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &"[REDACTED]")
            .field("engine", &self.engine)
            .finish()
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            engine: EngineOptions::default(),
        }
    }
}

impl DatabaseConfig {
    /// Load configuration from `.env` and environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            url: env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            engine: EngineOptions {
                max_connections: parse_var("DATABASE_MAX_CONNECTIONS"),
                min_connections: parse_var("DATABASE_MIN_CONNECTIONS"),
                connect_timeout_secs: parse_var("DATABASE_CONNECT_TIMEOUT_SECS"),
                acquire_timeout_secs: parse_var("DATABASE_ACQUIRE_TIMEOUT_SECS"),
                idle_timeout_secs: parse_var("DATABASE_IDLE_TIMEOUT_SECS"),
                sql_logging: parse_var("DATABASE_SQL_LOGGING"),
            },
        }
    }
}

/// Read and parse an environment variable, ignoring unparsable values
fn parse_var<T: FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Ignoring unparsable value for {}: {:?}", key, raw);
            None
        }
    }
}
