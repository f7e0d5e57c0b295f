//! Postgres connection settings sourced from the environment.
use anyhow::{Context, Result};

pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_ACQUIRE_TIMEOUT_MS: u64 = 2_000;

// Database URLs may carry credentials; never log `url`.
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    pub url: String,
    pub max_connections: u32,
    pub connect_timeout_ms: u64,
    pub acquire_timeout_ms: u64,
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
            acquire_timeout_ms: DEFAULT_ACQUIRE_TIMEOUT_MS,
        }
    }

    /// Read settings from `HALL_MONITOR_DATABASE_URL` and the `HALL_MONITOR_PG_*`
    /// tuning variables.
    ///
    /// Returns `Ok(None)` when no database URL is configured.
    pub fn from_env() -> Result<Option<Self>> {
        let Ok(url) = std::env::var("HALL_MONITOR_DATABASE_URL") else {
            return Ok(None);
        };
        let mut config = Self::new(url);
        if let Ok(value) = std::env::var("HALL_MONITOR_PG_MAX_CONNECTIONS") {
            config.max_connections = value
                .parse()
                .with_context(|| "parse HALL_MONITOR_PG_MAX_CONNECTIONS")?;
        }
        if let Ok(value) = std::env::var("HALL_MONITOR_PG_CONNECT_TIMEOUT_MS") {
            config.connect_timeout_ms = value
                .parse()
                .with_context(|| "parse HALL_MONITOR_PG_CONNECT_TIMEOUT_MS")?;
        }
        if let Ok(value) = std::env::var("HALL_MONITOR_PG_ACQUIRE_TIMEOUT_MS") {
            config.acquire_timeout_ms = value
                .parse()
                .with_context(|| "parse HALL_MONITOR_PG_ACQUIRE_TIMEOUT_MS")?;
        }
        Ok(Some(config))
    }
}
