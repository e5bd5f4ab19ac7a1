use std::str::FromStr;

use switchdeck_core::market::{
    MarketConfig, DEFAULT_COMMENTS_PER_PAGE, DEFAULT_LOTS_PER_PAGE, DEFAULT_PLACE_ID, MAX_PER_PAGE,
};

use crate::auth::jwt::JwtConfig;

/// A configuration value that is missing or cannot be parsed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set in the environment")]
    Missing(&'static str),

    #[error("{key} has an invalid value '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long background jobs get to stop after the server drains (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Catalog re-parse interval in seconds; `0` disables the job.
    pub catalog_refresh_interval_secs: u64,
    pub jwt: JwtConfig,
    pub market: MarketConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                         | Default                 |
    /// |---------------------------------|-------------------------|
    /// | `HOST`                          | `0.0.0.0`               |
    /// | `PORT`                          | `3000`                  |
    /// | `CORS_ORIGINS`                  | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`          | `30`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS`         | `30`                    |
    /// | `CATALOG_REFRESH_INTERVAL_SECS` | `0`                     |
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = env_or("PORT", 3000)?;

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 30)?,
            shutdown_timeout_secs: env_or("SHUTDOWN_TIMEOUT_SECS", 30)?,
            catalog_refresh_interval_secs: env_or("CATALOG_REFRESH_INTERVAL_SECS", 0)?,
            jwt: JwtConfig::from_env()?,
            market: market_from_env()?,
        })
    }
}

/// Marketplace policy from the environment.
///
/// | Env Var                      | Default |
/// |------------------------------|---------|
/// | `COMMENTS_PER_PAGE`          | `10`    |
/// | `LOTS_PER_PAGE`              | `15`    |
/// | `DEFAULT_PLACE_ID`           | `1`     |
/// | `PURGE_COMMENTS_ON_WITHDRAW` | `true`  |
pub fn market_from_env() -> Result<MarketConfig, ConfigError> {
    let comments_per_page: i64 = env_or("COMMENTS_PER_PAGE", DEFAULT_COMMENTS_PER_PAGE)?;
    let lots_per_page: i64 = env_or("LOTS_PER_PAGE", DEFAULT_LOTS_PER_PAGE)?;

    for (key, value) in [
        ("COMMENTS_PER_PAGE", comments_per_page),
        ("LOTS_PER_PAGE", lots_per_page),
    ] {
        if !(1..=MAX_PER_PAGE).contains(&value) {
            return Err(ConfigError::Invalid {
                key,
                value: value.to_string(),
            });
        }
    }

    Ok(MarketConfig {
        comments_per_page,
        lots_per_page,
        default_place_id: env_or("DEFAULT_PLACE_ID", DEFAULT_PLACE_ID)?,
        purge_comments_on_withdraw: env_or("PURGE_COMMENTS_ON_WITHDRAW", true)?,
    })
}

/// Parse `key` from the environment, falling back to `default` when unset.
pub(crate) fn env_or<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        Err(_) => Ok(default),
    }
}
