//! Worker configuration loaded from environment variables.

use std::str::FromStr;

/// A configuration value that is missing or cannot be parsed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set in the environment")]
    Missing(&'static str),

    #[error("{key} has an invalid value '{value}'")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub database_url: String,
    /// Seconds between refresh passes; `0` runs a single pass and exits.
    pub refresh_interval_secs: u64,
    /// Also re-parse links marked inactive.
    pub include_inactive: bool,
}

impl WorkerConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env var                         | Default  |
    /// |---------------------------------|----------|
    /// | `DATABASE_URL`                  | required |
    /// | `CATALOG_REFRESH_INTERVAL_SECS` | `0`      |
    /// | `PARSE_INACTIVE_LINKS`          | `false`  |
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        Ok(Self {
            database_url,
            refresh_interval_secs: parse_or(
                "CATALOG_REFRESH_INTERVAL_SECS",
                std::env::var("CATALOG_REFRESH_INTERVAL_SECS").ok(),
                0,
            )?,
            include_inactive: parse_or(
                "PARSE_INACTIVE_LINKS",
                std::env::var("PARSE_INACTIVE_LINKS").ok(),
                false,
            )?,
        })
    }
}

/// Parse a raw environment value, falling back to `default` when unset.
fn parse_or<T: FromStr>(
    key: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn unset_value_uses_default() {
        let value: u64 = parse_or("CATALOG_REFRESH_INTERVAL_SECS", None, 0).unwrap();
        assert_eq!(value, 0);
    }

    #[test]
    fn value_is_trimmed() {
        let value: u64 =
            parse_or("CATALOG_REFRESH_INTERVAL_SECS", Some(" 300 ".into()), 0).unwrap();
        assert_eq!(value, 300);
    }

    #[test]
    fn unparseable_interval_is_rejected() {
        let result: Result<u64, _> =
            parse_or("CATALOG_REFRESH_INTERVAL_SECS", Some("5m".into()), 0);
        assert_matches!(
            result,
            Err(ConfigError::Invalid { key: "CATALOG_REFRESH_INTERVAL_SECS", ref value }) if value == "5m"
        );
    }

    #[test]
    fn unparseable_flag_is_rejected() {
        let result: Result<bool, _> = parse_or("PARSE_INACTIVE_LINKS", Some("yes".into()), false);
        assert_matches!(result, Err(ConfigError::Invalid { key: "PARSE_INACTIVE_LINKS", .. }));
    }
}
