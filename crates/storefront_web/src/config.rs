//! Server configuration from `STOREFRONT_*` environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use storefront_core::default_log_level;
use thiserror::Error;

pub const BIND_ADDR_ENV: &str = "STOREFRONT_BIND_ADDR";
pub const DB_PATH_ENV: &str = "STOREFRONT_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "STOREFRONT_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "STOREFRONT_LOG_DIR";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_DB_FILE_NAME: &str = "storefront.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "storefront-logs";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {key} value `{value}`: {message}")]
    Invalid {
        key: &'static str,
        value: String,
        message: String,
    },
}

/// Resolved server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub db_path: PathBuf,
    pub log_level: String,
    pub log_dir: PathBuf,
}

impl ServerConfig {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick
    /// up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves settings through `lookup`; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let raw_addr = read(BIND_ADDR_ENV).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .parse::<SocketAddr>()
            .map_err(|err| ConfigError::Invalid {
                key: BIND_ADDR_ENV,
                value: raw_addr.clone(),
                message: err.to_string(),
            })?;

        let db_path = read(DB_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME));

        let log_dir = read(LOG_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME));
        if !log_dir.is_absolute() {
            return Err(ConfigError::Invalid {
                key: LOG_DIR_ENV,
                value: log_dir.display().to_string(),
                message: "must be an absolute path".to_string(),
            });
        }

        Ok(Self {
            bind_addr,
            db_path,
            log_level: read(LOG_LEVEL_ENV).unwrap_or_else(|| default_log_level().to_string()),
            log_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ServerConfig, BIND_ADDR_ENV, DB_PATH_ENV, LOG_DIR_ENV, LOG_LEVEL_ENV};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ServerConfig, super::ConfigError> {
        let env = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<HashMap<_, _>>();
        ServerConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert!(config.db_path.ends_with("storefront.sqlite3"));
        assert!(config.log_dir.is_absolute());
    }

    #[test]
    fn explicit_values_override_defaults() {
        let log_dir = std::env::temp_dir().join("custom-logs");
        let log_dir_str = log_dir.to_str().unwrap();
        let config = config_from(&[
            (BIND_ADDR_ENV, "0.0.0.0:9000"),
            (DB_PATH_ENV, "/var/lib/storefront/catalog.sqlite3"),
            (LOG_LEVEL_ENV, "warn"),
            (LOG_DIR_ENV, log_dir_str),
        ])
        .unwrap();

        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(
            config.db_path,
            PathBuf::from("/var/lib/storefront/catalog.sqlite3")
        );
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, log_dir);
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = config_from(&[(BIND_ADDR_ENV, "  ")]).unwrap();
        assert_eq!(config.bind_addr.port(), 8080);
    }

    #[test]
    fn invalid_bind_addr_is_rejected() {
        let err = config_from(&[(BIND_ADDR_ENV, "localhost")]).unwrap_err();
        assert!(err.to_string().contains(BIND_ADDR_ENV));
    }

    #[test]
    fn relative_log_dir_is_rejected() {
        let err = config_from(&[(LOG_DIR_ENV, "logs")]).unwrap_err();
        assert!(err.to_string().contains("absolute"));
    }
}
