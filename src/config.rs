//! Runtime configuration read from the environment.
//!
//! Every setting has a default; environment variables override it and CLI
//! flags override both.

use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{NflError, Result};

pub const DB_PATH_ENV_VAR: &str = "NFL_DB_PATH";
pub const MAX_WORKERS_ENV_VAR: &str = "NFL_MAX_WORKERS";
pub const LOG_LEVEL_ENV_VAR: &str = "NFL_LOG_LEVEL";
pub const LOG_FILE_ENV_VAR: &str = "NFL_LOG_FILE";
pub const API_TIMEOUT_ENV_VAR: &str = "NFL_API_TIMEOUT";
pub const API_RETRIES_ENV_VAR: &str = "NFL_API_RETRIES";
pub const DATA_BASE_URL_ENV_VAR: &str = "NFL_DATA_BASE_URL";
pub const CACHE_DIR_ENV_VAR: &str = "NFL_CACHE_DIR";
pub const ECR_DIR_ENV_VAR: &str = "NFL_ECR_DIR";

/// Release-asset root of the nflverse data repository.
pub const DEFAULT_DATA_BASE_URL: &str = "https://github.com/nflverse/nflverse-data/releases/download";

#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database file
    pub database_path: PathBuf,

    /// Upper bound on concurrent upstream fetches
    pub max_workers: usize,

    /// Default tracing level (`RUST_LOG` still wins when set)
    pub log_level: String,

    /// Optional log file written alongside stderr output
    pub log_file: Option<PathBuf>,

    /// Per-request HTTP timeout in seconds
    pub api_timeout_secs: u64,

    /// Attempts per upstream download before giving up
    pub api_retries: u32,

    pub data_base_url: String,

    /// Downloaded CSV assets are kept here between runs
    pub cache_dir: Option<PathBuf>,

    /// Directory holding FantasyPros ranking exports
    pub ecr_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("nfl_analytics.db"),
            max_workers: 4,
            log_level: "info".to_string(),
            log_file: None,
            api_timeout_secs: 30,
            api_retries: 3,
            data_base_url: DEFAULT_DATA_BASE_URL.to_string(),
            cache_dir: default_cache_dir(),
            ecr_dir: PathBuf::from("data/raw_ecr"),
        }
    }
}

impl Config {
    /// Load configuration from `NFL_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup; `from_env` passes the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup(DB_PATH_ENV_VAR) {
            config.database_path = PathBuf::from(path);
        }
        if let Some(workers) = lookup(MAX_WORKERS_ENV_VAR) {
            config.max_workers = parse_var(MAX_WORKERS_ENV_VAR, &workers)?;
            if config.max_workers == 0 {
                return Err(NflError::Config {
                    message: format!("{MAX_WORKERS_ENV_VAR} must be at least 1"),
                });
            }
        }
        if let Some(level) = lookup(LOG_LEVEL_ENV_VAR) {
            config.log_level = level.to_lowercase();
        }
        if let Some(file) = lookup(LOG_FILE_ENV_VAR) {
            config.log_file = Some(PathBuf::from(file));
        }
        if let Some(timeout) = lookup(API_TIMEOUT_ENV_VAR) {
            config.api_timeout_secs = parse_var(API_TIMEOUT_ENV_VAR, &timeout)?;
        }
        if let Some(retries) = lookup(API_RETRIES_ENV_VAR) {
            config.api_retries = parse_var(API_RETRIES_ENV_VAR, &retries)?;
        }
        if let Some(url) = lookup(DATA_BASE_URL_ENV_VAR) {
            config.data_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(dir) = lookup(CACHE_DIR_ENV_VAR) {
            config.cache_dir = Some(PathBuf::from(dir));
        }
        if let Some(dir) = lookup(ECR_DIR_ENV_VAR) {
            config.ecr_dir = PathBuf::from(dir);
        }

        Ok(config)
    }
}

fn parse_var<T: FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim().parse().map_err(|_| NflError::Config {
        message: format!("{key} has invalid value {raw:?}"),
    })
}

/// `~/.cache/nfl-analytics`, or `None` when no cache dir can be determined.
fn default_cache_dir() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("nfl-analytics"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config.database_path, PathBuf::from("nfl_analytics.db"));
        assert_eq!(config.max_workers, 4);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.api_timeout_secs, 30);
        assert_eq!(config.api_retries, 3);
        assert_eq!(config.data_base_url, DEFAULT_DATA_BASE_URL);
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("NFL_DB_PATH", "/tmp/x.db"),
            ("NFL_MAX_WORKERS", "8"),
            ("NFL_LOG_LEVEL", "DEBUG"),
            ("NFL_API_TIMEOUT", "5"),
            ("NFL_DATA_BASE_URL", "http://localhost:9000/"),
        ]))
        .unwrap();

        assert_eq!(config.database_path, PathBuf::from("/tmp/x.db"));
        assert_eq!(config.max_workers, 8);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.api_timeout_secs, 5);
        assert_eq!(config.data_base_url, "http://localhost:9000");
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = Config::from_lookup(lookup_from(&[("NFL_MAX_WORKERS", "many")])).unwrap_err();
        assert!(err.to_string().contains("NFL_MAX_WORKERS"));

        let err = Config::from_lookup(lookup_from(&[("NFL_MAX_WORKERS", "0")])).unwrap_err();
        assert!(matches!(err, NflError::Config { .. }));
    }
}
