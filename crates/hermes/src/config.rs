//! Configuration for the Hermes benchmark runner
//!
//! Everything is loaded once at startup from environment variables (and an
//! optional `.env` file) and then passed down explicitly; nothing reads the
//! environment after `Config::from_env` returns.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use geobench_common::DatasetPaths;

use crate::constants::{
    DEFAULT_CASES_DIR, DEFAULT_COLUMN_WIDTH, DEFAULT_POINTS_PATH, DEFAULT_POLYGON_PATH,
    DEFAULT_PROBE_DIR, MIN_COLUMN_WIDTH, env_vars,
};
use crate::targets::TargetRegistry;

/// Runner configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory scanned for case files
    pub cases_dir: PathBuf,

    /// Datasets handed to every probe
    pub datasets: DatasetPaths,

    /// Benchmark targets, in column order
    pub targets: TargetRegistry,

    /// Execution limits
    pub execution: ExecutionConfig,

    /// Table layout
    pub table: TableConfig,
}

/// Probe execution configuration
#[derive(Debug, Clone, Default)]
pub struct ExecutionConfig {
    /// Kill a probe that runs longer than this; `None` waits indefinitely
    pub probe_timeout: Option<Duration>,
}

/// Table rendering configuration
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Width of each column's content area
    pub column_width: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            column_width: DEFAULT_COLUMN_WIDTH,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let probe_dir = PathBuf::from(var(env_vars::PROBE_DIR, DEFAULT_PROBE_DIR));

        let targets = match lookup(env_vars::TARGETS_FILE) {
            Some(path) => TargetRegistry::from_file(probe_dir, &PathBuf::from(path))
                .map_err(|e| ConfigError::Targets(e.to_string()))?,
            None => TargetRegistry::defaults(probe_dir)
                .map_err(|e| ConfigError::Targets(e.to_string()))?,
        };

        let probe_timeout = match lookup(env_vars::PROBE_TIMEOUT_MS) {
            Some(raw) => {
                let ms: u64 = raw
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue(env_vars::PROBE_TIMEOUT_MS.to_string()))?;
                if ms == 0 {
                    return Err(ConfigError::InvalidValue(
                        env_vars::PROBE_TIMEOUT_MS.to_string(),
                    ));
                }
                Some(Duration::from_millis(ms))
            }
            None => None,
        };

        let column_width: usize = var(env_vars::COLUMN_WIDTH, &DEFAULT_COLUMN_WIDTH.to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue(env_vars::COLUMN_WIDTH.to_string()))?;
        if column_width < MIN_COLUMN_WIDTH {
            return Err(ConfigError::InvalidValue(env_vars::COLUMN_WIDTH.to_string()));
        }

        Ok(Self {
            cases_dir: PathBuf::from(var(env_vars::CASES_DIR, DEFAULT_CASES_DIR)),
            datasets: DatasetPaths::new(
                var(env_vars::POINTS_PATH, DEFAULT_POINTS_PATH),
                var(env_vars::POLYGON_PATH, DEFAULT_POLYGON_PATH),
            ),
            targets,
            execution: ExecutionConfig { probe_timeout },
            table: TableConfig { column_width },
        })
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),

    #[error("Invalid target configuration: {0}")]
    Targets(String),
}
