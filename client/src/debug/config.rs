//! Logging configuration from environment variables

use std::path::PathBuf;

use lib_utils::envs;

/// Filter used when neither `RUST_LOG` nor a configured level parses.
pub const DEFAULT_FILTER: &str = "fks_client=info,warn";

/// Logging system configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Directory for the rolling log files
    pub log_dir: PathBuf,
    /// File name prefix; the appender adds the date suffix
    pub file_name: String,
    /// Log level filter (e.g., "fks_client=debug,info")
    pub log_level: String,
    /// Mirror events to stderr
    pub stderr: bool,
    /// Write the file log as JSON lines
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            file_name: "fks-client.log".to_string(),
            log_level: DEFAULT_FILTER.to_string(),
            stderr: false,
            json: false,
        }
    }
}

impl LogConfig {
    /// Load configuration from environment variables
    ///
    /// - `FKS_LOG_DIR`: log directory (default `logs`)
    /// - `RUST_LOG`: filter (default `fks_client=info,warn`)
    /// - `FKS_LOG_STDERR`: `1`/`true` mirrors logs to stderr
    /// - `FKS_LOG_JSON`: `1`/`true` writes JSON lines
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            log_dir: envs::get_env("FKS_LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
            file_name: defaults.file_name,
            log_level: envs::get_env_or("RUST_LOG", DEFAULT_FILTER),
            stderr: envs::get_env_bool("FKS_LOG_STDERR").unwrap_or(false),
            json: envs::get_env_bool("FKS_LOG_JSON").unwrap_or(false),
        }
    }
}
