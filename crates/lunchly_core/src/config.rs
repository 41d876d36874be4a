//! Environment-driven settings for processes embedding the core.
//!
//! # Invariants
//! - Blank variables are treated as unset.
//! - Logging stays off unless a log directory is configured.

use crate::logging::{default_log_level, normalize_level};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "LUNCHLY_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "LUNCHLY_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "LUNCHLY_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "lunchly.sqlite3";

/// Resolved store and logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// SQLite database file opened by `db::open_db`.
    pub db_path: PathBuf,
    /// Normalized level (`trace|debug|info|warn|error`).
    pub log_level: &'static str,
    /// Absolute directory for rolling log files, when logging is wanted.
    pub log_dir: Option<String>,
}

impl CoreConfig {
    /// Reads settings from the process environment.
    ///
    /// # Errors
    /// - Returns an error when `LUNCHLY_LOG_LEVEL` is not a known level.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves settings through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let db_path = read(DB_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME));
        let log_level = match read(LOG_LEVEL_ENV) {
            Some(level) => normalize_level(&level)?,
            None => default_log_level(),
        };

        Ok(Self {
            db_path,
            log_level,
            log_dir: read(LOG_DIR_ENV),
        })
    }
}
