//! SQLite dataset configuration and environment variable handling.

use std::env;
use std::path::{Path, PathBuf};

/// Location of the bundled dataset, relative to the working directory.
pub const DEFAULT_DATABASE_PATH: &str = "Resources/hawaii.sqlite";

/// Configuration for opening the SQLite dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqliteConfig {
    /// Path to the database file
    pub database_path: PathBuf,
    /// Maximum number of connections in the pool
    pub max_pool_size: u32,
    /// Connection checkout timeout in seconds
    pub connection_timeout_sec: u64,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            max_pool_size: 4,
            connection_timeout_sec: 30,
        }
    }
}

impl SqliteConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `CLIMATE_DATABASE_PATH`: Path to the SQLite file (default: `Resources/hawaii.sqlite`)
    /// - `SQLITE_POOL_MAX`: Maximum pool size (default: 4)
    /// - `SQLITE_CONN_TIMEOUT_SEC`: Connection timeout in seconds (default: 30)
    ///
    /// # Errors
    /// Returns an error if a numeric variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        let database_path = env::var("CLIMATE_DATABASE_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.database_path);

        let max_pool_size = match env::var("SQLITE_POOL_MAX") {
            Ok(v) => v
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| "SQLITE_POOL_MAX must be a positive integer".to_string())?,
            Err(_) => defaults.max_pool_size,
        };

        let connection_timeout_sec = match env::var("SQLITE_CONN_TIMEOUT_SEC") {
            Ok(v) => v
                .parse::<u64>()
                .map_err(|_| "SQLITE_CONN_TIMEOUT_SEC must be a number of seconds".to_string())?,
            Err(_) => defaults.connection_timeout_sec,
        };

        Ok(Self {
            database_path,
            max_pool_size,
            connection_timeout_sec,
        })
    }

    /// Create a new configuration for a database file.
    pub fn with_path(database_path: impl AsRef<Path>) -> Self {
        Self {
            database_path: database_path.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    /// SQLite URI opening the file read-only.
    ///
    /// `%`, `?` and `#` in the path are percent-encoded so they stay part of
    /// the file name instead of starting the query or fragment.
    pub fn connection_url(&self) -> String {
        let path = self.database_path.display().to_string();
        let mut encoded = String::with_capacity(path.len());
        for c in path.chars() {
            match c {
                '%' => encoded.push_str("%25"),
                '?' => encoded.push_str("%3F"),
                '#' => encoded.push_str("%23"),
                other => encoded.push(other),
            }
        }
        format!("file:{}?mode=ro", encoded)
    }
}
