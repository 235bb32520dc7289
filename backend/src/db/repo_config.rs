//! Repository configuration file support.
//!
//! A `climate.toml` file can select the backend and tune the SQLite pool:
//!
//! ```toml
//! [repository]
//! type = "sqlite"
//!
//! [sqlite]
//! database_path = "Resources/hawaii.sqlite"
//! max_connections = 4
//! connect_timeout = 30
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::config::{SqliteConfig, DEFAULT_DATABASE_PATH};
use super::factory::RepositoryType;
use super::repository::RepositoryError;

/// File name looked up by [`RepositoryConfig::from_default_location`].
pub const CONFIG_FILE_NAME: &str = "climate.toml";

/// Repository configuration from file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
    pub repository: RepositorySettings,
    #[serde(default)]
    pub sqlite: SqliteSettings,
}

/// Repository type settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositorySettings {
    #[serde(rename = "type")]
    pub repo_type: String,
}

/// SQLite connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqliteSettings {
    #[serde(default = "default_database_path")]
    pub database_path: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,
}

impl Default for SqliteSettings {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            max_connections: default_max_connections(),
            connect_timeout: default_connect_timeout(),
        }
    }
}

fn default_database_path() -> String {
    DEFAULT_DATABASE_PATH.to_string()
}

fn default_max_connections() -> u32 {
    4
}

fn default_connect_timeout() -> u64 {
    30
}

impl FromStr for RepositoryConfig {
    type Err = RepositoryError;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        toml::from_str(content).map_err(|e| {
            RepositoryError::configuration(format!("Failed to parse config file: {}", e))
        })
    }
}

impl RepositoryConfig {
    /// Load repository configuration from a TOML file.
    ///
    /// # Returns
    /// * `Ok(RepositoryConfig)` if successful
    /// * `Err(RepositoryError)` if file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RepositoryError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            RepositoryError::configuration(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        content.parse()
    }

    /// Load repository configuration from the default location.
    ///
    /// Searches for `climate.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    ///
    /// # Returns
    /// * `Ok(Some(RepositoryConfig))` if found and parsed successfully
    /// * `Ok(None)` if no config file exists in any location
    /// * `Err(RepositoryError)` if a file was found but could not be parsed
    pub fn from_default_location() -> Result<Option<Self>, RepositoryError> {
        Self::search_paths()
            .into_iter()
            .find(|path| path.is_file())
            .map(Self::from_file)
            .transpose()
    }

    fn search_paths() -> Vec<PathBuf> {
        vec![
            PathBuf::from(CONFIG_FILE_NAME),
            PathBuf::from("backend").join(CONFIG_FILE_NAME),
            PathBuf::from("..").join(CONFIG_FILE_NAME),
        ]
    }

    /// Get the repository type from configuration.
    pub fn repository_type(&self) -> Result<RepositoryType, RepositoryError> {
        RepositoryType::from_str(&self.repository.repo_type).map_err(|e| {
            RepositoryError::configuration(format!("Invalid repository type: {}", e))
        })
    }

    /// SQLite settings as a [`SqliteConfig`].
    pub fn to_sqlite_config(&self) -> Result<SqliteConfig, RepositoryError> {
        if self.sqlite.database_path.trim().is_empty() {
            return Err(RepositoryError::configuration(
                "SQLite repository requires a non-empty 'sqlite.database_path' setting",
            ));
        }
        if self.sqlite.max_connections == 0 {
            return Err(RepositoryError::configuration(
                "'sqlite.max_connections' must be at least 1",
            ));
        }

        Ok(SqliteConfig {
            database_path: PathBuf::from(&self.sqlite.database_path),
            max_pool_size: self.sqlite.max_connections,
            connection_timeout_sec: self.sqlite.connect_timeout,
        })
    }
}
