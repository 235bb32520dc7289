//! Listener and logging settings for the server binary.

use std::env;
use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// `RUST_LOG`-style directives, e.g. `info,tower_http=debug`
    pub log_filter: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ServerConfig {
    /// Read configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `HOST`: Server host (default: 127.0.0.1)
    /// - `PORT`: Server port (default: 5000)
    /// - `RUST_LOG`: Log filter directives (default: info)
    ///
    /// An unparseable port falls back to the default. The log filter is kept
    /// verbatim and validated by [`ServerConfig::env_filter`].
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.port),
            log_filter: env::var("RUST_LOG").unwrap_or(defaults.log_filter),
        }
    }

    /// Address to bind the listener to.
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }

    /// Build the subscriber filter from the configured directives.
    pub fn env_filter(&self) -> Result<EnvFilter, String> {
        EnvFilter::try_new(&self.log_filter).map_err(|e| e.to_string())
    }
}
