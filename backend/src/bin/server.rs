//! Climate HTTP Server Binary
//!
//! Opens the dataset, computes its date range once and starts serving.
//!
//! # Usage
//!
//! ```bash
//! # Serve Resources/hawaii.sqlite on 127.0.0.1:5000
//! cargo run --bin climate-server
//!
//! # Another database file and port
//! CLIMATE_DATABASE_PATH=/data/hawaii.sqlite PORT=8080 cargo run --bin climate-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 127.0.0.1)
//! - `PORT`: Server port (default: 5000)
//! - `RUST_LOG`: Log filter directives (default: info)
//! - `REPOSITORY_TYPE`: `sqlite` (default) or `local`
//! - `CLIMATE_DATABASE_PATH`, `SQLITE_POOL_MAX`, `SQLITE_CONN_TIMEOUT_SEC`
//!
//! A `climate.toml` file, when present, takes precedence over the repository
//! variables.

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use climate_api::db::{self, RepositoryFactory};
use climate_api::http::config::DEFAULT_LOG_FILTER;
use climate_api::http::{create_router, AppState, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env();

    let (filter, filter_error) = match config.env_filter() {
        Ok(filter) => (filter, None),
        Err(e) => (EnvFilter::new(DEFAULT_LOG_FILTER), Some(e)),
    };

    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    if let Some(e) = filter_error {
        warn!(
            "ignoring RUST_LOG={:?} ({}); using {}",
            config.log_filter, e, DEFAULT_LOG_FILTER
        );
    }

    info!("Starting climate API server");

    let repository = RepositoryFactory::from_config_or_env()
        .await
        .context("failed to open climate dataset")?;
    info!("Repository initialized successfully");

    let dataset_range = db::load_dataset_range(repository.as_ref())
        .await
        .context("failed to determine dataset date range")?;
    info!(
        "Dataset covers {} to {}",
        dataset_range.first_day, dataset_range.last_day
    );

    let state = AppState::new(repository, dataset_range);
    let app = create_router(state);

    let addr = config.socket_addr()?;
    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
