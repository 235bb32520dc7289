//! SQLite repository implementation using Diesel.
//!
//! The dataset file is opened read-only through an r2d2 pool. Each repository
//! call checks one connection out inside `spawn_blocking`, runs a single query
//! and hands the connection back when the closure returns, whatever the
//! outcome.
//!
//! ## Configuration
//!
//! See [`SqliteConfig`]; the defaults open `Resources/hawaii.sqlite`
//! relative to the working directory.

use async_trait::async_trait;
use diesel::dsl::{avg, max, min};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_query;
use diesel::sqlite::SqliteConnection;
use log::{debug, info};
use std::time::Duration;
use tokio::task;

use crate::db::config::SqliteConfig;
use crate::db::repository::{
    ErrorContext, MeasurementRepository, RepositoryError, RepositoryResult, StationRepository,
};
use crate::models::{
    DateWindow, PrecipitationReading, Station, TemperatureReading, TemperatureSummary,
};

mod models;
mod schema;

use models::*;
use schema::*;

type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;

/// Diesel-backed repository over the read-only SQLite dataset.
#[derive(Clone, Debug)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Open the dataset and build the connection pool.
    ///
    /// # Returns
    /// * `Ok(SqliteRepository)` on success
    /// * `Err(RepositoryError::ConfigurationError)` if the file does not exist
    /// * `Err(RepositoryError::ConnectionError)` if the pool cannot be built
    pub fn new(config: SqliteConfig) -> RepositoryResult<Self> {
        if !config.database_path.is_file() {
            return Err(RepositoryError::configuration_with_context(
                format!(
                    "SQLite database not found at {}",
                    config.database_path.display()
                ),
                ErrorContext::new("open_database"),
            ));
        }

        let manager = ConnectionManager::<SqliteConnection>::new(config.connection_url());

        let pool = Pool::builder()
            .max_size(config.max_pool_size)
            .connection_timeout(Duration::from_secs(config.connection_timeout_sec))
            .test_on_check_out(true)
            .build(manager)
            .map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("create_pool")
                        .with_details(format!("max_size={}", config.max_pool_size)),
                )
            })?;

        info!(
            "Opened SQLite dataset {} (pool size {})",
            config.database_path.display(),
            config.max_pool_size
        );

        Ok(Self { pool })
    }

    /// Run `f` on a pooled connection on the blocking thread pool.
    async fn with_conn<T, F>(&self, operation: &'static str, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut SqliteConnection) -> RepositoryResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();

        task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new(operation).with_details("pool checkout"),
                )
            })?;
            debug!("sqlite: {}", operation);
            f(&mut conn).map_err(|e| e.with_operation(operation))
        })
        .await
        .map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Task join error: {}", e),
                ErrorContext::new("spawn_blocking"),
            )
        })?
    }
}

#[async_trait]
impl MeasurementRepository for SqliteRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.with_conn("health_check", |conn| {
            sql_query("SELECT 1").execute(conn)?;
            Ok(true)
        })
        .await
    }

    async fn dataset_bounds(&self) -> RepositoryResult<Option<(String, String)>> {
        self.with_conn("dataset_bounds", |conn| {
            let (first, last) = measurement::table
                .select((min(measurement::date), max(measurement::date)))
                .get_result::<(Option<String>, Option<String>)>(conn)?;
            Ok(first.zip(last))
        })
        .await
    }

    async fn fetch_precipitation(&self) -> RepositoryResult<Vec<PrecipitationReading>> {
        self.with_conn("fetch_precipitation", |conn| {
            let rows = measurement::table
                .select(PrecipitationRow::as_select())
                .order(measurement::id.asc())
                .load::<PrecipitationRow>(conn)?;
            Ok(rows.into_iter().map(Into::into).collect())
        })
        .await
    }

    async fn fetch_temperature_observations(
        &self,
        window: DateWindow,
    ) -> RepositoryResult<Vec<TemperatureReading>> {
        let (from, to) = window.bounds();
        self.with_conn("fetch_temperature_observations", move |conn| {
            let rows = measurement::table
                .filter(measurement::date.between(from, to))
                .select(TemperatureRow::as_select())
                .order(measurement::id.asc())
                .load::<TemperatureRow>(conn)?;
            Ok(rows.into_iter().map(Into::into).collect())
        })
        .await
    }

    async fn summarize_temperatures(
        &self,
        window: DateWindow,
    ) -> RepositoryResult<TemperatureSummary> {
        let (from, to) = window.bounds();
        self.with_conn("summarize_temperatures", move |conn| {
            let (low, mean, high) = measurement::table
                .filter(measurement::date.between(from, to))
                .select((
                    min(measurement::tobs),
                    avg(measurement::tobs),
                    max(measurement::tobs),
                ))
                .get_result::<(Option<f64>, Option<f64>, Option<f64>)>(conn)?;
            Ok(TemperatureSummary::from_aggregates(low, mean, high))
        })
        .await
    }
}

#[async_trait]
impl StationRepository for SqliteRepository {
    async fn fetch_stations(&self) -> RepositoryResult<Vec<Station>> {
        self.with_conn("fetch_stations", |conn| {
            let rows = station::table
                .select(StationRow::as_select())
                .order(station::id.asc())
                .load::<StationRow>(conn)?;
            Ok(rows.into_iter().map(Into::into).collect())
        })
        .await
    }
}
