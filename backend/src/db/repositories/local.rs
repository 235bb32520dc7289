//! In-memory local repository implementation.
//!
//! Rows live in plain `Vec`s behind an `RwLock`. Query semantics match the
//! SQLite repository: rows come back in insertion order, dates are compared as
//! `YYYY-MM-DD` text and aggregates over no rows are all `None`.

use async_trait::async_trait;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::db::repository::*;
use crate::models::{
    DateWindow, Measurement, PrecipitationReading, Station, TemperatureReading,
    TemperatureSummary,
};

/// In-memory local repository.
///
/// # Example
/// ```
/// use climate_api::db::repositories::LocalRepository;
/// use climate_api::models::{Measurement, Station};
///
/// let repo = LocalRepository::with_data(
///     vec![Measurement::new("USC00519397", "2017-08-23", Some(0.0), 81.0)],
///     vec![Station::new(1, "WAIKIKI 717.2, HI US")],
/// );
/// assert_eq!(repo.measurement_count(), 1);
/// ```
#[derive(Clone, Default)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    measurements: Vec<Measurement>,
    stations: Vec<Station>,
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            measurements: Vec::new(),
            stations: Vec::new(),
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-populated with rows.
    pub fn with_data(measurements: Vec<Measurement>, stations: Vec<Station>) -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData {
                measurements,
                stations,
                is_healthy: true,
            })),
        }
    }

    pub fn insert_measurement(&self, measurement: Measurement) -> RepositoryResult<()> {
        self.write()?.measurements.push(measurement);
        Ok(())
    }

    pub fn insert_station(&self, station: Station) -> RepositoryResult<()> {
        self.write()?.stations.push(station);
        Ok(())
    }

    /// Simulate a lost backend: health checks report `false` and every query fails.
    pub fn set_healthy(&self, healthy: bool) -> RepositoryResult<()> {
        self.write()?.is_healthy = healthy;
        Ok(())
    }

    pub fn measurement_count(&self) -> usize {
        self.data.read().map(|d| d.measurements.len()).unwrap_or(0)
    }

    fn read(&self) -> RepositoryResult<RwLockReadGuard<'_, LocalData>> {
        self.data
            .read()
            .map_err(|_| RepositoryError::internal("local repository lock poisoned"))
    }

    fn write(&self) -> RepositoryResult<RwLockWriteGuard<'_, LocalData>> {
        self.data
            .write()
            .map_err(|_| RepositoryError::internal("local repository lock poisoned"))
    }

    /// Read guard for a query, failing when the repository is marked unhealthy.
    fn query(&self, operation: &str) -> RepositoryResult<RwLockReadGuard<'_, LocalData>> {
        let data = self.read()?;
        if !data.is_healthy {
            return Err(RepositoryError::connection_with_context(
                "local repository is unavailable",
                ErrorContext::new(operation),
            ));
        }
        Ok(data)
    }
}

/// Measurements whose date text falls inside the window.
fn in_window<'a>(
    measurements: &'a [Measurement],
    window: &DateWindow,
) -> impl Iterator<Item = &'a Measurement> {
    let (from, to) = window.bounds();
    measurements
        .iter()
        .filter(move |m| from.as_str() <= m.date.as_str() && m.date.as_str() <= to.as_str())
}

#[async_trait]
impl MeasurementRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.read()?.is_healthy)
    }

    async fn dataset_bounds(&self) -> RepositoryResult<Option<(String, String)>> {
        let data = self.query("dataset_bounds")?;
        let first = data.measurements.iter().map(|m| &m.date).min();
        let last = data.measurements.iter().map(|m| &m.date).max();
        Ok(first.cloned().zip(last.cloned()))
    }

    async fn fetch_precipitation(&self) -> RepositoryResult<Vec<PrecipitationReading>> {
        let data = self.query("fetch_precipitation")?;
        Ok(data.measurements.iter().map(Into::into).collect())
    }

    async fn fetch_temperature_observations(
        &self,
        window: DateWindow,
    ) -> RepositoryResult<Vec<TemperatureReading>> {
        let data = self.query("fetch_temperature_observations")?;
        Ok(in_window(&data.measurements, &window).map(Into::into).collect())
    }

    async fn summarize_temperatures(
        &self,
        window: DateWindow,
    ) -> RepositoryResult<TemperatureSummary> {
        let data = self.query("summarize_temperatures")?;
        Ok(TemperatureSummary::from_observations(
            in_window(&data.measurements, &window).map(|m| m.tobs),
        ))
    }
}

#[async_trait]
impl StationRepository for LocalRepository {
    async fn fetch_stations(&self) -> RepositoryResult<Vec<Station>> {
        let data = self.query("fetch_stations")?;
        Ok(data.stations.clone())
    }
}
