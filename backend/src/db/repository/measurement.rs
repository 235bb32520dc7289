//! Read-only access to the `measurement` table.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{DateWindow, PrecipitationReading, TemperatureReading, TemperatureSummary};

/// Repository trait for daily measurement queries.
///
/// Date filters take a [`DateWindow`] whose bounds are inclusive and compared
/// against the stored `YYYY-MM-DD` text.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait MeasurementRepository: Send + Sync {
    /// Check if the database connection is healthy.
    ///
    /// # Returns
    /// - `Ok(true)` if connection is healthy
    /// - `Ok(false)` if connection is unhealthy but no error occurred
    /// - `Err(RepositoryError)` if an error occurred during the check
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Earliest and latest stored measurement dates, as raw text.
    ///
    /// Returns `Ok(None)` when the table has no rows.
    async fn dataset_bounds(&self) -> RepositoryResult<Option<(String, String)>>;

    /// Every `(date, prcp)` pair in table order.
    async fn fetch_precipitation(&self) -> RepositoryResult<Vec<PrecipitationReading>>;

    /// `(date, tobs)` pairs whose date falls inside `window`, in table order.
    async fn fetch_temperature_observations(
        &self,
        window: DateWindow,
    ) -> RepositoryResult<Vec<TemperatureReading>>;

    /// Min, average (one decimal) and max temperature inside `window`.
    ///
    /// An empty window yields a summary with every field `None`.
    async fn summarize_temperatures(&self, window: DateWindow)
        -> RepositoryResult<TemperatureSummary>;
}
