//! Repository trait definitions for database operations.
//!
//! The dataset is split across two focused traits, one per table:
//!
//! - [`measurement`]: daily readings, the dataset date range and temperature aggregates
//! - [`station`]: the station listing
//!
//! Functions that need both use the [`FullRepository`] bound:
//!
//! ```ignore
//! async fn overview(repo: &dyn FullRepository) -> RepositoryResult<usize> {
//!     let stations = repo.fetch_stations().await?;
//!     let readings = repo.fetch_precipitation().await?;
//!     Ok(stations.len() + readings.len())
//! }
//! ```

pub mod error;
pub mod measurement;
pub mod station;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

pub use measurement::MeasurementRepository;
pub use station::StationRepository;

/// Composite trait bound for a complete repository implementation.
pub trait FullRepository: MeasurementRepository + StationRepository {}

impl<T> FullRepository for T where T: MeasurementRepository + StationRepository {}
