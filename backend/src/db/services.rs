//! Service layer over the repository traits.
//!
//! Handlers call the repository directly for single queries; the functions
//! here cover the few operations that combine a query with parsing or
//! interpretation.

use crate::db::repository::{
    ErrorContext, FullRepository, MeasurementRepository, RepositoryError, RepositoryResult,
};
use crate::models::{parse_iso_date, DatasetRange};

/// Compute the dataset's first and last measurement dates.
///
/// Run once at startup; the result is shared read-only by every request.
///
/// # Errors
/// * `NotFound` when the measurement table is empty
/// * `ValidationError` when a stored date is not `YYYY-MM-DD`
pub async fn load_dataset_range(repo: &dyn FullRepository) -> RepositoryResult<DatasetRange> {
    let (first, last) = repo.dataset_bounds().await?.ok_or_else(|| {
        RepositoryError::not_found_with_context(
            "measurement table has no rows",
            ErrorContext::new("load_dataset_range").with_entity("measurement"),
        )
    })?;

    let parse = |raw: &str| {
        parse_iso_date(raw).map_err(|e| {
            RepositoryError::validation_with_context(
                format!("stored date '{}' is not YYYY-MM-DD: {}", raw, e),
                ErrorContext::new("load_dataset_range").with_entity("measurement"),
            )
        })
    };

    Ok(DatasetRange::new(parse(&first)?, parse(&last)?))
}

/// Check that the backing store answers queries.
pub async fn health_check(repo: &dyn FullRepository) -> RepositoryResult<bool> {
    repo.health_check().await
}
