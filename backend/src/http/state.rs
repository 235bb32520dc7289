//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::repository::FullRepository;
use crate::models::DatasetRange;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for database operations
    pub repository: Arc<dyn FullRepository>,
    /// Dataset date range computed at startup
    pub dataset_range: DatasetRange,
}

impl AppState {
    /// Create a new application state with the given repository and date range.
    pub fn new(repository: Arc<dyn FullRepository>, dataset_range: DatasetRange) -> Self {
        Self {
            repository,
            dataset_range,
        }
    }
}
