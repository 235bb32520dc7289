use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::Station;

/// Repository trait for the `station` table.
#[async_trait]
pub trait StationRepository: Send + Sync {
    /// Every station `(id, name)` in table order.
    async fn fetch_stations(&self) -> RepositoryResult<Vec<Station>>;
}
