//! Database module for the climate dataset.
//!
//! Storage access goes through the repository traits so the HTTP layer does
//! not depend on a particular backend.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  HTTP handlers                                          │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs)                            │
//! │  - Dataset range bootstrap                              │
//! │  - Health checks                                        │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository/)                        │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────┴──────────────────┐
//!     │ SqliteRepository  LocalRepository│
//!     │ (diesel, r2d2)    (in-memory)    │
//!     └──────────────────────────────────┘
//! ```
//!
//! # Recommended Usage
//!
//! ```ignore
//! use climate_api::db::{services, RepositoryFactory};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = RepositoryFactory::from_config_or_env().await?;
//!     let range = services::load_dataset_range(repo.as_ref()).await?;
//!     println!("data from {} to {}", range.first_day, range.last_day);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod factory;
pub mod repo_config;
pub mod repositories;
pub mod repository;
pub mod services;

pub use config::SqliteConfig;
pub use factory::{RepositoryFactory, RepositoryType};
pub use repo_config::RepositoryConfig;
pub use repositories::LocalRepository;
#[cfg(feature = "sqlite-repo")]
pub use repositories::SqliteRepository;
pub use repository::{
    ErrorContext, FullRepository, MeasurementRepository, RepositoryError, RepositoryResult,
    StationRepository,
};
pub use services::{health_check, load_dataset_range};
