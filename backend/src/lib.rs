//! # Climate API
//!
//! Read-only HTTP API over the Hawaii climate dataset.
//!
//! The dataset is a SQLite file with a `measurement` table (daily
//! precipitation and temperature observations per station) and a `station`
//! table. The server exposes precipitation and station listings, the last
//! twelve months of temperature observations, and min/avg/max temperature
//! summaries over caller-supplied date ranges.
//!
//! ## Architecture
//!
//! - [`models`]: domain types and date-window arithmetic
//! - [`db`]: repository traits, the SQLite and in-memory backends, configuration
//! - [`http`]: axum router, handlers and response types

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod db;
pub mod models;

#[cfg(feature = "http-server")]
pub mod http;
