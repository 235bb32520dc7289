//! Data Transfer Objects for the HTTP API.
//!
//! List endpoints answer with arrays of single-entry objects such as
//! `[{"2017-01-01": 0.0}, ...]`; [`KeyedEntry`] produces that shape. The two
//! temperature summary responses differ only in key order, which is fixed by
//! field order.

use chrono::NaiveDate;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::models::{PrecipitationReading, Station, TemperatureReading, TemperatureSummary};

/// A JSON object with exactly one `key: value` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedEntry<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> KeyedEntry<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }
}

impl<K: Serialize, V: Serialize> Serialize for KeyedEntry<K, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.key, &self.value)?;
        map.end()
    }
}

/// `{date: precipitation}`
pub type PrecipitationEntry = KeyedEntry<String, Option<f64>>;

/// `{station id: station name}`
pub type StationEntry = KeyedEntry<i32, String>;

/// `{date: temperature observation}`
pub type TemperatureEntry = KeyedEntry<String, f64>;

impl From<PrecipitationReading> for PrecipitationEntry {
    fn from(reading: PrecipitationReading) -> Self {
        KeyedEntry::new(reading.date, reading.prcp)
    }
}

impl From<Station> for StationEntry {
    fn from(station: Station) -> Self {
        KeyedEntry::new(station.id, station.name)
    }
}

impl From<TemperatureReading> for TemperatureEntry {
    fn from(reading: TemperatureReading) -> Self {
        KeyedEntry::new(reading.date, reading.tobs)
    }
}

/// Summary for `/api/v1.0/{start}`, keys ordered min, avg, max.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartSummaryResponse {
    #[serde(rename = "Min Temp")]
    pub min_temp: Option<f64>,
    #[serde(rename = "Avg Temp")]
    pub avg_temp: Option<f64>,
    #[serde(rename = "Max Temp")]
    pub max_temp: Option<f64>,
}

/// Summary for `/api/v1.0/{start}/{end}`, keys ordered max, avg, min.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeSummaryResponse {
    #[serde(rename = "Max Temp")]
    pub max_temp: Option<f64>,
    #[serde(rename = "Avg Temp")]
    pub avg_temp: Option<f64>,
    #[serde(rename = "Min Temp")]
    pub min_temp: Option<f64>,
}

impl From<TemperatureSummary> for StartSummaryResponse {
    fn from(summary: TemperatureSummary) -> Self {
        Self {
            min_temp: summary.min,
            avg_temp: summary.avg,
            max_temp: summary.max,
        }
    }
}

impl From<TemperatureSummary> for RangeSummaryResponse {
    fn from(summary: TemperatureSummary) -> Self {
        Self {
            max_temp: summary.max,
            avg_temp: summary.avg,
            min_temp: summary.min,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Database connection status
    pub database: String,
    /// First measurement date seen at startup
    pub first_day: NaiveDate,
    /// Last measurement date seen at startup
    pub last_day: NaiveDate,
}
