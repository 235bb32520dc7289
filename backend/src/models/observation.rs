//! Row-level domain types for the measurement and station tables.

use serde::{Deserialize, Serialize};

/// A single daily reading from the `measurement` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Station code the reading was taken at (e.g. `USC00519397`)
    pub station: String,
    /// Calendar date as stored, `YYYY-MM-DD`
    pub date: String,
    /// Precipitation, missing for some days
    pub prcp: Option<f64>,
    /// Temperature observation
    pub tobs: f64,
}

impl Measurement {
    pub fn new(
        station: impl Into<String>,
        date: impl Into<String>,
        prcp: Option<f64>,
        tobs: f64,
    ) -> Self {
        Self {
            station: station.into(),
            date: date.into(),
            prcp,
            tobs,
        }
    }
}

/// A weather-observation site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: i32,
    pub name: String,
}

impl Station {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// `(date, prcp)` projection of a measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct PrecipitationReading {
    pub date: String,
    pub prcp: Option<f64>,
}

/// `(date, tobs)` projection of a measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureReading {
    pub date: String,
    pub tobs: f64,
}

impl From<&Measurement> for PrecipitationReading {
    fn from(m: &Measurement) -> Self {
        Self {
            date: m.date.clone(),
            prcp: m.prcp,
        }
    }
}

impl From<&Measurement> for TemperatureReading {
    fn from(m: &Measurement) -> Self {
        Self {
            date: m.date.clone(),
            tobs: m.tobs,
        }
    }
}

/// Min / average / max of the temperature observations inside a date window.
///
/// Every field is `None` when the window matched no rows, mirroring what SQL
/// aggregate functions return over an empty set.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TemperatureSummary {
    pub min: Option<f64>,
    pub avg: Option<f64>,
    pub max: Option<f64>,
}

impl TemperatureSummary {
    /// Build a summary from raw aggregates, rounding the average to one decimal.
    pub fn from_aggregates(min: Option<f64>, avg: Option<f64>, max: Option<f64>) -> Self {
        Self {
            min,
            avg: avg.map(round_one_decimal),
            max,
        }
    }

    /// Summarize an iterator of observations in a single pass.
    pub fn from_observations<I>(observations: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min: Option<f64> = None;
        let mut max: Option<f64> = None;

        for tobs in observations {
            count += 1;
            sum += tobs;
            min = Some(min.map_or(tobs, |m| m.min(tobs)));
            max = Some(max.map_or(tobs, |m| m.max(tobs)));
        }

        let avg = (count > 0).then(|| sum / count as f64);
        Self::from_aggregates(min, avg, max)
    }
}

/// Round half away from zero to one decimal place.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
