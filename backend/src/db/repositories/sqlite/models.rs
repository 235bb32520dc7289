use diesel::prelude::*;

use super::schema::{measurement, station};
use crate::models::{PrecipitationReading, Station, TemperatureReading};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = measurement)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PrecipitationRow {
    pub date: String,
    pub prcp: Option<f64>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = measurement)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TemperatureRow {
    pub date: String,
    pub tobs: f64,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = station)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct StationRow {
    pub id: i32,
    pub name: String,
}

impl From<PrecipitationRow> for PrecipitationReading {
    fn from(row: PrecipitationRow) -> Self {
        Self {
            date: row.date,
            prcp: row.prcp,
        }
    }
}

impl From<TemperatureRow> for TemperatureReading {
    fn from(row: TemperatureRow) -> Self {
        Self {
            date: row.date,
            tobs: row.tobs,
        }
    }
}

impl From<StationRow> for Station {
    fn from(row: StationRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
        }
    }
}
