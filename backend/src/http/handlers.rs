//! HTTP handlers for the REST API.
//!
//! Each data handler performs exactly one repository call. Date ranges are
//! widened by one day on each side before querying.

use axum::{
    extract::{Path, State},
    response::Html,
    Json,
};
use chrono::NaiveDate;
use tracing::{debug, info};

use super::dto::{
    HealthResponse, PrecipitationEntry, RangeSummaryResponse, StartSummaryResponse, StationEntry,
    TemperatureEntry,
};
use super::error::AppError;
use super::state::AppState;
use crate::db::repository::{MeasurementRepository, StationRepository};
use crate::db::services as db_services;
use crate::models::{parse_iso_date, DateWindow};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Landing page listing the available endpoints.
pub const INDEX_HTML: &str = concat!(
    "<!DOCTYPE html><html><head><title>Climate Flask API</title></head><body>",
    "<div><span style='font-weight:bold;'>Available API endpoints, response is in JSON:</span>",
    "<ul>",
    "<li><a href='/api/v1.0/precipitation'>precipitation ( /api/v1.0/precipitation )</a></li>",
    "<li><a href='/api/v1.0/stations'>stations ( /api/v1.0/stations )</a></li>",
    "<li><a href='/api/v1.0/tob'>TOB tempurature ( /api/v1.0/tob )</a></li>",
    "<li>replace start and with ISO dates YYYY-MM-DD ( /api/v1.0/&lt;start date&gt; )</li>",
    "<li>replace start and end date with ISO dates YYYY-MM-DD ( /api/v1.0/&lt;start date&gt;/&lt;end date&gt; )</li>",
    "</ul>",
    "</div>",
    "</body></html>",
);

fn parse_path_date(raw: &str) -> Result<NaiveDate, AppError> {
    parse_iso_date(raw).map_err(|e| {
        debug!("rejecting path date {:?}: {}", raw, e);
        AppError::InvalidDate
    })
}

/// GET /
pub async fn index() -> Html<&'static str> {
    info!("root request");
    Html(INDEX_HTML)
}

/// GET /health
///
/// Reports database reachability and the dataset range loaded at startup.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1.0".to_string(),
        database,
        first_day: state.dataset_range.first_day,
        last_day: state.dataset_range.last_day,
    })
}

/// GET /api/v1.0/precipitation
///
/// Every `{date: prcp}` pair in the dataset.
pub async fn precipitation(State(state): State<AppState>) -> HandlerResult<Vec<PrecipitationEntry>> {
    info!("precipitation request");
    let readings = state.repository.fetch_precipitation().await?;
    Ok(Json(readings.into_iter().map(Into::into).collect()))
}

/// GET /api/v1.0/stations
///
/// Every `{id: name}` station pair.
pub async fn stations(State(state): State<AppState>) -> HandlerResult<Vec<StationEntry>> {
    info!("stations request");
    let stations = state.repository.fetch_stations().await?;
    Ok(Json(stations.into_iter().map(Into::into).collect()))
}

/// GET /api/v1.0/tob
///
/// `{date: tobs}` pairs for the last twelve months of data.
pub async fn temperature_observations(
    State(state): State<AppState>,
) -> HandlerResult<Vec<TemperatureEntry>> {
    info!("tob request");
    let window = state.dataset_range.last_year_window();
    let readings = state
        .repository
        .fetch_temperature_observations(window)
        .await?;
    Ok(Json(readings.into_iter().map(Into::into).collect()))
}

/// GET /api/v1.0/{start}
///
/// Temperature summary from `start` through the last recorded day.
pub async fn temperature_summary_from(
    State(state): State<AppState>,
    Path(start): Path<String>,
) -> HandlerResult<Vec<StartSummaryResponse>> {
    info!("start date range request");
    let start = parse_path_date(&start)?;
    let window = state.dataset_range.window_from(start);
    let summary = state.repository.summarize_temperatures(window).await?;
    Ok(Json(vec![summary.into()]))
}

/// GET /api/v1.0/{start}/{end}
///
/// Temperature summary between `start` and `end`.
pub async fn temperature_summary_between(
    State(state): State<AppState>,
    Path((start, end)): Path<(String, String)>,
) -> HandlerResult<Vec<RangeSummaryResponse>> {
    info!("date range request");
    let start = parse_path_date(&start)?;
    let end = parse_path_date(&end)?;
    let window = DateWindow::padded(start, end);
    let summary = state.repository.summarize_temperatures(window).await?;
    Ok(Json(vec![summary.into()]))
}
