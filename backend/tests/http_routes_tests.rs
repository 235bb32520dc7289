//! Route-level tests driving the full router with `oneshot`.

#![cfg(feature = "http-server")]

mod support;

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header::CONTENT_TYPE, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use climate_api::db::{load_dataset_range, FullRepository, LocalRepository};
use climate_api::http::error::INVALID_DATE_MESSAGE;
use climate_api::http::{create_router, AppState};

struct TestResponse {
    status: StatusCode,
    content_type: String,
    body: String,
}

async fn app_for(repo: LocalRepository) -> Router {
    let range = load_dataset_range(&repo).await.unwrap();
    let repository: Arc<dyn FullRepository> = Arc::new(repo);
    create_router(AppState::new(repository, range))
}

async fn get(app: Router, uri: &str) -> TestResponse {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string())
        .unwrap_or_default();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    TestResponse {
        status,
        content_type,
        body: String::from_utf8(body.to_vec()).unwrap(),
    }
}

#[tokio::test]
async fn test_index_lists_endpoints() {
    let app = app_for(support::sample_local_repository()).await;
    let res = get(app, "/").await;

    assert_eq!(res.status, StatusCode::OK);
    assert!(res.content_type.starts_with("text/html"));
    assert!(res.body.starts_with("<!DOCTYPE html>"));
    assert!(res.body.contains("<title>Climate Flask API</title>"));
    assert!(res.body.contains("/api/v1.0/precipitation"));
    assert!(res.body.contains("/api/v1.0/stations"));
    assert!(res.body.contains("TOB tempurature ( /api/v1.0/tob )"));
    assert!(res.body.ends_with("</body></html>"));
}

#[tokio::test]
async fn test_precipitation_returns_every_row_in_order() {
    let app = app_for(support::sample_local_repository()).await;
    let res = get(app, "/api/v1.0/precipitation").await;

    assert_eq!(res.status, StatusCode::OK);
    assert!(res.content_type.starts_with("application/json"));
    assert!(res
        .body
        .starts_with(r#"[{"2010-01-01":0.08},{"2016-08-22":0.4},{"2016-08-23":0.0},{"2016-08-24":null}"#));

    let entries: Vec<serde_json::Value> = serde_json::from_str(&res.body).unwrap();
    assert_eq!(entries.len(), 10);
}

#[tokio::test]
async fn test_stations_keyed_by_id() {
    let app = app_for(support::sample_local_repository()).await;
    let res = get(app, "/api/v1.0/stations").await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(
        res.body,
        r#"[{"1":"WAIKIKI 717.2, HI US"},{"2":"KANEOHE 838.1, HI US"}]"#
    );
}

#[tokio::test]
async fn test_tob_covers_last_twelve_months_padded() {
    let app = app_for(support::sample_local_repository()).await;
    let res = get(app, "/api/v1.0/tob").await;

    assert_eq!(res.status, StatusCode::OK);
    let entries: Vec<serde_json::Map<String, serde_json::Value>> =
        serde_json::from_str(&res.body).unwrap();
    let dates: Vec<&str> = entries
        .iter()
        .map(|e| e.keys().next().unwrap().as_str())
        .collect();

    // 2017-08-23 minus twelve months is 2016-08-23, padded back to 2016-08-22
    assert_eq!(dates.len(), 9);
    assert_eq!(dates.first(), Some(&"2016-08-22"));
    assert_eq!(dates.last(), Some(&"2017-08-23"));
    assert!(!dates.contains(&"2010-01-01"));
}

#[tokio::test]
async fn test_summary_from_start() {
    let app = app_for(support::sample_local_repository()).await;
    let res = get(app, "/api/v1.0/2017-01-01").await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(
        res.body,
        r#"[{"Min Temp":62.0,"Avg Temp":72.3,"Max Temp":81.0}]"#
    );
}

#[tokio::test]
async fn test_summary_between_uses_max_first_key_order() {
    let app = app_for(support::sample_local_repository()).await;
    let res = get(app, "/api/v1.0/2017-01-01/2017-01-31").await;

    assert_eq!(res.status, StatusCode::OK);
    // 2017-02-01 is picked up by the one-day padding
    assert_eq!(
        res.body,
        r#"[{"Max Temp":73.0,"Avg Temp":68.3,"Min Temp":62.0}]"#
    );
}

#[tokio::test]
async fn test_summary_between_single_observation() {
    let app = app_for(support::sample_local_repository()).await;
    let res = get(app, "/api/v1.0/2017-01-10/2017-01-20").await;

    assert_eq!(
        res.body,
        r#"[{"Max Temp":70.0,"Avg Temp":70.0,"Min Temp":70.0}]"#
    );
}

#[tokio::test]
async fn test_summary_with_no_matching_rows_is_null() {
    let app = app_for(support::sample_local_repository()).await;

    let res = get(app.clone(), "/api/v1.0/2017-09-01").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(
        res.body,
        r#"[{"Min Temp":null,"Avg Temp":null,"Max Temp":null}]"#
    );

    let res = get(app, "/api/v1.0/2017-03-01/2017-03-10").await;
    assert_eq!(
        res.body,
        r#"[{"Max Temp":null,"Avg Temp":null,"Min Temp":null}]"#
    );
}

#[tokio::test]
async fn test_single_digit_month_and_day_accepted() {
    let app = app_for(support::sample_local_repository()).await;
    let res = get(app, "/api/v1.0/2017-1-10/2017-1-20").await;

    assert_eq!(
        res.body,
        r#"[{"Max Temp":70.0,"Avg Temp":70.0,"Min Temp":70.0}]"#
    );
}

#[tokio::test]
async fn test_superset_range_widens_extremes() {
    let app = app_for(support::sample_local_repository()).await;

    let summary = |body: &str| -> (f64, f64) {
        let rows: Vec<serde_json::Value> = serde_json::from_str(body).unwrap();
        (
            rows[0]["Min Temp"].as_f64().unwrap(),
            rows[0]["Max Temp"].as_f64().unwrap(),
        )
    };

    let inner = get(app.clone(), "/api/v1.0/2017-01-01/2017-01-31").await;
    let outer = get(app, "/api/v1.0/2016-08-01/2017-08-23").await;
    let (inner_min, inner_max) = summary(&inner.body);
    let (outer_min, outer_max) = summary(&outer.body);

    assert!(outer_min <= inner_min);
    assert!(outer_max >= inner_max);
}

#[tokio::test]
async fn test_malformed_dates_answer_plain_text() {
    let app = app_for(support::sample_local_repository()).await;

    for uri in [
        "/api/v1.0/not-a-date",
        "/api/v1.0/2017-13-01",
        "/api/v1.0/garbage/2017-01-31",
        "/api/v1.0/2017-01-01/garbage",
        "/api/v1.0/+2017-01-01",
        "/api/v1.0/-2017-01-01",
        "/api/v1.0/017-01-01",
        "/api/v1.0/%202017-01-01",
        "/api/v1.0/2017-01-01/+12017-01-01",
        "/api/v1.0/12017-01-01/2017-01-31",
    ] {
        let res = get(app.clone(), uri).await;
        assert_eq!(res.status, StatusCode::OK, "{}", uri);
        assert!(res.content_type.starts_with("text/plain"), "{}", uri);
        assert_eq!(res.body, INVALID_DATE_MESSAGE, "{}", uri);
    }
}

#[tokio::test]
async fn test_backend_failure_is_500() {
    let repo = support::sample_local_repository();
    let app = app_for(repo.clone()).await;
    repo.set_healthy(false).unwrap();

    let res = get(app.clone(), "/api/v1.0/stations").await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    let json: serde_json::Value = serde_json::from_str(&res.body).unwrap();
    assert_eq!(json["code"], "REPOSITORY_ERROR");
    assert_eq!(json["details"], "operation=fetch_stations");

    let res = get(app, "/api/v1.0/2017-01-01").await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_health_reports_range_and_database() {
    let repo = support::sample_local_repository();
    let app = app_for(repo.clone()).await;

    let res = get(app.clone(), "/health").await;
    assert_eq!(res.status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&res.body).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["database"], "connected");
    assert_eq!(json["first_day"], "2010-01-01");
    assert_eq!(json["last_day"], "2017-08-23");

    repo.set_healthy(false).unwrap();
    let res = get(app, "/health").await;
    let json: serde_json::Value = serde_json::from_str(&res.body).unwrap();
    assert_eq!(json["database"], "disconnected");
}

#[tokio::test]
async fn test_unknown_path_is_404() {
    let app = app_for(support::sample_local_repository()).await;
    let res = get(app, "/api/v1.0/2017-01-01/2017-01-31/extra").await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}
