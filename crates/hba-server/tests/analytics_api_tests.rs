//! HTTP-level tests for the analytics catalog
//!
//! These drive the analytics router end to end against temporary dataset
//! files; no database is required.

use std::io::Write;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use http_body_util::BodyExt;
use tempfile::NamedTempFile;
use tower::ServiceExt;

use hba_server::auth::AuthCredentials;
use hba_server::dataset::DatasetSource;
use hba_server::features::analytics::analytics_routes;

const USERNAME: &str = "reception";
const PASSWORD: &str = "front-desk";

const HEADER: &str = "hotel,is_canceled,arrival_date_year,arrival_date_month,\
arrival_date_day_of_month,stays_in_weekend_nights,stays_in_week_nights,adults,children,\
babies,meal,country,is_repeated_guest,adr";

fn dataset_file(rows: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    let mut csv = String::from(HEADER);
    for row in rows {
        csv.push('\n');
        csv.push_str(row);
    }
    file.write_all(csv.as_bytes()).unwrap();
    file
}

fn sample_rows() -> Vec<&'static str> {
    vec![
        "City Hotel,0,2016,July,4,1,2,2,0,0,BB,PRT,0,100.0",
        "City Hotel,0,2016,July,11,0,3,1,1,0,BB,PRT,1,80.0",
        "City Hotel,1,2016,August,2,2,2,2,0,0,SC,GBR,0,90.0",
        "Resort Hotel,0,2017,July,5,1,1,2,0,1,HB,GBR,0,150.0",
        "Resort Hotel,0,2017,August,20,2,5,2,2,0,HB,FRA,0,200.0",
    ]
}

fn app(source: DatasetSource) -> Router {
    let credentials = Arc::new(AuthCredentials::new(USERNAME, PASSWORD));
    Router::new().nest("/analytics", analytics_routes(credentials).with_state(source))
}

fn basic_auth() -> String {
    format!(
        "Basic {}",
        STANDARD.encode(format!("{}:{}", USERNAME, PASSWORD))
    )
}

async fn get(
    router: Router,
    uri: &str,
    authorization: Option<&str>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().uri(uri);
    if let Some(value) = authorization {
        builder = builder.header("Authorization", value);
    }
    let request = builder.body(Body::empty()).unwrap();

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn bookings_by_month_counts_in_calendar_order() {
    let file = dataset_file(&sample_rows());
    let router = app(DatasetSource::new(file.path()));

    let (status, body) = get(router, "/analytics/bookings-by-month", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let data = body["data"].as_array().unwrap();
    assert_eq!(data[0]["month"], "July");
    assert_eq!(data[0]["count"], 3);
    assert_eq!(data[1]["month"], "August");
    assert_eq!(data[1]["count"], 2);
}

#[tokio::test]
async fn empty_dataset_signals_not_found() {
    let file = dataset_file(&[]);
    let router = app(DatasetSource::new(file.path()));

    let (status, body) = get(router, "/analytics/bookings-by-month", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn missing_dataset_file_signals_not_found() {
    let router = app(DatasetSource::new("/nowhere/bookings.csv"));

    let (status, _) = get(router, "/analytics/top-countries", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn repeated_guests_percentage_on_empty_dataset_is_fatal() {
    let file = dataset_file(&[]);
    let router = app(DatasetSource::new(file.path()));

    let (status, body) = get(router, "/analytics/repeated-guests-percentage", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
}

#[tokio::test]
async fn repeated_guests_percentage_is_within_bounds() {
    let file = dataset_file(&sample_rows());
    let router = app(DatasetSource::new(file.path()));

    let (status, body) = get(router, "/analytics/repeated-guests-percentage", None).await;
    assert_eq!(status, StatusCode::OK);
    let percentage = body["data"]["percentage"].as_f64().unwrap();
    assert!((0.0..=100.0).contains(&percentage));
    assert_eq!(percentage, 20.0);
}

#[tokio::test]
async fn top_countries_counts_are_non_increasing() {
    let file = dataset_file(&sample_rows());
    let router = app(DatasetSource::new(file.path()));

    let (status, body) = get(router, "/analytics/top-countries", None).await;
    assert_eq!(status, StatusCode::OK);

    let data = body["data"].as_array().unwrap();
    assert!(data.len() <= 5);
    let counts: Vec<u64> = data
        .iter()
        .map(|entry| entry["booking_count"].as_u64().unwrap())
        .collect();
    assert!(counts.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn nationality_parameter_is_required() {
    let file = dataset_file(&sample_rows());
    let router = app(DatasetSource::new(file.path()));

    let (status, body) = get(router, "/analytics/bookings-by-nationality", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn nationality_filter_returns_positions_in_filtered_set() {
    let file = dataset_file(&sample_rows());
    let router = app(DatasetSource::new(file.path()));

    let (status, body) = get(
        router,
        "/analytics/bookings-by-nationality?nationality=GBR",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["id"], 0);
    assert_eq!(data[1]["id"], 1);
}

#[tokio::test]
async fn gated_route_requires_credentials() {
    let file = dataset_file(&sample_rows());
    let source = DatasetSource::new(file.path());

    let (status, _) = get(app(source.clone()), "/analytics/count-by-hotel-meal", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = get(
        app(source),
        "/analytics/count-by-hotel-meal",
        Some(&basic_auth()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn count_by_hotel_meal_groups_ascending() {
    let file = dataset_file(&[
        "City Hotel,0,2016,July,4,1,2,2,0,0,BB,PRT,0,100.0",
        "City Hotel,0,2016,July,5,1,2,2,0,0,BB,PRT,0,100.0",
        "Resort Hotel,0,2016,July,6,1,2,2,0,0,HB,PRT,0,100.0",
    ]);
    let router = app(DatasetSource::new(file.path()));

    let (status, body) = get(
        router,
        "/analytics/count-by-hotel-meal",
        Some(&basic_auth()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["hotel"], "City Hotel");
    assert_eq!(data[0]["meal"], "BB");
    assert_eq!(data[0]["count"], 2);
    assert_eq!(data[1]["hotel"], "Resort Hotel");
    assert_eq!(data[1]["meal"], "HB");
    assert_eq!(data[1]["count"], 1);
}

#[tokio::test]
async fn total_revenue_excludes_cancelled_rows() {
    let file = dataset_file(&[
        "City Hotel,0,2016,July,4,1,2,2,0,0,BB,PRT,0,100.0",
        "City Hotel,1,2016,July,5,1,2,2,0,0,BB,PRT,0,999.0",
    ]);
    let router = app(DatasetSource::new(file.path()));

    let (status, body) = get(router, "/analytics/total-revenue", None).await;
    assert_eq!(status, StatusCode::OK);

    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    // 100.0 adr x 3 nights; the cancelled row contributes nothing.
    assert_eq!(data[0]["total_revenue"], 300.0);
}

#[tokio::test]
async fn common_arrival_day_fails_on_impossible_date() {
    let file = dataset_file(&["City Hotel,0,2016,February,30,1,2,2,0,0,BB,PRT,0,100.0"]);
    let router = app(DatasetSource::new(file.path()));

    let (status, body) = get(
        router,
        "/analytics/common-arrival-day-city",
        Some(&basic_auth()),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
}

#[tokio::test]
async fn repeated_calls_on_unchanged_file_are_identical() {
    let file = dataset_file(&sample_rows());
    let source = DatasetSource::new(file.path());

    let (_, first) = get(app(source.clone()), "/analytics/avg-length-of-stay", None).await;
    let (_, second) = get(app(source), "/analytics/avg-length-of-stay", None).await;
    assert_eq!(first, second);
}
