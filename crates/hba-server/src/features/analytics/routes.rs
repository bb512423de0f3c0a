//! Analytics API routes
//!
//! Wires the catalog queries to Axum HTTP handlers. The operation set is
//! fixed; there is no dynamic query language.
//!
//! # Route Structure
//!
//! - `GET /api/v1/analytics/bookings-by-month`
//! - `GET /api/v1/analytics/bookings-by-nationality?nationality=PRT`
//! - `GET /api/v1/analytics/popular-meal-package`
//! - `GET /api/v1/analytics/avg-length-of-stay`
//! - `GET /api/v1/analytics/total-revenue`
//! - `GET /api/v1/analytics/top-countries`
//! - `GET /api/v1/analytics/repeated-guests-percentage`
//! - `GET /api/v1/analytics/total-guests-by-year`
//! - `GET /api/v1/analytics/avg-daily-rate-resort` (Basic auth)
//! - `GET /api/v1/analytics/common-arrival-day-city` (Basic auth)
//! - `GET /api/v1/analytics/count-by-hotel-meal` (Basic auth)
//! - `GET /api/v1/analytics/revenue-resort-by-country` (Basic auth)
//! - `GET /api/v1/analytics/count-by-hotel-repeated-guest` (Basic auth)
//!
//! Every handler loads the dataset fresh, so responses always reflect the
//! file on disk at request time.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use crate::api::response::{ApiResponse, ErrorResponse};
use crate::auth::{require_basic_auth, AuthCredentials};
use crate::dataset::DatasetSource;

use super::queries::{self, BookingsByNationalityQuery};
use super::AnalyticsError;

// ============================================================================
// Router Configuration
// ============================================================================

/// Creates the analytics router with all catalog routes configured
///
/// The five reporting routes carried over from the credential-gated part of
/// the API require Basic auth; the rest are public.
pub fn analytics_routes(credentials: Arc<AuthCredentials>) -> Router<DatasetSource> {
    let gated = Router::new()
        .route("/avg-daily-rate-resort", get(avg_daily_rate_resort))
        .route("/common-arrival-day-city", get(common_arrival_day_city))
        .route("/count-by-hotel-meal", get(count_by_hotel_meal))
        .route("/revenue-resort-by-country", get(revenue_resort_by_country))
        .route(
            "/count-by-hotel-repeated-guest",
            get(count_by_hotel_repeated_guest),
        )
        .route_layer(middleware::from_fn_with_state(
            credentials,
            require_basic_auth,
        ));

    Router::new()
        .route("/bookings-by-month", get(bookings_by_month))
        .route("/bookings-by-nationality", get(bookings_by_nationality))
        .route("/popular-meal-package", get(popular_meal_package))
        .route("/avg-length-of-stay", get(avg_length_of_stay))
        .route("/total-revenue", get(total_revenue))
        .route("/top-countries", get(top_countries))
        .route(
            "/repeated-guests-percentage",
            get(repeated_guests_percentage),
        )
        .route("/total-guests-by-year", get(total_guests_by_year))
        .merge(gated)
}

// ============================================================================
// Query Handlers
// ============================================================================

#[tracing::instrument(skip(source))]
async fn bookings_by_month(
    State(source): State<DatasetSource>,
) -> Result<Response, AnalyticsError> {
    let response =
        queries::bookings_by_month::handle(source, queries::BookingsByMonthQuery::default())
            .await?;
    Ok(Json(ApiResponse::success(response)).into_response())
}

#[tracing::instrument(skip(source), fields(nationality = ?query.nationality))]
async fn bookings_by_nationality(
    State(source): State<DatasetSource>,
    Query(query): Query<BookingsByNationalityQuery>,
) -> Result<Response, AnalyticsError> {
    let response = queries::bookings_by_nationality::handle(source, query).await?;
    Ok(Json(ApiResponse::success(response)).into_response())
}

#[tracing::instrument(skip(source))]
async fn popular_meal_package(
    State(source): State<DatasetSource>,
) -> Result<Response, AnalyticsError> {
    let response =
        queries::popular_meal_package::handle(source, queries::PopularMealPackageQuery::default())
            .await?;
    Ok(Json(ApiResponse::success(response)).into_response())
}

#[tracing::instrument(skip(source))]
async fn avg_length_of_stay(
    State(source): State<DatasetSource>,
) -> Result<Response, AnalyticsError> {
    let response =
        queries::avg_length_of_stay::handle(source, queries::AvgLengthOfStayQuery::default())
            .await?;
    Ok(Json(ApiResponse::success(response)).into_response())
}

#[tracing::instrument(skip(source))]
async fn total_revenue(State(source): State<DatasetSource>) -> Result<Response, AnalyticsError> {
    let response =
        queries::total_revenue::handle(source, queries::TotalRevenueQuery::default()).await?;
    Ok(Json(ApiResponse::success(response)).into_response())
}

#[tracing::instrument(skip(source))]
async fn top_countries(State(source): State<DatasetSource>) -> Result<Response, AnalyticsError> {
    let response =
        queries::top_countries::handle(source, queries::TopCountriesQuery::default()).await?;
    Ok(Json(ApiResponse::success(response)).into_response())
}

#[tracing::instrument(skip(source))]
async fn repeated_guests_percentage(
    State(source): State<DatasetSource>,
) -> Result<Response, AnalyticsError> {
    let response = queries::repeated_guests_percentage::handle(
        source,
        queries::RepeatedGuestsPercentageQuery::default(),
    )
    .await?;
    Ok(Json(ApiResponse::success(response)).into_response())
}

#[tracing::instrument(skip(source))]
async fn total_guests_by_year(
    State(source): State<DatasetSource>,
) -> Result<Response, AnalyticsError> {
    let response =
        queries::total_guests_by_year::handle(source, queries::TotalGuestsByYearQuery::default())
            .await?;
    Ok(Json(ApiResponse::success(response)).into_response())
}

#[tracing::instrument(skip(source))]
async fn avg_daily_rate_resort(
    State(source): State<DatasetSource>,
) -> Result<Response, AnalyticsError> {
    let response =
        queries::avg_daily_rate_resort::handle(source, queries::AvgDailyRateResortQuery::default())
            .await?;
    Ok(Json(ApiResponse::success(response)).into_response())
}

#[tracing::instrument(skip(source))]
async fn common_arrival_day_city(
    State(source): State<DatasetSource>,
) -> Result<Response, AnalyticsError> {
    let response = queries::common_arrival_day_city::handle(
        source,
        queries::CommonArrivalDayCityQuery::default(),
    )
    .await?;
    Ok(Json(ApiResponse::success(response)).into_response())
}

#[tracing::instrument(skip(source))]
async fn count_by_hotel_meal(
    State(source): State<DatasetSource>,
) -> Result<Response, AnalyticsError> {
    let response =
        queries::count_by_hotel_meal::handle(source, queries::CountByHotelMealQuery::default())
            .await?;
    Ok(Json(ApiResponse::success(response)).into_response())
}

#[tracing::instrument(skip(source))]
async fn revenue_resort_by_country(
    State(source): State<DatasetSource>,
) -> Result<Response, AnalyticsError> {
    let response = queries::revenue_resort_by_country::handle(
        source,
        queries::RevenueResortByCountryQuery::default(),
    )
    .await?;
    Ok(Json(ApiResponse::success(response)).into_response())
}

#[tracing::instrument(skip(source))]
async fn count_by_hotel_repeated_guest(
    State(source): State<DatasetSource>,
) -> Result<Response, AnalyticsError> {
    let response = queries::count_by_hotel_repeated_guest::handle(
        source,
        queries::CountByHotelRepeatedGuestQuery::default(),
    )
    .await?;
    Ok(Json(ApiResponse::success(response)).into_response())
}

// ============================================================================
// Error Handling
// ============================================================================

impl IntoResponse for AnalyticsError {
    fn into_response(self) -> Response {
        match self {
            AnalyticsError::NoData(message) => {
                let error = ErrorResponse::new("NOT_FOUND", message);
                (StatusCode::NOT_FOUND, Json(error)).into_response()
            }
            AnalyticsError::NationalityRequired => {
                let error = ErrorResponse::new("VALIDATION_ERROR", self.to_string());
                (StatusCode::BAD_REQUEST, Json(error)).into_response()
            }
            AnalyticsError::EmptyDataset => {
                tracing::error!("Repeated-guest percentage requested on an empty dataset");
                let error =
                    ErrorResponse::new("INTERNAL_ERROR", "Booking dataset contains no rows");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
            }
            AnalyticsError::UnknownMonth(_) | AnalyticsError::InvalidArrivalDate { .. } => {
                tracing::error!("Booking dataset contains unusable date fields: {}", self);
                let error = ErrorResponse::new(
                    "INTERNAL_ERROR",
                    "The booking dataset could not be processed",
                );
                (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
            }
            AnalyticsError::Dataset(ref e) => {
                tracing::error!("Failed to load booking dataset: {}", e);
                let error = ErrorResponse::new(
                    "INTERNAL_ERROR",
                    "The booking dataset could not be loaded",
                );
                (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_structure() {
        let credentials = Arc::new(AuthCredentials::new("user", "password"));
        let router = analytics_routes(credentials);
        assert!(format!("{:?}", router).contains("Router"));
    }

    #[test]
    fn test_no_data_maps_to_not_found() {
        let response = AnalyticsError::NoData("No booking information found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_empty_dataset_maps_to_internal_error() {
        let response = AnalyticsError::EmptyDataset.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_missing_nationality_maps_to_bad_request() {
        let response = AnalyticsError::NationalityRequired.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
