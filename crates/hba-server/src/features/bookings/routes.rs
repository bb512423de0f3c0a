//! Bookings API routes
//!
//! # Route Structure
//!
//! - `POST /api/v1/bookings/upload` - Replace the booking table from a CSV file
//! - `GET /api/v1/bookings` - List bookings with skip/limit pagination
//! - `GET /api/v1/bookings/search` - Search bookings by equality filters
//! - `GET /api/v1/bookings/stats` - Summary statistics over stored bookings
//! - `GET /api/v1/bookings/:id` - Get a single booking by id

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use sqlx::PgPool;

use crate::api::response::{ApiResponse, ErrorResponse};

use super::commands::{upload, ReplaceBookingsCommand, ReplaceBookingsError};
use super::queries::{
    self, BookingStatsError, BookingStatsQuery, GetBookingError, GetBookingQuery,
    ListBookingsError, ListBookingsQuery, SearchBookingsError, SearchBookingsQuery,
};

// ============================================================================
// Router Configuration
// ============================================================================

/// Creates the bookings router with all routes configured
pub fn bookings_routes() -> Router<PgPool> {
    Router::new()
        .route("/upload", post(upload_bookings))
        .route("/", get(list_bookings))
        .route("/search", get(search_bookings))
        .route("/stats", get(booking_stats))
        .route("/:id", get(get_booking))
}

// ============================================================================
// Command Handlers (Write Operations)
// ============================================================================

/// Replace the booking table from an uploaded CSV file
///
/// Expects a multipart body with a `file` field. Any malformed row rejects
/// the whole upload and leaves the table untouched.
#[tracing::instrument(skip(pool, multipart))]
async fn upload_bookings(
    State(pool): State<PgPool>,
    mut multipart: Multipart,
) -> Result<Response, BookingsApiError> {
    let mut content: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| BookingsApiError::Multipart(e.to_string()))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| BookingsApiError::Multipart(e.to_string()))?;
            content = Some(bytes.to_vec());
            break;
        }
    }

    let content = content
        .ok_or_else(|| BookingsApiError::Multipart("missing 'file' field".to_string()))?;

    let command = ReplaceBookingsCommand { content };
    let response = upload::handle(pool, command).await?;

    tracing::info!(rows = response.rows_inserted, "Bookings uploaded via API");

    Ok((StatusCode::CREATED, Json(ApiResponse::success(response))).into_response())
}

// ============================================================================
// Query Handlers (Read Operations)
// ============================================================================

/// List bookings in insertion order
///
/// Query parameters: `skip` (default 0) and `limit` (default 100, max 500).
#[tracing::instrument(skip(pool, query), fields(skip = ?query.skip, limit = ?query.limit))]
async fn list_bookings(
    State(pool): State<PgPool>,
    Query(query): Query<ListBookingsQuery>,
) -> Result<Response, BookingsApiError> {
    let response = queries::list::handle(pool, query).await?;

    tracing::debug!(
        count = response.items.len(),
        total = response.total,
        "Bookings listed via API"
    );

    let meta = serde_json::json!({ "total": response.total });

    Ok(Json(ApiResponse::success_with_meta(response.items, meta)).into_response())
}

/// Get a single booking by id
#[tracing::instrument(skip(pool))]
async fn get_booking(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<Response, BookingsApiError> {
    let response = queries::get::handle(pool, GetBookingQuery { id }).await?;
    Ok(Json(ApiResponse::success(response)).into_response())
}

/// Search bookings with AND-combined equality filters
#[tracing::instrument(skip(pool, query))]
async fn search_bookings(
    State(pool): State<PgPool>,
    Query(query): Query<SearchBookingsQuery>,
) -> Result<Response, BookingsApiError> {
    let response = queries::search::handle(pool, query).await?;
    Ok(Json(ApiResponse::success(response)).into_response())
}

/// Summary statistics over the stored bookings
#[tracing::instrument(skip(pool))]
async fn booking_stats(State(pool): State<PgPool>) -> Result<Response, BookingsApiError> {
    let response = queries::stats::handle(pool, BookingStatsQuery::default()).await?;
    Ok(Json(ApiResponse::success(response)).into_response())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Unified error type for booking API endpoints
#[derive(Debug)]
enum BookingsApiError {
    Multipart(String),
    Replace(ReplaceBookingsError),
    List(ListBookingsError),
    Get(GetBookingError),
    Search(SearchBookingsError),
    Stats(BookingStatsError),
}

impl From<ReplaceBookingsError> for BookingsApiError {
    fn from(err: ReplaceBookingsError) -> Self {
        Self::Replace(err)
    }
}

impl From<ListBookingsError> for BookingsApiError {
    fn from(err: ListBookingsError) -> Self {
        Self::List(err)
    }
}

impl From<GetBookingError> for BookingsApiError {
    fn from(err: GetBookingError) -> Self {
        Self::Get(err)
    }
}

impl From<SearchBookingsError> for BookingsApiError {
    fn from(err: SearchBookingsError) -> Self {
        Self::Search(err)
    }
}

impl From<BookingStatsError> for BookingsApiError {
    fn from(err: BookingStatsError) -> Self {
        Self::Stats(err)
    }
}

impl IntoResponse for BookingsApiError {
    fn into_response(self) -> Response {
        match self {
            // Invalid upload payloads reject the whole file
            BookingsApiError::Multipart(_)
            | BookingsApiError::Replace(ReplaceBookingsError::ContentRequired)
            | BookingsApiError::Replace(ReplaceBookingsError::MissingColumn(_))
            | BookingsApiError::Replace(ReplaceBookingsError::Row { .. })
            | BookingsApiError::Replace(ReplaceBookingsError::Csv(_)) => {
                let error = ErrorResponse::new("VALIDATION_ERROR", self.to_string());
                (StatusCode::BAD_REQUEST, Json(error)).into_response()
            }

            // Invalid query parameters
            BookingsApiError::List(ListBookingsError::InvalidPagination(_))
            | BookingsApiError::Search(SearchBookingsError::InvalidPagination(_))
            | BookingsApiError::Search(SearchBookingsError::NegativeLengthOfStay) => {
                let error = ErrorResponse::new("VALIDATION_ERROR", self.to_string());
                (StatusCode::BAD_REQUEST, Json(error)).into_response()
            }

            // Missing resources
            BookingsApiError::Get(GetBookingError::NotFound(_))
            | BookingsApiError::Stats(BookingStatsError::NoBookings) => {
                let error = ErrorResponse::new("NOT_FOUND", self.to_string());
                (StatusCode::NOT_FOUND, Json(error)).into_response()
            }

            // Database failures
            BookingsApiError::Replace(ReplaceBookingsError::Database(_))
            | BookingsApiError::List(ListBookingsError::Database(_))
            | BookingsApiError::Get(GetBookingError::Database(_))
            | BookingsApiError::Search(SearchBookingsError::Database(_))
            | BookingsApiError::Stats(BookingStatsError::Database(_)) => {
                tracing::error!("Database error during booking operation: {}", self);
                let error = ErrorResponse::new("INTERNAL_ERROR", "A database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
            }
        }
    }
}

impl std::fmt::Display for BookingsApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Multipart(msg) => write!(f, "Invalid multipart upload: {}", msg),
            Self::Replace(e) => write!(f, "{}", e),
            Self::List(e) => write!(f, "{}", e),
            Self::Get(e) => write!(f, "{}", e),
            Self::Search(e) => write!(f, "{}", e),
            Self::Stats(e) => write!(f, "{}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BookingsApiError::Get(GetBookingError::NotFound(7));
        assert!(err.to_string().contains("Booking 7 not found"));
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let response = BookingsApiError::Get(GetBookingError::NotFound(7)).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_bad_upload_maps_to_400() {
        let err = BookingsApiError::Replace(ReplaceBookingsError::ContentRequired);
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_routes_structure() {
        let router = bookings_routes();
        assert!(format!("{:?}", router).contains("Router"));
    }
}
