//! Summary statistics over the stored bookings
//!
//! Computed by SQL aggregates over the whole table, unlike the analytics
//! catalog which works on the CSV dataset.

use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingStatsQuery {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingStatsResponse {
    pub total_bookings: i64,
    pub avg_length_of_stay: f64,
    /// Null when every stored row has a null daily rate
    pub avg_daily_rate: Option<f64>,
}

#[derive(Debug, thiserror::Error)]
pub enum BookingStatsError {
    #[error("No bookings stored")]
    NoBookings,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<BookingStatsResponse, BookingStatsError>> for BookingStatsQuery {}

impl crate::cqrs::middleware::Query for BookingStatsQuery {}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    _query: BookingStatsQuery,
) -> Result<BookingStatsResponse, BookingStatsError> {
    let (total_bookings, avg_length_of_stay, avg_daily_rate) =
        sqlx::query_as::<_, (i64, Option<f64>, Option<f64>)>(
            "SELECT COUNT(*), AVG(length_of_stay::DOUBLE PRECISION), AVG(daily_rate) \
             FROM bookings",
        )
        .fetch_one(&pool)
        .await?;

    if total_bookings == 0 {
        return Err(BookingStatsError::NoBookings);
    }

    Ok(BookingStatsResponse {
        total_bookings,
        avg_length_of_stay: avg_length_of_stay.unwrap_or(0.0),
        avg_daily_rate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_bookings_display() {
        assert_eq!(BookingStatsError::NoBookings.to_string(), "No bookings stored");
    }
}
