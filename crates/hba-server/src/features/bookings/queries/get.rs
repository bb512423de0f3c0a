//! Fetch one booking by its store-assigned id

use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::features::bookings::types::Booking;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetBookingQuery {
    pub id: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum GetBookingError {
    #[error("Booking {0} not found")]
    NotFound(i64),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<Booking, GetBookingError>> for GetBookingQuery {}

impl crate::cqrs::middleware::Query for GetBookingQuery {}

#[tracing::instrument(skip(pool))]
pub async fn handle(pool: PgPool, query: GetBookingQuery) -> Result<Booking, GetBookingError> {
    let booking = sqlx::query_as::<_, Booking>(
        "SELECT id, booking_date, length_of_stay, guest_name, daily_rate \
         FROM bookings WHERE id = $1",
    )
    .bind(query.id)
    .fetch_optional(&pool)
    .await?;

    booking.ok_or(GetBookingError::NotFound(query.id))
}
