//! Search stored bookings by equality filters
//!
//! Zero or more independent filters (guest name, booking date, length of
//! stay) combined with AND semantics. With no filters the query returns
//! all rows, bounded by the shared skip/limit pagination.

use chrono::NaiveDate;
use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::features::bookings::types::Booking;
use crate::features::shared::pagination::PageParams;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchBookingsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length_of_stay: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

#[derive(Debug, thiserror::Error)]
pub enum SearchBookingsError {
    #[error("{0}")]
    InvalidPagination(&'static str),

    #[error("Length of stay filter cannot be negative")]
    NegativeLengthOfStay,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<Vec<Booking>, SearchBookingsError>> for SearchBookingsQuery {}

impl crate::cqrs::middleware::Query for SearchBookingsQuery {}

impl SearchBookingsQuery {
    fn page(&self) -> PageParams {
        PageParams::new(self.skip, self.limit)
    }

    pub fn validate(&self) -> Result<(), SearchBookingsError> {
        self.page()
            .validate()
            .map_err(SearchBookingsError::InvalidPagination)?;
        if matches!(self.length_of_stay, Some(n) if n < 0) {
            return Err(SearchBookingsError::NegativeLengthOfStay);
        }
        Ok(())
    }
}

#[tracing::instrument(
    skip(pool, query),
    fields(
        guest_name = ?query.guest_name,
        booking_date = ?query.booking_date,
        length_of_stay = ?query.length_of_stay
    )
)]
pub async fn handle(
    pool: PgPool,
    query: SearchBookingsQuery,
) -> Result<Vec<Booking>, SearchBookingsError> {
    query.validate()?;
    let page = query.page();

    let bookings = sqlx::query_as::<_, Booking>(
        "SELECT id, booking_date, length_of_stay, guest_name, daily_rate \
         FROM bookings \
         WHERE ($1::TEXT IS NULL OR guest_name = $1) \
           AND ($2::DATE IS NULL OR booking_date = $2) \
           AND ($3::INT IS NULL OR length_of_stay = $3) \
         ORDER BY id OFFSET $4 LIMIT $5",
    )
    .bind(query.guest_name.as_deref())
    .bind(query.booking_date)
    .bind(query.length_of_stay)
    .bind(page.skip())
    .bind(page.limit())
    .fetch_all(&pool)
    .await?;

    tracing::debug!(count = bookings.len(), "Booking search completed");

    Ok(bookings)
}
