//! List stored bookings with skip/limit pagination

use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::features::bookings::types::Booking;
use crate::features::shared::pagination::PageParams;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListBookingsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListBookingsResponse {
    pub items: Vec<Booking>,
    pub total: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum ListBookingsError {
    #[error("{0}")]
    InvalidPagination(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<ListBookingsResponse, ListBookingsError>> for ListBookingsQuery {}

impl crate::cqrs::middleware::Query for ListBookingsQuery {}

impl ListBookingsQuery {
    fn page(&self) -> PageParams {
        PageParams::new(self.skip, self.limit)
    }

    pub fn validate(&self) -> Result<(), ListBookingsError> {
        self.page()
            .validate()
            .map_err(ListBookingsError::InvalidPagination)
    }
}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    query: ListBookingsQuery,
) -> Result<ListBookingsResponse, ListBookingsError> {
    query.validate()?;
    let page = query.page();

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings")
        .fetch_one(&pool)
        .await?;

    // Insertion order: ids are assigned sequentially on upload.
    let items = sqlx::query_as::<_, Booking>(
        "SELECT id, booking_date, length_of_stay, guest_name, daily_rate \
         FROM bookings ORDER BY id OFFSET $1 LIMIT $2",
    )
    .bind(page.skip())
    .bind(page.limit())
    .fetch_all(&pool)
    .await?;

    Ok(ListBookingsResponse { items, total })
}
