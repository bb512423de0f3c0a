//! Shared types for the bookings row store

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A stored booking record
///
/// The `id` is store-assigned on upload; rows are never individually
/// updated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Booking {
    pub id: i64,
    pub booking_date: NaiveDate,
    pub length_of_stay: i32,
    pub guest_name: String,
    pub daily_rate: Option<f64>,
}
