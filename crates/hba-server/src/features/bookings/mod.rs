//! Bookings row-store feature
//!
//! CRUD-style reads over the PostgreSQL booking table plus the one mutating
//! operation in the API: a destructive whole-table replace fed by a CSV
//! upload.

pub mod commands;
pub mod queries;
pub mod routes;
pub mod types;

pub use routes::bookings_routes;
pub use types::Booking;
