//! Bookings write operations

pub mod upload;

pub use upload::{ReplaceBookingsCommand, ReplaceBookingsError};
