//! Booking analytics feature
//!
//! The fixed catalog of aggregation queries over the booking dataset. Each
//! query is a vertical slice in `queries/`; HTTP wiring lives in
//! `routes.rs`. Every operation re-reads the dataset file through
//! [`crate::dataset::DatasetSource`], so calls are independent and
//! side-effect-free.
//!
//! Uniform rules across the catalog:
//!
//! - Grouping is a single pass building a `BTreeMap` from key to
//!   accumulator, which yields ascending-key output order for free.
//! - Mode operations resolve frequency ties to the smallest key, so the
//!   result is stable across calls.
//! - Operations marked "non-cancelled only" drop cancelled rows before any
//!   grouping; excluded rows contribute to no count or sum.
//! - An empty filtered or grouped result is a distinct [`AnalyticsError::NoData`]
//!   outcome, never a silently empty list.

use thiserror::Error;

use crate::dataset::DatasetError;

pub mod queries;
pub mod routes;

pub use routes::analytics_routes;

/// Errors shared by every catalog operation
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// The filtered/grouped result set is empty
    #[error("{0}")]
    NoData(&'static str),

    /// The nationality filter parameter was not supplied
    #[error("Nationality query parameter is required")]
    NationalityRequired,

    /// The dataset has no rows at all; the repeated-guest percentage is
    /// undefined (guarded division by zero)
    #[error("Booking dataset contains no rows")]
    EmptyDataset,

    /// An arrival month name that is not an English calendar month
    #[error("Unknown arrival month '{0}' in booking dataset")]
    UnknownMonth(String),

    /// Arrival date components that do not compose into a calendar date
    #[error("Invalid arrival date {year}-{month}-{day} in booking dataset")]
    InvalidArrivalDate {
        year: i32,
        month: String,
        day: u32,
    },

    /// The dataset file could not be loaded
    #[error(transparent)]
    Dataset(#[from] DatasetError),
}
