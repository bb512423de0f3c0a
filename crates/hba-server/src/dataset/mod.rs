//! Booking dataset access
//!
//! The dataset is a CSV file of historical booking rows, independent from
//! the row store. It has no identity column and no caching: every analytics
//! call re-reads the file through [`DatasetSource::load`], so concurrent
//! calls never share mutable state.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub mod loader;

/// Hotel category label for resort hotels
pub const RESORT_HOTEL: &str = "Resort Hotel";

/// Hotel category label for city hotels
pub const CITY_HOTEL: &str = "City Hotel";

/// One row of the booking dataset
///
/// Arrival dates are split across three columns in the source file, with the
/// month stored as an English month name.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingDatasetRow {
    pub hotel: String,
    pub is_canceled: bool,
    pub arrival_date_year: i32,
    pub arrival_date_month: String,
    pub arrival_date_day_of_month: u32,
    pub stays_in_weekend_nights: u32,
    pub stays_in_week_nights: u32,
    pub adults: u32,
    pub children: u32,
    pub babies: u32,
    pub meal: String,
    pub country: String,
    pub is_repeated_guest: bool,
    pub adr: f64,
}

/// Errors from loading the booking dataset
///
/// A malformed row rejects the whole file; there is no partial recovery.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to read booking dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("Booking dataset is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("Booking dataset line {line}: {message}")]
    Row { line: usize, message: String },

    #[error("Failed to parse booking dataset: {0}")]
    Csv(#[from] csv::Error),
}

/// Handle on the booking dataset file
///
/// Cheap to clone; holds only the configured path.
#[derive(Debug, Clone)]
pub struct DatasetSource {
    path: PathBuf,
}

impl DatasetSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the dataset into memory
    ///
    /// An absent file yields an empty table (callers then surface their
    /// not-found outcome); any other I/O failure or malformed row is fatal.
    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn load(&self) -> Result<Vec<BookingDatasetRow>, DatasetError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!("Booking dataset file not found, treating as empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(DatasetError::Io(e)),
        };

        let rows = loader::parse_dataset(&bytes)?;
        tracing::debug!(rows = rows.len(), "Booking dataset loaded");
        Ok(rows)
    }
}

/// English month names in calendar order, as they appear in the dataset
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Calendar index (1-12) of an English month name, case-insensitive
pub fn month_index(name: &str) -> Option<u32> {
    MONTH_NAMES
        .iter()
        .position(|m| m.eq_ignore_ascii_case(name.trim()))
        .map(|i| i as u32 + 1)
}

/// English day name for a weekday
pub fn weekday_name(weekday: chrono::Weekday) -> &'static str {
    match weekday {
        chrono::Weekday::Mon => "Monday",
        chrono::Weekday::Tue => "Tuesday",
        chrono::Weekday::Wed => "Wednesday",
        chrono::Weekday::Thu => "Thursday",
        chrono::Weekday::Fri => "Friday",
        chrono::Weekday::Sat => "Saturday",
        chrono::Weekday::Sun => "Sunday",
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::BookingDatasetRow;

    /// A city-hotel baseline row for aggregation tests
    pub(crate) fn row() -> BookingDatasetRow {
        BookingDatasetRow {
            hotel: super::CITY_HOTEL.to_string(),
            is_canceled: false,
            arrival_date_year: 2017,
            arrival_date_month: "July".to_string(),
            arrival_date_day_of_month: 1,
            stays_in_weekend_nights: 1,
            stays_in_week_nights: 2,
            adults: 2,
            children: 0,
            babies: 0,
            meal: "BB".to_string(),
            country: "PRT".to_string(),
            is_repeated_guest: false,
            adr: 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_index() {
        assert_eq!(month_index("January"), Some(1));
        assert_eq!(month_index("july"), Some(7));
        assert_eq!(month_index(" December "), Some(12));
        assert_eq!(month_index("Juillet"), None);
    }

    #[test]
    fn test_weekday_name() {
        assert_eq!(weekday_name(chrono::Weekday::Mon), "Monday");
        assert_eq!(weekday_name(chrono::Weekday::Sun), "Sunday");
    }
}
