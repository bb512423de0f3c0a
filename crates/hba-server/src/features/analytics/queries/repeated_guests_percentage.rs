//! Percentage of bookings made by repeat guests
//!
//! The zero-row case is the one guarded division by zero in the catalog:
//! with no rows the percentage is undefined and the operation fails
//! fatally instead of producing NaN.

use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::dataset::{BookingDatasetRow, DatasetSource};
use crate::features::analytics::AnalyticsError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepeatedGuestsPercentageQuery {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepeatedGuestsPercentage {
    pub percentage: f64,
}

impl Request<Result<RepeatedGuestsPercentage, AnalyticsError>> for RepeatedGuestsPercentageQuery {}

impl crate::cqrs::middleware::Query for RepeatedGuestsPercentageQuery {}

#[tracing::instrument(skip(source))]
pub async fn handle(
    source: DatasetSource,
    _query: RepeatedGuestsPercentageQuery,
) -> Result<RepeatedGuestsPercentage, AnalyticsError> {
    let rows = source.load().await?;
    compute(&rows)
}

fn compute(rows: &[BookingDatasetRow]) -> Result<RepeatedGuestsPercentage, AnalyticsError> {
    if rows.is_empty() {
        return Err(AnalyticsError::EmptyDataset);
    }

    let repeated = rows.iter().filter(|row| row.is_repeated_guest).count();
    let percentage = repeated as f64 / rows.len() as f64 * 100.0;

    Ok(RepeatedGuestsPercentage { percentage })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::testing;

    fn rows_with_flags(flags: &[bool]) -> Vec<BookingDatasetRow> {
        flags
            .iter()
            .map(|&repeated| {
                let mut row = testing::row();
                row.is_repeated_guest = repeated;
                row
            })
            .collect()
    }

    #[test]
    fn test_percentage_of_repeat_guests() {
        let rows = rows_with_flags(&[true, false, false, true]);
        assert_eq!(compute(&rows).unwrap().percentage, 50.0);
    }

    #[test]
    fn test_bounds() {
        let none = rows_with_flags(&[false, false]);
        assert_eq!(compute(&none).unwrap().percentage, 0.0);

        let all = rows_with_flags(&[true, true, true]);
        assert_eq!(compute(&all).unwrap().percentage, 100.0);
    }

    #[test]
    fn test_zero_rows_is_fatal_not_nan() {
        assert!(matches!(compute(&[]), Err(AnalyticsError::EmptyDataset)));
    }
}
