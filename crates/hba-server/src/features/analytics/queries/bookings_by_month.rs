//! Booking count by arrival month

use std::collections::BTreeMap;

use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::dataset::{month_index, BookingDatasetRow, DatasetSource, MONTH_NAMES};
use crate::features::analytics::AnalyticsError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingsByMonthQuery {}

/// Booking count for one arrival month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBookingCount {
    pub month: String,
    pub count: u64,
}

impl Request<Result<Vec<MonthlyBookingCount>, AnalyticsError>> for BookingsByMonthQuery {}

impl crate::cqrs::middleware::Query for BookingsByMonthQuery {}

#[tracing::instrument(skip(source))]
pub async fn handle(
    source: DatasetSource,
    _query: BookingsByMonthQuery,
) -> Result<Vec<MonthlyBookingCount>, AnalyticsError> {
    let rows = source.load().await?;
    compute(&rows)
}

fn compute(rows: &[BookingDatasetRow]) -> Result<Vec<MonthlyBookingCount>, AnalyticsError> {
    let mut counts: BTreeMap<u32, u64> = BTreeMap::new();
    for row in rows {
        let month = month_index(&row.arrival_date_month)
            .ok_or_else(|| AnalyticsError::UnknownMonth(row.arrival_date_month.clone()))?;
        *counts.entry(month).or_default() += 1;
    }

    if counts.is_empty() {
        return Err(AnalyticsError::NoData("No booking information found"));
    }

    Ok(counts
        .into_iter()
        .map(|(month, count)| MonthlyBookingCount {
            month: MONTH_NAMES[month as usize - 1].to_string(),
            count,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::testing;

    #[test]
    fn test_counts_grouped_in_calendar_order() {
        let mut march = testing::row();
        march.arrival_date_month = "March".to_string();
        let mut january = testing::row();
        january.arrival_date_month = "January".to_string();
        let rows = vec![march.clone(), january, march];

        let result = compute(&rows).unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].month, "January");
        assert_eq!(result[0].count, 1);
        assert_eq!(result[1].month, "March");
        assert_eq!(result[1].count, 2);
    }

    #[test]
    fn test_group_counts_sum_to_total() {
        let months = ["July", "July", "August", "December", "August"];
        let rows: Vec<_> = months
            .iter()
            .map(|m| {
                let mut row = testing::row();
                row.arrival_date_month = m.to_string();
                row
            })
            .collect();

        let result = compute(&rows).unwrap();
        let total: u64 = result.iter().map(|r| r.count).sum();
        assert_eq!(total, rows.len() as u64);
    }

    #[test]
    fn test_empty_dataset_is_not_found() {
        assert!(matches!(compute(&[]), Err(AnalyticsError::NoData(_))));
    }

    #[test]
    fn test_unknown_month_is_fatal() {
        let mut row = testing::row();
        row.arrival_date_month = "Juche".to_string();
        assert!(matches!(
            compute(&[row]),
            Err(AnalyticsError::UnknownMonth(_))
        ));
    }
}
