//! Average daily rate by arrival month, resort hotels only
//!
//! Considers non-cancelled resort-hotel rows.

use std::collections::BTreeMap;

use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::dataset::{month_index, BookingDatasetRow, DatasetSource, MONTH_NAMES, RESORT_HOTEL};
use crate::features::analytics::AnalyticsError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AvgDailyRateResortQuery {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyDailyRate {
    pub month: String,
    pub avg_daily_rate: f64,
}

impl Request<Result<Vec<MonthlyDailyRate>, AnalyticsError>> for AvgDailyRateResortQuery {}

impl crate::cqrs::middleware::Query for AvgDailyRateResortQuery {}

#[tracing::instrument(skip(source))]
pub async fn handle(
    source: DatasetSource,
    _query: AvgDailyRateResortQuery,
) -> Result<Vec<MonthlyDailyRate>, AnalyticsError> {
    let rows = source.load().await?;
    compute(&rows)
}

fn compute(rows: &[BookingDatasetRow]) -> Result<Vec<MonthlyDailyRate>, AnalyticsError> {
    let mut groups: BTreeMap<u32, (f64, u64)> = BTreeMap::new();
    for row in rows
        .iter()
        .filter(|row| !row.is_canceled && row.hotel == RESORT_HOTEL)
    {
        let month = month_index(&row.arrival_date_month)
            .ok_or_else(|| AnalyticsError::UnknownMonth(row.arrival_date_month.clone()))?;
        let (sum, count) = groups.entry(month).or_default();
        *sum += row.adr;
        *count += 1;
    }

    if groups.is_empty() {
        return Err(AnalyticsError::NoData("No resort hotel bookings found"));
    }

    Ok(groups
        .into_iter()
        .map(|(month, (sum, count))| MonthlyDailyRate {
            month: MONTH_NAMES[month as usize - 1].to_string(),
            avg_daily_rate: sum / count as f64,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::testing;

    fn resort_row(month: &str, adr: f64) -> BookingDatasetRow {
        let mut row = testing::row();
        row.hotel = RESORT_HOTEL.to_string();
        row.arrival_date_month = month.to_string();
        row.adr = adr;
        row
    }

    #[test]
    fn test_mean_rate_per_month() {
        let rows = vec![
            resort_row("July", 100.0),
            resort_row("July", 200.0),
            resort_row("June", 90.0),
        ];

        let result = compute(&rows).unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].month, "June");
        assert_eq!(result[0].avg_daily_rate, 90.0);
        assert_eq!(result[1].month, "July");
        assert_eq!(result[1].avg_daily_rate, 150.0);
    }

    #[test]
    fn test_city_and_cancelled_rows_excluded() {
        let city = testing::row();
        let mut cancelled = resort_row("July", 500.0);
        cancelled.is_canceled = true;
        let rows = vec![city, cancelled, resort_row("July", 80.0)];

        let result = compute(&rows).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].avg_daily_rate, 80.0);
    }

    #[test]
    fn test_no_resort_rows_is_not_found() {
        let rows = vec![testing::row()];
        assert!(matches!(compute(&rows), Err(AnalyticsError::NoData(_))));
    }
}
