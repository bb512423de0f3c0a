//! Total revenue by arrival month and hotel, non-cancelled rows only
//!
//! Revenue for a row is adr multiplied by its total nights (weekend plus
//! week). Cancelled rows are dropped before grouping and contribute to no
//! sum.

use std::collections::BTreeMap;

use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::dataset::{month_index, BookingDatasetRow, DatasetSource, MONTH_NAMES};
use crate::features::analytics::AnalyticsError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TotalRevenueQuery {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRevenue {
    pub month: String,
    pub hotel: String,
    pub total_revenue: f64,
}

impl Request<Result<Vec<MonthlyRevenue>, AnalyticsError>> for TotalRevenueQuery {}

impl crate::cqrs::middleware::Query for TotalRevenueQuery {}

#[tracing::instrument(skip(source))]
pub async fn handle(
    source: DatasetSource,
    _query: TotalRevenueQuery,
) -> Result<Vec<MonthlyRevenue>, AnalyticsError> {
    let rows = source.load().await?;
    compute(&rows)
}

fn compute(rows: &[BookingDatasetRow]) -> Result<Vec<MonthlyRevenue>, AnalyticsError> {
    let mut revenue: BTreeMap<(u32, String), f64> = BTreeMap::new();
    for row in rows.iter().filter(|row| !row.is_canceled) {
        let month = month_index(&row.arrival_date_month)
            .ok_or_else(|| AnalyticsError::UnknownMonth(row.arrival_date_month.clone()))?;
        let nights = u64::from(row.stays_in_weekend_nights + row.stays_in_week_nights);
        *revenue.entry((month, row.hotel.clone())).or_default() += row.adr * nights as f64;
    }

    if revenue.is_empty() {
        return Err(AnalyticsError::NoData("No revenue information found"));
    }

    Ok(revenue
        .into_iter()
        .map(|((month, hotel), total_revenue)| MonthlyRevenue {
            month: MONTH_NAMES[month as usize - 1].to_string(),
            hotel,
            total_revenue,
        })
        .collect())
}
