//! Booking count by hotel and meal package

use std::collections::BTreeMap;

use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::dataset::{BookingDatasetRow, DatasetSource};
use crate::features::analytics::AnalyticsError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CountByHotelMealQuery {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelMealCount {
    pub hotel: String,
    pub meal: String,
    pub count: u64,
}

impl Request<Result<Vec<HotelMealCount>, AnalyticsError>> for CountByHotelMealQuery {}

impl crate::cqrs::middleware::Query for CountByHotelMealQuery {}

#[tracing::instrument(skip(source))]
pub async fn handle(
    source: DatasetSource,
    _query: CountByHotelMealQuery,
) -> Result<Vec<HotelMealCount>, AnalyticsError> {
    let rows = source.load().await?;
    compute(&rows)
}

fn compute(rows: &[BookingDatasetRow]) -> Result<Vec<HotelMealCount>, AnalyticsError> {
    let mut counts: BTreeMap<(String, String), u64> = BTreeMap::new();
    for row in rows {
        *counts
            .entry((row.hotel.clone(), row.meal.clone()))
            .or_default() += 1;
    }

    if counts.is_empty() {
        return Err(AnalyticsError::NoData(
            "No booking count information found",
        ));
    }

    Ok(counts
        .into_iter()
        .map(|((hotel, meal), count)| HotelMealCount { hotel, meal, count })
        .collect())
}
