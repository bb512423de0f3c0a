//! Average length of stay by arrival year and hotel

use std::collections::BTreeMap;

use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::dataset::{BookingDatasetRow, DatasetSource};
use crate::features::analytics::AnalyticsError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AvgLengthOfStayQuery {}

/// Mean weekend and week nights for one (year, hotel) group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvgLengthOfStay {
    pub year: i32,
    pub hotel: String,
    pub avg_weekend_nights: f64,
    pub avg_week_nights: f64,
}

impl Request<Result<Vec<AvgLengthOfStay>, AnalyticsError>> for AvgLengthOfStayQuery {}

impl crate::cqrs::middleware::Query for AvgLengthOfStayQuery {}

#[tracing::instrument(skip(source))]
pub async fn handle(
    source: DatasetSource,
    _query: AvgLengthOfStayQuery,
) -> Result<Vec<AvgLengthOfStay>, AnalyticsError> {
    let rows = source.load().await?;
    compute(&rows)
}

#[derive(Default)]
struct StayAccumulator {
    weekend_nights: u64,
    week_nights: u64,
    rows: u64,
}

fn compute(rows: &[BookingDatasetRow]) -> Result<Vec<AvgLengthOfStay>, AnalyticsError> {
    let mut groups: BTreeMap<(i32, String), StayAccumulator> = BTreeMap::new();
    for row in rows {
        let acc = groups
            .entry((row.arrival_date_year, row.hotel.clone()))
            .or_default();
        acc.weekend_nights += u64::from(row.stays_in_weekend_nights);
        acc.week_nights += u64::from(row.stays_in_week_nights);
        acc.rows += 1;
    }

    if groups.is_empty() {
        return Err(AnalyticsError::NoData(
            "No length of stay information found",
        ));
    }

    Ok(groups
        .into_iter()
        .map(|((year, hotel), acc)| AvgLengthOfStay {
            year,
            hotel,
            avg_weekend_nights: acc.weekend_nights as f64 / acc.rows as f64,
            avg_week_nights: acc.week_nights as f64 / acc.rows as f64,
        })
        .collect())
}
