//! Most common arrival weekday, city hotels only
//!
//! The arrival weekday is derived by composing the year, month-name, and
//! day-of-month columns into a calendar date. A city-hotel row whose
//! components do not form a real date fails the whole operation; rows are
//! never silently dropped.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::dataset::{month_index, weekday_name, BookingDatasetRow, DatasetSource, CITY_HOTEL};
use crate::features::analytics::AnalyticsError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommonArrivalDayCityQuery {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommonArrivalDay {
    pub weekday: String,
}

impl Request<Result<CommonArrivalDay, AnalyticsError>> for CommonArrivalDayCityQuery {}

impl crate::cqrs::middleware::Query for CommonArrivalDayCityQuery {}

#[tracing::instrument(skip(source))]
pub async fn handle(
    source: DatasetSource,
    _query: CommonArrivalDayCityQuery,
) -> Result<CommonArrivalDay, AnalyticsError> {
    let rows = source.load().await?;
    compute(&rows)
}

fn compute(rows: &[BookingDatasetRow]) -> Result<CommonArrivalDay, AnalyticsError> {
    // Keyed by days-from-Monday so ties resolve to the earliest weekday.
    let mut counts: BTreeMap<u32, u64> = BTreeMap::new();

    for row in rows.iter().filter(|row| row.hotel == CITY_HOTEL) {
        let date = arrival_date(row)?;
        *counts.entry(date.weekday().num_days_from_monday()).or_default() += 1;
    }

    let mut best: Option<(u32, u64)> = None;
    for (weekday, count) in counts {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((weekday, count));
        }
    }

    match best {
        Some((weekday, _)) => {
            let weekday = chrono::Weekday::try_from(weekday as u8)
                .map(weekday_name)
                .unwrap_or("Monday");
            Ok(CommonArrivalDay {
                weekday: weekday.to_string(),
            })
        }
        None => Err(AnalyticsError::NoData("No city hotel bookings found")),
    }
}

fn arrival_date(row: &BookingDatasetRow) -> Result<NaiveDate, AnalyticsError> {
    let month = month_index(&row.arrival_date_month)
        .ok_or_else(|| AnalyticsError::UnknownMonth(row.arrival_date_month.clone()))?;

    NaiveDate::from_ymd_opt(
        row.arrival_date_year,
        month,
        row.arrival_date_day_of_month,
    )
    .ok_or_else(|| AnalyticsError::InvalidArrivalDate {
        year: row.arrival_date_year,
        month: row.arrival_date_month.clone(),
        day: row.arrival_date_day_of_month,
    })
}
