//! Total guests (adults, children, babies) by arrival year

use std::collections::BTreeMap;

use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::dataset::{BookingDatasetRow, DatasetSource};
use crate::features::analytics::AnalyticsError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TotalGuestsByYearQuery {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyGuestTotals {
    pub year: i32,
    pub adults: u64,
    pub children: u64,
    pub babies: u64,
}

impl Request<Result<Vec<YearlyGuestTotals>, AnalyticsError>> for TotalGuestsByYearQuery {}

impl crate::cqrs::middleware::Query for TotalGuestsByYearQuery {}

#[tracing::instrument(skip(source))]
pub async fn handle(
    source: DatasetSource,
    _query: TotalGuestsByYearQuery,
) -> Result<Vec<YearlyGuestTotals>, AnalyticsError> {
    let rows = source.load().await?;
    compute(&rows)
}

#[derive(Default)]
struct GuestAccumulator {
    adults: u64,
    children: u64,
    babies: u64,
}

fn compute(rows: &[BookingDatasetRow]) -> Result<Vec<YearlyGuestTotals>, AnalyticsError> {
    let mut groups: BTreeMap<i32, GuestAccumulator> = BTreeMap::new();
    for row in rows {
        let acc = groups.entry(row.arrival_date_year).or_default();
        acc.adults += u64::from(row.adults);
        acc.children += u64::from(row.children);
        acc.babies += u64::from(row.babies);
    }

    if groups.is_empty() {
        return Err(AnalyticsError::NoData("No guest information found"));
    }

    Ok(groups
        .into_iter()
        .map(|(year, acc)| YearlyGuestTotals {
            year,
            adults: acc.adults,
            children: acc.children,
            babies: acc.babies,
        })
        .collect())
}
