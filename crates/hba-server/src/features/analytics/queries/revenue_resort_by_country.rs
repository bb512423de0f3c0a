//! Total adr revenue by country, resort hotels only
//!
//! Considers non-cancelled resort-hotel rows; the measure is the plain sum
//! of adr per country.

use std::collections::BTreeMap;

use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::dataset::{BookingDatasetRow, DatasetSource, RESORT_HOTEL};
use crate::features::analytics::AnalyticsError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RevenueResortByCountryQuery {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryRevenue {
    pub country: String,
    pub total_revenue: f64,
}

impl Request<Result<Vec<CountryRevenue>, AnalyticsError>> for RevenueResortByCountryQuery {}

impl crate::cqrs::middleware::Query for RevenueResortByCountryQuery {}

#[tracing::instrument(skip(source))]
pub async fn handle(
    source: DatasetSource,
    _query: RevenueResortByCountryQuery,
) -> Result<Vec<CountryRevenue>, AnalyticsError> {
    let rows = source.load().await?;
    compute(&rows)
}

fn compute(rows: &[BookingDatasetRow]) -> Result<Vec<CountryRevenue>, AnalyticsError> {
    let mut revenue: BTreeMap<String, f64> = BTreeMap::new();
    for row in rows
        .iter()
        .filter(|row| !row.is_canceled && row.hotel == RESORT_HOTEL)
    {
        *revenue.entry(row.country.clone()).or_default() += row.adr;
    }

    if revenue.is_empty() {
        return Err(AnalyticsError::NoData("No resort hotel bookings found"));
    }

    Ok(revenue
        .into_iter()
        .map(|(country, total_revenue)| CountryRevenue {
            country,
            total_revenue,
        })
        .collect())
}
