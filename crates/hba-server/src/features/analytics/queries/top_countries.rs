//! Top five countries by booking count

use std::collections::BTreeMap;

use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::dataset::{BookingDatasetRow, DatasetSource};
use crate::features::analytics::AnalyticsError;

/// Number of countries returned
pub const TOP_COUNTRIES_LIMIT: usize = 5;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopCountriesQuery {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryBookingCount {
    pub country: String,
    pub booking_count: u64,
}

impl Request<Result<Vec<CountryBookingCount>, AnalyticsError>> for TopCountriesQuery {}

impl crate::cqrs::middleware::Query for TopCountriesQuery {}

#[tracing::instrument(skip(source))]
pub async fn handle(
    source: DatasetSource,
    _query: TopCountriesQuery,
) -> Result<Vec<CountryBookingCount>, AnalyticsError> {
    let rows = source.load().await?;
    compute(&rows)
}

fn compute(rows: &[BookingDatasetRow]) -> Result<Vec<CountryBookingCount>, AnalyticsError> {
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    for row in rows {
        *counts.entry(row.country.clone()).or_default() += 1;
    }

    if counts.is_empty() {
        return Err(AnalyticsError::NoData("No country information found"));
    }

    // The map iterates in ascending country order; the stable sort then
    // orders by descending count while keeping ties alphabetical.
    let mut ranked: Vec<CountryBookingCount> = counts
        .into_iter()
        .map(|(country, booking_count)| CountryBookingCount {
            country,
            booking_count,
        })
        .collect();
    ranked.sort_by(|a, b| b.booking_count.cmp(&a.booking_count));
    ranked.truncate(TOP_COUNTRIES_LIMIT);

    Ok(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::testing;

    fn rows_with_countries(countries: &[&str]) -> Vec<BookingDatasetRow> {
        countries
            .iter()
            .map(|c| {
                let mut row = testing::row();
                row.country = c.to_string();
                row
            })
            .collect()
    }

    #[test]
    fn test_truncated_to_five_with_non_increasing_counts() {
        let rows = rows_with_countries(&[
            "PRT", "PRT", "PRT", "GBR", "GBR", "FRA", "FRA", "ESP", "DEU", "ITA", "NLD",
        ]);

        let result = compute(&rows).unwrap();
        assert_eq!(result.len(), TOP_COUNTRIES_LIMIT);
        assert!(result
            .windows(2)
            .all(|w| w[0].booking_count >= w[1].booking_count));
        assert_eq!(result[0].country, "PRT");
        assert_eq!(result[0].booking_count, 3);
    }

    #[test]
    fn test_ties_are_alphabetical() {
        let rows = rows_with_countries(&["GBR", "FRA"]);
        let result = compute(&rows).unwrap();
        assert_eq!(result[0].country, "FRA");
        assert_eq!(result[1].country, "GBR");
    }

    #[test]
    fn test_fewer_than_five_countries_returns_all() {
        let rows = rows_with_countries(&["PRT", "GBR"]);
        assert_eq!(compute(&rows).unwrap().len(), 2);
    }

    #[test]
    fn test_empty_dataset_is_not_found() {
        assert!(matches!(compute(&[]), Err(AnalyticsError::NoData(_))));
    }
}
