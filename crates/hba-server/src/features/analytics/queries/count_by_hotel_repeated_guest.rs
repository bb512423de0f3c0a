//! Booking count by hotel and repeat-guest flag

use std::collections::BTreeMap;

use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::dataset::{BookingDatasetRow, DatasetSource};
use crate::features::analytics::AnalyticsError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CountByHotelRepeatedGuestQuery {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelRepeatedGuestCount {
    pub hotel: String,
    pub is_repeated_guest: bool,
    pub count: u64,
}

impl Request<Result<Vec<HotelRepeatedGuestCount>, AnalyticsError>>
    for CountByHotelRepeatedGuestQuery
{
}

impl crate::cqrs::middleware::Query for CountByHotelRepeatedGuestQuery {}

#[tracing::instrument(skip(source))]
pub async fn handle(
    source: DatasetSource,
    _query: CountByHotelRepeatedGuestQuery,
) -> Result<Vec<HotelRepeatedGuestCount>, AnalyticsError> {
    let rows = source.load().await?;
    compute(&rows)
}

fn compute(rows: &[BookingDatasetRow]) -> Result<Vec<HotelRepeatedGuestCount>, AnalyticsError> {
    let mut counts: BTreeMap<(String, bool), u64> = BTreeMap::new();
    for row in rows {
        *counts
            .entry((row.hotel.clone(), row.is_repeated_guest))
            .or_default() += 1;
    }

    if counts.is_empty() {
        return Err(AnalyticsError::NoData(
            "No booking count information found",
        ));
    }

    Ok(counts
        .into_iter()
        .map(|((hotel, is_repeated_guest), count)| HotelRepeatedGuestCount {
            hotel,
            is_repeated_guest,
            count,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{testing, CITY_HOTEL, RESORT_HOTEL};

    fn row(hotel: &str, repeated: bool) -> BookingDatasetRow {
        let mut row = testing::row();
        row.hotel = hotel.to_string();
        row.is_repeated_guest = repeated;
        row
    }

    #[test]
    fn test_counts_split_by_flag_within_hotel() {
        let rows = vec![
            row(CITY_HOTEL, false),
            row(CITY_HOTEL, true),
            row(CITY_HOTEL, false),
            row(RESORT_HOTEL, true),
        ];

        let result = compute(&rows).unwrap();
        assert_eq!(result.len(), 3);
        // Within a hotel, new guests (false) sort before repeat guests.
        assert_eq!(result[0].hotel, CITY_HOTEL);
        assert!(!result[0].is_repeated_guest);
        assert_eq!(result[0].count, 2);
        assert_eq!(result[1].hotel, CITY_HOTEL);
        assert!(result[1].is_repeated_guest);
        assert_eq!(result[1].count, 1);
        assert_eq!(result[2].hotel, RESORT_HOTEL);
    }

    #[test]
    fn test_group_counts_sum_to_total() {
        let rows = vec![
            row(CITY_HOTEL, false),
            row(RESORT_HOTEL, false),
            row(RESORT_HOTEL, true),
        ];
        let result = compute(&rows).unwrap();
        let total: u64 = result.iter().map(|r| r.count).sum();
        assert_eq!(total, rows.len() as u64);
    }

    #[test]
    fn test_empty_dataset_is_not_found() {
        assert!(matches!(compute(&[]), Err(AnalyticsError::NoData(_))));
    }
}
