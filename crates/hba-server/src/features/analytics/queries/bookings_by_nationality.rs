//! Booking selection by guest nationality

use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::dataset::{BookingDatasetRow, DatasetSource};
use crate::features::analytics::AnalyticsError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingsByNationalityQuery {
    /// Country code to filter on
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
}

/// One matching booking; `id` is the row's position within the filtered
/// selection, which is not stable across dataset reloads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NationalityBooking {
    pub country: String,
    pub id: usize,
}

impl Request<Result<Vec<NationalityBooking>, AnalyticsError>> for BookingsByNationalityQuery {}

impl crate::cqrs::middleware::Query for BookingsByNationalityQuery {}

impl BookingsByNationalityQuery {
    pub fn validate(&self) -> Result<&str, AnalyticsError> {
        match self.nationality.as_deref() {
            Some(nationality) if !nationality.trim().is_empty() => Ok(nationality),
            _ => Err(AnalyticsError::NationalityRequired),
        }
    }
}

#[tracing::instrument(skip(source), fields(nationality = ?query.nationality))]
pub async fn handle(
    source: DatasetSource,
    query: BookingsByNationalityQuery,
) -> Result<Vec<NationalityBooking>, AnalyticsError> {
    let nationality = query.validate()?.to_string();
    let rows = source.load().await?;
    compute(&rows, &nationality)
}

fn compute(
    rows: &[BookingDatasetRow],
    nationality: &str,
) -> Result<Vec<NationalityBooking>, AnalyticsError> {
    let matches: Vec<NationalityBooking> = rows
        .iter()
        .filter(|row| row.country == nationality)
        .enumerate()
        .map(|(id, row)| NationalityBooking {
            country: row.country.clone(),
            id,
        })
        .collect();

    if matches.is_empty() {
        return Err(AnalyticsError::NoData(
            "No bookings found for the requested nationality",
        ));
    }

    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::testing;

    fn rows() -> Vec<BookingDatasetRow> {
        ["PRT", "GBR", "PRT", "FRA"]
            .iter()
            .map(|c| {
                let mut row = testing::row();
                row.country = c.to_string();
                row
            })
            .collect()
    }

    #[test]
    fn test_ids_are_positions_in_filtered_set() {
        let result = compute(&rows(), "PRT").unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].id, 0);
        assert_eq!(result[1].id, 1);
        assert!(result.iter().all(|b| b.country == "PRT"));
    }

    #[test]
    fn test_no_match_is_not_found() {
        assert!(matches!(
            compute(&rows(), "ESP"),
            Err(AnalyticsError::NoData(_))
        ));
    }

    #[test]
    fn test_missing_nationality_is_rejected() {
        let query = BookingsByNationalityQuery { nationality: None };
        assert!(matches!(
            query.validate(),
            Err(AnalyticsError::NationalityRequired)
        ));

        let blank = BookingsByNationalityQuery {
            nationality: Some("  ".to_string()),
        };
        assert!(matches!(
            blank.validate(),
            Err(AnalyticsError::NationalityRequired)
        ));
    }
}
