//! Replace the booking table from an uploaded CSV file
//!
//! The one mutating operation in the API: parse the whole file, then delete
//! every existing row and insert the new ones inside a single transaction.
//! Any malformed row rejects the whole upload. The replace is destructive
//! and is not guarded against concurrent readers observing it mid-flight;
//! that is an accepted limitation of the design.

use std::collections::HashMap;

use chrono::NaiveDate;
use csv::StringRecord;
use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplaceBookingsCommand {
    /// Raw bytes of the uploaded CSV file
    #[serde(skip)]
    pub content: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplaceBookingsResponse {
    pub rows_inserted: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum ReplaceBookingsError {
    #[error("Uploaded file is empty")]
    ContentRequired,

    #[error("Uploaded CSV is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("Uploaded CSV line {line}: {message}")]
    Row { line: usize, message: String },

    #[error("Uploaded CSV could not be parsed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<ReplaceBookingsResponse, ReplaceBookingsError>> for ReplaceBookingsCommand {}

impl crate::cqrs::middleware::Command for ReplaceBookingsCommand {}

impl ReplaceBookingsCommand {
    pub fn validate(&self) -> Result<(), ReplaceBookingsError> {
        if self.content.is_empty() {
            return Err(ReplaceBookingsError::ContentRequired);
        }
        Ok(())
    }
}

/// A parsed row ready for insertion; ids are assigned by the store
#[derive(Debug, Clone, PartialEq)]
struct NewBooking {
    booking_date: NaiveDate,
    length_of_stay: i32,
    guest_name: String,
    daily_rate: Option<f64>,
}

#[tracing::instrument(skip(pool, command), fields(bytes = command.content.len()))]
pub async fn handle(
    pool: PgPool,
    command: ReplaceBookingsCommand,
) -> Result<ReplaceBookingsResponse, ReplaceBookingsError> {
    command.validate()?;

    let rows = parse_upload(&command.content)?;

    let mut tx = pool.begin().await?;

    // Whole-table replace: prior rows are discarded and ids restart at 1.
    sqlx::query("TRUNCATE TABLE bookings RESTART IDENTITY")
        .execute(&mut *tx)
        .await?;

    for row in &rows {
        sqlx::query(
            "INSERT INTO bookings (booking_date, length_of_stay, guest_name, daily_rate) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(row.booking_date)
        .bind(row.length_of_stay)
        .bind(&row.guest_name)
        .bind(row.daily_rate)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    tracing::info!(rows = rows.len(), "Booking table replaced from upload");

    Ok(ReplaceBookingsResponse {
        rows_inserted: rows.len(),
    })
}

const REQUIRED_COLUMNS: [&str; 3] = ["booking_date", "length_of_stay", "guest_name"];

fn parse_upload(bytes: &[u8]) -> Result<Vec<NewBooking>, ReplaceBookingsError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let headers = reader.headers()?.clone();
    let columns: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            (
                name.trim()
                    .trim_start_matches('\u{feff}')
                    .to_ascii_lowercase(),
                idx,
            )
        })
        .collect();

    for name in REQUIRED_COLUMNS {
        if !columns.contains_key(name) {
            return Err(ReplaceBookingsError::MissingColumn(name));
        }
    }

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let line = idx + 2;
        let record = result?;
        let row = parse_row(&record, &columns)
            .map_err(|message| ReplaceBookingsError::Row { line, message })?;
        rows.push(row);
    }

    Ok(rows)
}

fn parse_row(record: &StringRecord, columns: &HashMap<String, usize>) -> Result<NewBooking, String> {
    let cell = |name: &str| -> &str {
        columns
            .get(name)
            .and_then(|idx| record.get(*idx))
            .unwrap_or("")
            .trim()
    };

    let booking_date = NaiveDate::parse_from_str(cell("booking_date"), "%Y-%m-%d")
        .map_err(|_| format!("invalid booking_date '{}'", cell("booking_date")))?;

    let length_of_stay: i32 = cell("length_of_stay")
        .parse()
        .map_err(|_| format!("invalid length_of_stay '{}'", cell("length_of_stay")))?;
    if length_of_stay < 0 {
        return Err("length_of_stay cannot be negative".to_string());
    }

    let guest_name = cell("guest_name").to_string();
    if guest_name.is_empty() {
        return Err("guest_name cannot be empty".to_string());
    }

    let daily_rate = match cell("daily_rate") {
        "" => None,
        value => {
            let rate: f64 = value
                .parse()
                .map_err(|_| format!("invalid daily_rate '{}'", value))?;
            if !rate.is_finite() || rate < 0.0 {
                return Err(format!("daily_rate '{}' must be non-negative", value));
            }
            Some(rate)
        }
    };

    Ok(NewBooking {
        booking_date,
        length_of_stay,
        guest_name,
        daily_rate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "booking_date,length_of_stay,guest_name,daily_rate";

    fn upload(rows: &[&str]) -> Vec<u8> {
        let mut csv = String::from(HEADER);
        for row in rows {
            csv.push('\n');
            csv.push_str(row);
        }
        csv.into_bytes()
    }

    #[test]
    fn test_validate_rejects_empty_content() {
        let command = ReplaceBookingsCommand { content: vec![] };
        assert!(matches!(
            command.validate(),
            Err(ReplaceBookingsError::ContentRequired)
        ));
    }

    #[test]
    fn test_parses_well_formed_upload() {
        let bytes = upload(&[
            "2024-03-01,3,Ada Lovelace,120.5",
            "2024-03-02,1,Alan Turing,",
        ]);

        let rows = parse_upload(&bytes).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].guest_name, "Ada Lovelace");
        assert_eq!(rows[0].daily_rate, Some(120.5));
        assert_eq!(rows[1].daily_rate, None);
        assert_eq!(
            rows[1].booking_date,
            NaiveDate::from_ymd_opt(2024, 3, 2).unwrap()
        );
    }

    #[test]
    fn test_malformed_row_rejects_whole_file() {
        let bytes = upload(&[
            "2024-03-01,3,Ada Lovelace,120.5",
            "not-a-date,1,Alan Turing,50.0",
        ]);

        match parse_upload(&bytes).unwrap_err() {
            ReplaceBookingsError::Row { line, message } => {
                assert_eq!(line, 3);
                assert!(message.contains("booking_date"));
            }
            other => panic!("expected row error, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_stay_is_rejected() {
        let bytes = upload(&["2024-03-01,-2,Ada Lovelace,120.5"]);
        assert!(matches!(
            parse_upload(&bytes),
            Err(ReplaceBookingsError::Row { .. })
        ));
    }

    #[test]
    fn test_negative_rate_is_rejected() {
        let bytes = upload(&["2024-03-01,2,Ada Lovelace,-1.0"]);
        assert!(matches!(
            parse_upload(&bytes),
            Err(ReplaceBookingsError::Row { .. })
        ));
    }

    #[test]
    fn test_missing_column_is_rejected() {
        let bytes = b"booking_date,guest_name\n2024-03-01,Ada".to_vec();
        assert!(matches!(
            parse_upload(&bytes),
            Err(ReplaceBookingsError::MissingColumn("length_of_stay"))
        ));
    }

    #[test]
    fn test_missing_daily_rate_column_is_allowed() {
        let bytes = b"booking_date,length_of_stay,guest_name\n2024-03-01,2,Ada".to_vec();
        let rows = parse_upload(&bytes).unwrap();
        assert_eq!(rows[0].daily_rate, None);
    }
}
