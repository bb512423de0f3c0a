//! CSV parsing for the booking dataset
//!
//! Strict whole-file parsing: the first malformed row aborts the load with
//! the offending 1-based line number. Empty numeric cells load as zero
//! (the dataset leaves `adr` and guest counts blank for some rows); a
//! missing required column is fatal.

use std::collections::HashMap;

use csv::StringRecord;

use super::{BookingDatasetRow, DatasetError};

/// Columns the aggregation catalog requires
const REQUIRED_COLUMNS: [&str; 14] = [
    "hotel",
    "is_canceled",
    "arrival_date_year",
    "arrival_date_month",
    "arrival_date_day_of_month",
    "stays_in_weekend_nights",
    "stays_in_week_nights",
    "adults",
    "children",
    "babies",
    "meal",
    "country",
    "is_repeated_guest",
    "adr",
];

/// Parse the raw CSV bytes into dataset rows
pub fn parse_dataset(bytes: &[u8]) -> Result<Vec<BookingDatasetRow>, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let headers = reader.headers()?.clone();
    let columns = build_column_map(&headers);

    for name in REQUIRED_COLUMNS {
        if !columns.contains_key(name) {
            return Err(DatasetError::MissingColumn(name));
        }
    }

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // records() starts after the header row; CSV lines are 1-based.
        let line = idx + 2;
        let record = result?;
        let row = parse_row(&record, &columns)
            .map_err(|message| DatasetError::Row { line, message })?;
        rows.push(row);
    }

    Ok(rows)
}

fn build_column_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header(name), idx))
        .collect()
}

fn normalize_header(name: &str) -> String {
    // Strip a UTF-8 BOM from the first header; spreadsheet exports often
    // carry one and it would make the column invisible to the map.
    name.trim()
        .trim_start_matches('\u{feff}')
        .to_ascii_lowercase()
}

fn parse_row(
    record: &StringRecord,
    columns: &HashMap<String, usize>,
) -> Result<BookingDatasetRow, String> {
    Ok(BookingDatasetRow {
        hotel: cell(record, columns, "hotel").to_string(),
        is_canceled: flag(record, columns, "is_canceled")?,
        arrival_date_year: int(record, columns, "arrival_date_year")?,
        arrival_date_month: cell(record, columns, "arrival_date_month").to_string(),
        arrival_date_day_of_month: count(record, columns, "arrival_date_day_of_month")?,
        stays_in_weekend_nights: count(record, columns, "stays_in_weekend_nights")?,
        stays_in_week_nights: count(record, columns, "stays_in_week_nights")?,
        adults: count(record, columns, "adults")?,
        children: count(record, columns, "children")?,
        babies: count(record, columns, "babies")?,
        meal: cell(record, columns, "meal").to_string(),
        country: cell(record, columns, "country").to_string(),
        is_repeated_guest: flag(record, columns, "is_repeated_guest")?,
        adr: rate(record, columns, "adr")?,
    })
}

fn cell<'a>(record: &'a StringRecord, columns: &HashMap<String, usize>, name: &str) -> &'a str {
    columns
        .get(name)
        .and_then(|idx| record.get(*idx))
        .unwrap_or("")
        .trim()
}

fn flag(
    record: &StringRecord,
    columns: &HashMap<String, usize>,
    name: &str,
) -> Result<bool, String> {
    match cell(record, columns, name) {
        "0" | "" => Ok(false),
        "1" => Ok(true),
        other => Err(format!("invalid 0/1 flag '{}' in column '{}'", other, name)),
    }
}

fn int(
    record: &StringRecord,
    columns: &HashMap<String, usize>,
    name: &str,
) -> Result<i32, String> {
    let value = cell(record, columns, name);
    value
        .parse::<i32>()
        .map_err(|_| format!("invalid integer '{}' in column '{}'", value, name))
}

fn count(
    record: &StringRecord,
    columns: &HashMap<String, usize>,
    name: &str,
) -> Result<u32, String> {
    let value = cell(record, columns, name);
    if value.is_empty() {
        return Ok(0);
    }
    value
        .parse::<u32>()
        .map_err(|_| format!("invalid count '{}' in column '{}'", value, name))
}

fn rate(
    record: &StringRecord,
    columns: &HashMap<String, usize>,
    name: &str,
) -> Result<f64, String> {
    let value = cell(record, columns, name);
    if value.is_empty() {
        return Ok(0.0);
    }
    let parsed = value
        .parse::<f64>()
        .map_err(|_| format!("invalid decimal '{}' in column '{}'", value, name))?;
    if !parsed.is_finite() {
        return Err(format!("non-finite decimal '{}' in column '{}'", value, name));
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DatasetSource;
    use std::io::Write;

    const HEADER: &str = "hotel,is_canceled,arrival_date_year,arrival_date_month,\
arrival_date_day_of_month,stays_in_weekend_nights,stays_in_week_nights,adults,children,\
babies,meal,country,is_repeated_guest,adr";

    fn dataset(rows: &[&str]) -> Vec<u8> {
        let mut csv = String::from(HEADER);
        for row in rows {
            csv.push('\n');
            csv.push_str(row);
        }
        csv.into_bytes()
    }

    #[test]
    fn test_parses_well_formed_rows() {
        let bytes = dataset(&[
            "Resort Hotel,0,2015,July,1,0,2,2,0,0,BB,PRT,0,75.5",
            "City Hotel,1,2016,August,15,2,5,1,1,0,HB,GBR,1,120.0",
        ]);

        let rows = parse_dataset(&bytes).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].hotel, "Resort Hotel");
        assert!(!rows[0].is_canceled);
        assert_eq!(rows[0].arrival_date_year, 2015);
        assert_eq!(rows[0].adr, 75.5);
        assert!(rows[1].is_canceled);
        assert!(rows[1].is_repeated_guest);
        assert_eq!(rows[1].country, "GBR");
    }

    #[test]
    fn test_empty_numeric_cells_load_as_zero() {
        let bytes = dataset(&["Resort Hotel,0,2015,July,1,0,2,2,,0,BB,PRT,0,"]);

        let rows = parse_dataset(&bytes).unwrap();
        assert_eq!(rows[0].children, 0);
        assert_eq!(rows[0].adr, 0.0);
    }

    #[test]
    fn test_malformed_row_is_fatal_with_line_number() {
        let bytes = dataset(&[
            "Resort Hotel,0,2015,July,1,0,2,2,0,0,BB,PRT,0,75.5",
            "City Hotel,0,not-a-year,August,15,2,5,1,1,0,HB,GBR,0,120.0",
        ]);

        let err = parse_dataset(&bytes).unwrap_err();
        match err {
            DatasetError::Row { line, message } => {
                assert_eq!(line, 3);
                assert!(message.contains("arrival_date_year"));
            }
            other => panic!("expected row error, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_flag_is_fatal() {
        let bytes = dataset(&["Resort Hotel,maybe,2015,July,1,0,2,2,0,0,BB,PRT,0,75.5"]);
        assert!(matches!(
            parse_dataset(&bytes),
            Err(DatasetError::Row { line: 2, .. })
        ));
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let bytes = b"hotel,is_canceled\nResort Hotel,0".to_vec();
        assert!(matches!(
            parse_dataset(&bytes),
            Err(DatasetError::MissingColumn(_))
        ));
    }

    #[test]
    fn test_bom_on_first_header_is_stripped() {
        let mut bytes = "\u{feff}".to_string().into_bytes();
        bytes.extend_from_slice(&dataset(&[
            "Resort Hotel,0,2015,July,1,0,2,2,0,0,BB,PRT,0,75.5",
        ]));
        assert_eq!(parse_dataset(&bytes).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_source_missing_file_yields_empty_table() {
        let source = DatasetSource::new("/definitely/not/here.csv");
        let rows = source.load().await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_source_reads_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&dataset(&[
            "City Hotel,0,2017,May,3,1,2,2,0,0,SC,FRA,0,88.25",
        ]))
        .unwrap();

        let source = DatasetSource::new(file.path());
        let rows = source.load().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].meal, "SC");
    }

    #[tokio::test]
    async fn test_source_repeated_loads_are_identical() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&dataset(&[
            "Resort Hotel,0,2015,July,1,0,2,2,0,0,BB,PRT,0,75.5",
            "City Hotel,1,2016,August,15,2,5,1,1,0,HB,GBR,1,120.0",
        ]))
        .unwrap();

        let source = DatasetSource::new(file.path());
        let first = source.load().await.unwrap();
        let second = source.load().await.unwrap();
        assert_eq!(first, second);
    }
}
