//! CSV parsing into a `SalesTable`.
//!
//! The source file carries more columns than the reports use (GDP, consumer
//! confidence, seasonality weight, city, ...); we resolve the columns we need
//! by header name and ignore the rest.
//!
//! Design goals:
//! - **Strict schema** for required columns (clear errors, exit code 2)
//! - **Fatal on malformed rows**, with the offending line number (there is
//!   no partial-load mode for this dataset)
//! - **Deterministic behavior**: rows keep file order, which later drives
//!   first-appearance grouping order

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::domain::{SalesRecord, SalesTable};
use crate::error::AppError;

const REQUIRED_COLUMNS: [&str; 8] = [
    "year",
    "month",
    "vehicle_type",
    "automobile_sales",
    "price",
    "advertising_expenditure",
    "unemployment_rate",
    "recession",
];

/// Load and parse a local CSV file.
pub fn load_sales_file(path: &Path) -> Result<SalesTable, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::usage(format!("Failed to open CSV '{}': {e}", path.display()))
    })?;
    parse_sales_csv(file, &path.display().to_string())
}

/// Parse CSV text into a `SalesTable`.
///
/// `origin` (a URL or file path) is only used in error messages.
pub fn parse_sales_csv<R: Read>(reader: R, origin: &str) -> Result<SalesTable, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AppError::usage(format!("Failed to read CSV headers from {origin}: {e}")))?
        .clone();

    let header_map = build_header_map(&headers);
    for name in REQUIRED_COLUMNS {
        if !header_map.contains_key(name) {
            return Err(AppError::usage(format!(
                "Dataset {origin} is missing required column `{name}`."
            )));
        }
    }

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // records() starts after the header row; CSV line numbers are 1-based.
        let line = idx + 2;

        let record = result.map_err(|e| {
            AppError::usage(format!("CSV parse error at {origin}:{line}: {e}"))
        })?;

        let row = parse_row(&record, &header_map)
            .map_err(|e| AppError::usage(format!("Bad row at {origin}:{line}: {e}")))?;
        records.push(row);
    }

    SalesTable::new(records)
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Excel and friends sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header. Strip it so schema validation doesn't report a missing
    // column that is actually present.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn parse_row(record: &StringRecord, header_map: &HashMap<String, usize>) -> Result<SalesRecord, String> {
    let year = get_required(record, header_map, "year")?
        .parse::<i32>()
        .map_err(|e| format!("Invalid `Year` value: {e}"))?;

    let month = get_required(record, header_map, "month")?.to_string();
    let vehicle_type = get_required(record, header_map, "vehicle_type")?.to_string();

    let automobile_sales = parse_f64(record, header_map, "automobile_sales")?;
    let price = parse_f64(record, header_map, "price")?;
    let advertising_expenditure = parse_f64(record, header_map, "advertising_expenditure")?;
    let unemployment_rate = parse_f64(record, header_map, "unemployment_rate")?;

    // The recession column is a 0/1 flag; any nonzero numeric counts as set.
    let recession = parse_f64(record, header_map, "recession")? != 0.0;

    Ok(SalesRecord {
        year,
        month,
        vehicle_type,
        automobile_sales,
        price,
        advertising_expenditure,
        unemployment_rate,
        recession,
    })
}

fn parse_f64(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Result<f64, String> {
    let raw = get_required(record, header_map, name)?;
    let v = raw
        .parse::<f64>()
        .map_err(|e| format!("Invalid `{name}` value '{raw}': {e}"))?;
    if !v.is_finite() {
        return Err(format!("Non-finite `{name}` value '{raw}'."));
    }
    Ok(v)
}

fn get_required<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Result<&'a str, String> {
    let idx = header_map
        .get(name)
        .ok_or_else(|| format!("Missing required column: `{name}`"))?;
    record
        .get(*idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing required value: `{name}`"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Date,Year,Month,Recession,Consumer_Confidence,Price,Advertising_Expenditure,unemployment_rate,Automobile_Sales,Vehicle_Type\n";

    #[test]
    fn parses_rows_and_ignores_extra_columns() {
        let csv = format!(
            "{HEADER}\
             1980-01-01,1980,Jan,1,95.5,27483.57,1558.08,5.5,551.0,Supperminicar\n\
             1980-02-01,1980,Feb,0,93.2,24308.68,1744.37,5.2,614.0,Mediumfamilycar\n"
        );
        let table = parse_sales_csv(csv.as_bytes(), "test").unwrap();

        assert_eq!(table.records().len(), 2);
        let first = &table.records()[0];
        assert_eq!(first.year, 1980);
        assert_eq!(first.month, "Jan");
        assert_eq!(first.vehicle_type, "Supperminicar");
        assert!(first.recession);
        assert!(!table.records()[1].recession);
        assert!((first.automobile_sales - 551.0).abs() < 1e-12);
    }

    #[test]
    fn missing_column_is_fatal() {
        let csv = "Year,Month,Vehicle_Type\n1980,Jan,Sedan\n";
        let err = parse_sales_csv(csv.as_bytes(), "test").unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("missing required column"));
    }

    #[test]
    fn malformed_row_reports_line_number() {
        let csv = format!(
            "{HEADER}\
             1980-01-01,1980,Jan,1,95.5,27483.57,1558.08,5.5,551.0,Sedan\n\
             1980-02-01,not-a-year,Feb,0,93.2,24308.68,1744.37,5.2,614.0,Sedan\n"
        );
        let err = parse_sales_csv(csv.as_bytes(), "test").unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains(":3"), "got: {err}");
    }

    #[test]
    fn bom_on_first_header_is_stripped() {
        let csv = format!("\u{feff}{HEADER}1980-01-01,1980,Jan,0,95.5,1.0,2.0,5.5,10.0,Sedan\n");
        let table = parse_sales_csv(csv.as_bytes(), "test").unwrap();
        assert_eq!(table.records().len(), 1);
    }

    #[test]
    fn empty_dataset_is_fatal() {
        let err = parse_sales_csv(HEADER.as_bytes(), "test").unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
