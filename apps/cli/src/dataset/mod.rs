//! Dataset model and loader.
//!
//! The dataset is an explicit list of records: an ordered schema
//! (`columns`) plus one string map per row. The on-disk column set is
//! authoritative; schema-aware operations (append) align against it.

pub mod append;
pub mod filter;
pub mod risk;

use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;
use tracing::warn;

use crate::dataset::risk::{RiskLevel, Thresholds};

pub const NAME_COLUMN: &str = "Name";
pub const CONTACT_COLUMN: &str = "Contact";
pub const LOCATION_COLUMN: &str = "Location";
pub const SPECIALTY_COLUMN: &str = "Specialty";
pub const DATA_VALUE_COLUMN: &str = "Data_Value";
pub const RISK_COLUMN: &str = "Risk Level";

/// One record: column name → cell value. A missing key means the cell is
/// absent; the empty string is the on-disk null marker.
pub type Row = HashMap<String, String>;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Resource file not found: {0}")]
    NotFound(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// In-memory table with a remembered column order.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    /// Reads a CSV file, using its header as the schema.
    pub fn read_csv(path: &Path) -> Result<Table, DatasetError> {
        if !path.exists() {
            return Err(DatasetError::NotFound(path.display().to_string()));
        }

        let mut reader = csv::Reader::from_path(path)?;
        let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let row: Row = columns
                .iter()
                .zip(record.iter())
                .map(|(col, cell)| (col.clone(), cell.to_string()))
                .collect();
            rows.push(row);
        }

        Ok(Table { columns, rows })
    }

    /// Writes the table back out, replacing the file. Cells for columns a row
    /// does not carry are written as empty fields.
    pub fn write_csv(&self, path: &Path) -> Result<(), DatasetError> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(&self.columns)?;
        for row in &self.rows {
            writer.write_record(
                self.columns
                    .iter()
                    .map(|col| row.get(col).map(String::as_str).unwrap_or("")),
            )?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Loads the resource dataset and derives the `Risk Level` column from
/// `Data_Value` by equal-width range splitting.
///
/// Rows whose `Data_Value` is missing or non-numeric are excluded from the
/// min/max computation and stamped with the neutral band.
pub fn load_resources(path: &Path) -> Result<Table, DatasetError> {
    let mut table = Table::read_csv(path)?;

    let values: Vec<f64> = table
        .rows
        .iter()
        .filter_map(|row| row.get(DATA_VALUE_COLUMN))
        .filter_map(|cell| cell.trim().parse::<f64>().ok())
        .collect();

    let thresholds = if values.is_empty() {
        warn!("No numeric '{DATA_VALUE_COLUMN}' values in dataset; defaulting risk levels");
        None
    } else {
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        Some(Thresholds::from_range(min, max))
    };

    for row in &mut table.rows {
        let level = row
            .get(DATA_VALUE_COLUMN)
            .and_then(|cell| cell.trim().parse::<f64>().ok())
            .and_then(|value| thresholds.map(|t| t.classify(value)))
            .unwrap_or(RiskLevel::Normal);
        row.insert(RISK_COLUMN.to_string(), level.as_str().to_string());
    }

    if !table.columns.iter().any(|c| c == RISK_COLUMN) {
        table.columns.push(RISK_COLUMN.to_string());
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_fixture(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    const FIXTURE: &str = "\
Name,Type,Location,Specialty,Contact,Data_Value
Hope Center,Clinic,Boston MA,Anxiety,555-0100,5
Calm Clinic,Clinic,Austin TX,Depression,555-0101,15
Crisis Line,Hotline,Denver CO,Crisis Intervention,555-0102,25
";

    #[test]
    fn test_load_resources_derives_risk_levels() {
        let file = write_fixture(FIXTURE);
        let table = load_resources(file.path()).unwrap();

        // min=5, max=25 → thresholds at 11.67 and 18.33
        assert_eq!(table.rows[0][RISK_COLUMN], "Low Risk");
        assert_eq!(table.rows[1][RISK_COLUMN], "Normal Risk");
        assert_eq!(table.rows[2][RISK_COLUMN], "High Risk");
        assert_eq!(table.columns.last().unwrap(), RISK_COLUMN);
    }

    #[test]
    fn test_load_resources_missing_file_is_not_found() {
        let result = load_resources(Path::new("/nonexistent/resources.csv"));
        assert!(matches!(result, Err(DatasetError::NotFound(_))));
    }

    #[test]
    fn test_load_resources_non_numeric_value_defaults_to_normal() {
        let file = write_fixture(
            "Name,Contact,Data_Value\nA,1,5\nB,2,not-a-number\nC,3,25\n",
        );
        let table = load_resources(file.path()).unwrap();
        assert_eq!(table.rows[1][RISK_COLUMN], "Normal Risk");
        // The unparsable row must not skew the range for the others.
        assert_eq!(table.rows[0][RISK_COLUMN], "Low Risk");
        assert_eq!(table.rows[2][RISK_COLUMN], "High Risk");
    }

    #[test]
    fn test_read_csv_preserves_header_order() {
        let file = write_fixture(FIXTURE);
        let table = Table::read_csv(file.path()).unwrap();
        assert_eq!(
            table.columns,
            vec!["Name", "Type", "Location", "Specialty", "Contact", "Data_Value"]
        );
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[0]["Name"], "Hope Center");
    }

    #[test]
    fn test_write_csv_round_trips_and_pads_missing_cells() {
        let table = Table {
            columns: vec!["Name".to_string(), "Contact".to_string()],
            rows: vec![
                Row::from([("Name".to_string(), "A".to_string())]),
                Row::from([
                    ("Name".to_string(), "B".to_string()),
                    ("Contact".to_string(), "555".to_string()),
                ]),
            ],
        };

        let file = tempfile::NamedTempFile::new().unwrap();
        table.write_csv(file.path()).unwrap();
        let back = Table::read_csv(file.path()).unwrap();

        assert_eq!(back.columns, table.columns);
        assert_eq!(back.rows[0]["Contact"], "");
        assert_eq!(back.rows[1]["Contact"], "555");
    }
}
