//! Dataset appender — merges newly generated resource records into the
//! persisted CSV with (`Name`, `Contact`) deduplication.
//!
//! The existing file's schema is authoritative: new records are padded,
//! stripped, and reordered to match it before merging. The write is a full
//! read-modify-write with no partial-write recovery.

use std::collections::HashSet;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::info;

use crate::dataset::{DatasetError, Row, Table, CONTACT_COLUMN, NAME_COLUMN};

/// A generated resource record, as decoded from the completion response.
pub type Record = Map<String, Value>;

/// Merges `new_records` into the CSV at `path`.
///
/// When the file exists, new records are aligned to its column set, appended
/// after the existing rows, and deduplicated by (`Name`, `Contact`) keeping
/// the first occurrence, so pre-existing rows win on key collision. When the
/// file is absent, the records are written out directly with their natural
/// column set.
pub fn append_resources(path: &Path, new_records: &[Record]) -> Result<(), DatasetError> {
    let combined = match Table::read_csv(path) {
        Ok(existing) => merge_aligned(existing, new_records),
        Err(DatasetError::NotFound(_)) => {
            info!("Resource file {} absent; creating it", path.display());
            from_records(new_records)
        }
        Err(e) => return Err(e),
    };

    combined.write_csv(path)?;
    info!(
        "Appended resources to {} ({} rows total)",
        path.display(),
        combined.rows.len()
    );
    Ok(())
}

/// Aligns new records to the existing schema, concatenates, and deduplicates.
fn merge_aligned(existing: Table, new_records: &[Record]) -> Table {
    let columns = existing.columns;
    let mut rows = existing.rows;

    for record in new_records {
        // Only columns the file already has survive; anything else the
        // generator produced is dropped. Missing columns get the null marker.
        let row: Row = columns
            .iter()
            .map(|col| {
                let cell = record.get(col).map(value_to_cell).unwrap_or_default();
                (col.clone(), cell)
            })
            .collect();
        rows.push(row);
    }

    Table {
        columns,
        rows: dedup_by_key(rows),
    }
}

/// Builds a table straight from the records, schema being the union of their
/// keys in first-seen order.
fn from_records(new_records: &[Record]) -> Table {
    let mut columns: Vec<String> = Vec::new();
    for record in new_records {
        for key in record.keys() {
            if !columns.iter().any(|c| c == key) {
                columns.push(key.clone());
            }
        }
    }

    let rows = new_records
        .iter()
        .map(|record| {
            record
                .iter()
                .map(|(key, value)| (key.clone(), value_to_cell(value)))
                .collect()
        })
        .collect();

    Table {
        columns,
        rows: dedup_by_key(rows),
    }
}

/// Removes rows sharing a (`Name`, `Contact`) key with an earlier row.
fn dedup_by_key(rows: Vec<Row>) -> Vec<Row> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    rows.into_iter()
        .filter(|row| {
            let key = (
                row.get(NAME_COLUMN).cloned().unwrap_or_default(),
                row.get(CONTACT_COLUMN).cloned().unwrap_or_default(),
            );
            seen.insert(key)
        })
        .collect()
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
