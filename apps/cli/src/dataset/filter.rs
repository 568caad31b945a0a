//! Resource filtering — case-insensitive substring match over the
//! `Location` and `Specialty` columns.

use crate::dataset::{Row, Table, LOCATION_COLUMN, SPECIALTY_COLUMN};

/// Selects rows whose `Location` contains `location` and whose `Specialty`
/// contains `specialty`, case-insensitively. Rows missing either column are
/// non-matching. Original row order is preserved.
pub fn filter_resources(table: &Table, location: &str, specialty: &str) -> Vec<Row> {
    let location = location.to_lowercase();
    let specialty = specialty.to_lowercase();

    table
        .rows
        .iter()
        .filter(|row| {
            contains_ci(row, LOCATION_COLUMN, &location)
                && contains_ci(row, SPECIALTY_COLUMN, &specialty)
        })
        .cloned()
        .collect()
}

fn contains_ci(row: &Row, column: &str, lowercase_needle: &str) -> bool {
    match row.get(column) {
        Some(cell) => cell.to_lowercase().contains(lowercase_needle),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        let mk = |name: &str, location: &str, specialty: &str| {
            Row::from([
                ("Name".to_string(), name.to_string()),
                ("Location".to_string(), location.to_string()),
                ("Specialty".to_string(), specialty.to_string()),
            ])
        };
        Table {
            columns: vec![
                "Name".to_string(),
                "Location".to_string(),
                "Specialty".to_string(),
            ],
            rows: vec![
                mk("Hope Center", "Boston MA", "Anxiety"),
                mk("Calm Clinic", "Austin TX", "Depression"),
                mk("Harbor House", "South Boston MA", "Anxiety and Depression"),
            ],
        }
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let t = table();
        let upper = filter_resources(&t, "Boston", "Anxiety");
        let lower = filter_resources(&t, "boston", "anxiety");
        assert_eq!(upper.len(), 2);
        assert_eq!(upper, lower);
    }

    #[test]
    fn test_filter_matches_substrings_in_both_columns() {
        let t = table();
        let matches = filter_resources(&t, "austin", "depress");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0]["Name"], "Calm Clinic");
    }

    #[test]
    fn test_filter_preserves_original_row_order() {
        let t = table();
        let matches = filter_resources(&t, "boston", "");
        let names: Vec<&str> = matches.iter().map(|r| r["Name"].as_str()).collect();
        assert_eq!(names, vec!["Hope Center", "Harbor House"]);
    }

    #[test]
    fn test_filter_empty_queries_match_everything() {
        let t = table();
        assert_eq!(filter_resources(&t, "", "").len(), 3);
    }

    #[test]
    fn test_filter_excludes_rows_missing_matched_columns() {
        let mut t = table();
        t.rows.push(Row::from([("Name".to_string(), "No Address".to_string())]));
        // Even an everything-matches query skips rows without the columns.
        assert_eq!(filter_resources(&t, "", "").len(), 3);
    }

    #[test]
    fn test_filter_no_match_returns_empty() {
        let t = table();
        assert!(filter_resources(&t, "Nowhere", "Grief").is_empty());
    }
}
