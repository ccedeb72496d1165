use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

use super::PassReport;
use crate::config::Config;
use crate::constants::cleaned_column;
use crate::error::Result;
use crate::normalize::menu_normalizers;
use crate::table::{raw_cell, Table};

pub const TABLE: &str = "menu";

/// Add a cleaned column after each of `place`, `sponsor`, `event` and
/// `venue`. Returns the number of changed values per source column.
pub fn clean_menu_table(table: &mut Table, source: &Path) -> Result<BTreeMap<String, usize>> {
    let mut changed = BTreeMap::new();

    for normalizer in menu_normalizers() {
        let column = normalizer.column();
        let index = table.require_column(column, source)?;

        let cleaned: Vec<String> = table
            .column_values(index)
            .map(|value| normalizer.clean(value))
            .collect();
        let count = table
            .rows
            .iter()
            .zip(&cleaned)
            .filter(|(row, value)| raw_cell(row, index) != value.as_str())
            .count();

        debug!(column, changed = count, "Cleaned column");
        table.insert_column_after(index, cleaned_column(column), cleaned);
        changed.insert(column.to_string(), count);
    }

    Ok(changed)
}

pub fn run(config: &Config) -> Result<PassReport> {
    let (input, output) = config.menu_paths();
    let mut report = PassReport::start(TABLE, &input, &output);

    let mut table = Table::read_csv(&input)?;
    report.rows_read = table.rows.len();
    report.changed = clean_menu_table(&mut table, &input)?;
    table.write_csv(&output)?;

    Ok(report.finish(table.rows.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CleanerError;

    fn row(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_cleaned_columns_follow_their_sources() {
        let mut table = Table::new(
            row(&["id", "sponsor", "event", "venue", "place", "date"]),
            vec![
                row(&[
                    "1",
                    "Hotel Eastman",
                    "Breakfast;",
                    "COMMERCIAL",
                    "Hot Springs, Ark",
                    "1900-04-15",
                ]),
                row(&["2", "", "dinne", "[?]", "New York, NY, New York, NY", ""]),
            ],
        );

        let changed = clean_menu_table(&mut table, Path::new("Menu.csv")).unwrap();

        assert_eq!(
            table.headers,
            row(&[
                "id", "sponsor", "sponsor_cleaned", "event", "event_cleaned", "venue",
                "venue_cleaned", "place", "place_cleaned", "date",
            ])
        );
        assert_eq!(
            table.rows[0],
            row(&[
                "1", "Hotel Eastman", "HOTEL EASTMAN", "Breakfast;", "BREAKFAST", "COMMERCIAL",
                "COMMERCIAL", "Hot Springs, Ark", "HOT SPRINGS, AR", "1900-04-15",
            ])
        );
        assert_eq!(
            table.rows[1],
            row(&[
                "2", "", "UNKNOWN", "dinne", "DINNER", "[?]", "UNKNOWN",
                "New York, NY, New York, NY", "NEW YORK, NY", "",
            ])
        );

        assert_eq!(changed["venue"], 1);
        assert_eq!(changed["place"], 2);
        assert_eq!(changed["sponsor"], 2);
    }

    #[test]
    fn test_missing_text_column_is_fatal() {
        let mut table = Table::new(row(&["place", "sponsor", "event"]), vec![]);
        let err = clean_menu_table(&mut table, Path::new("Menu.csv")).unwrap_err();
        assert!(matches!(err, CleanerError::MissingColumn { ref column, .. } if column == "venue"));
    }
}
