use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use tracing::{debug, warn};

use super::PassReport;
use crate::config::{Config, MenuPageConfig};
use crate::constants::{cleaned_column, MISSING};
use crate::error::Result;
use crate::table::{cell, raw_cell, Table};

pub const TABLE: &str = "menu_page";

pub const DROPPED_MISSING_KEY: &str = "missing_key";
pub const DROPPED_DUPLICATE: &str = "duplicate";

/// Row and value counts produced by [`clean_menu_page_table`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageOutcome {
    pub missing_key: usize,
    pub duplicates: usize,
    pub changed: BTreeMap<String, usize>,
}

/// Filter, deduplicate and annotate the page table.
///
/// Rows with a blank key column are dropped, then rows that are identical
/// once every cell is trimmed collapse onto their first occurrence. Each
/// dimension column present gets a `_cleaned` copy showing `MISSING` for
/// blanks; each text column present gets a trimmed `_cleaned` copy. Source
/// columns are left untouched.
pub fn clean_menu_page_table(
    table: &mut Table,
    source: &Path,
    config: &MenuPageConfig,
) -> Result<PageOutcome> {
    let keys = config
        .key_columns
        .iter()
        .map(|column| table.require_column(column, source))
        .collect::<Result<Vec<usize>>>()?;

    let mut outcome = PageOutcome::default();

    let before = table.rows.len();
    table
        .rows
        .retain(|row| keys.iter().all(|&index| cell(row, index).is_some()));
    outcome.missing_key = before - table.rows.len();

    let before = table.rows.len();
    let mut seen = HashSet::new();
    table.rows.retain(|row| {
        let trimmed: Vec<String> = row.iter().map(|value| value.trim().to_string()).collect();
        seen.insert(trimmed)
    });
    outcome.duplicates = before - table.rows.len();

    if outcome.missing_key > 0 {
        warn!(rows = outcome.missing_key, "Dropped page rows with a blank key column");
    }
    debug!(rows = outcome.duplicates, "Dropped duplicate page rows");

    for column in &config.dimension_columns {
        derive_column(table, column, &mut outcome, |raw| match raw.trim() {
            "" => MISSING.to_string(),
            value => value.to_string(),
        });
    }
    for column in &config.text_columns {
        derive_column(table, column, &mut outcome, |raw| raw.trim().to_string());
    }

    Ok(outcome)
}

fn derive_column(
    table: &mut Table,
    column: &str,
    outcome: &mut PageOutcome,
    derive: impl Fn(&str) -> String,
) {
    let Some(index) = table.column_index(column) else {
        debug!(column, "Optional page column not present");
        return;
    };

    let values: Vec<String> = table
        .rows
        .iter()
        .map(|row| derive(raw_cell(row, index)))
        .collect();
    let changed = table
        .rows
        .iter()
        .zip(&values)
        .filter(|(row, value)| raw_cell(row, index) != value.as_str())
        .count();

    table.insert_column_after(index, cleaned_column(column), values);
    outcome.changed.insert(column.to_string(), changed);
}

pub fn run(config: &Config) -> Result<PassReport> {
    let (input, output) = config.menu_page_paths();
    let mut report = PassReport::start(TABLE, &input, &output);

    let mut table = Table::read_csv(&input)?;
    report.rows_read = table.rows.len();

    let outcome = clean_menu_page_table(&mut table, &input, &config.menu_page)?;
    report.changed = outcome.changed;
    report.dropped.insert(DROPPED_MISSING_KEY.to_string(), outcome.missing_key);
    report.dropped.insert(DROPPED_DUPLICATE.to_string(), outcome.duplicates);

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

    fn clean_pages(table: &mut Table) -> Result<PageOutcome> {
        clean_menu_page_table(table, Path::new("MenuPage.csv"), &MenuPageConfig::default())
    }

    fn page_table(rows: Vec<Vec<String>>) -> Table {
        Table::new(
            row(&["id", "menu_id", "page_number", "image_id", "full_height", "full_width", "uuid"]),
            rows,
        )
    }

    #[test]
    fn test_rows_with_blank_keys_are_dropped() {
        let mut table = page_table(vec![
            row(&["1", "100", "1", "img1", "3000", "2000", "u1"]),
            row(&["2", "100", "", "img2", "3000", "2000", "u2"]),
            row(&["3", " ", "1", "img3", "3000", "2000", "u3"]),
        ]);

        let outcome = clean_pages(&mut table).unwrap();

        assert_eq!(outcome.missing_key, 2);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0][0], "1");
    }

    #[test]
    fn test_rows_identical_after_trim_collapse_to_first() {
        let mut table = page_table(vec![
            row(&["1", "100", "1", " img1", "3000", "2000", "u1"]),
            row(&["5", "100", "2", "img5", "", "", "u5"]),
            row(&["1 ", "100", "1", "img1 ", "3000", "2000", "u1"]),
        ]);

        let outcome = clean_pages(&mut table).unwrap();

        assert_eq!(outcome.duplicates, 1);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][0], "1");
        assert_eq!(table.rows[0][3], " img1");
        assert_eq!(table.rows[1][0], "5");
    }

    #[test]
    fn test_derived_columns_show_missing_and_trimmed_text() {
        let mut table = page_table(vec![
            row(&["1", "100", "1", " img1 ", "", "2000", "u1"]),
        ]);

        let outcome = clean_pages(&mut table).unwrap();

        assert_eq!(
            table.headers,
            row(&[
                "id", "menu_id", "page_number", "image_id", "image_id_cleaned", "full_height",
                "full_height_cleaned", "full_width", "full_width_cleaned", "uuid", "uuid_cleaned",
            ])
        );
        assert_eq!(
            table.rows[0],
            row(&["1", "100", "1", " img1 ", "img1", "", "MISSING", "2000", "2000", "u1", "u1"])
        );
        assert_eq!(outcome.changed["full_height"], 1);
        assert_eq!(outcome.changed["full_width"], 0);
        assert_eq!(outcome.changed["image_id"], 1);
    }

    #[test]
    fn test_optional_columns_may_be_absent() {
        let mut table = Table::new(
            row(&["id", "menu_id", "page_number"]),
            vec![row(&["1", "2", "3"])],
        );
        let outcome = clean_pages(&mut table).unwrap();
        assert!(outcome.changed.is_empty());
        assert_eq!(table.headers, row(&["id", "menu_id", "page_number"]));
    }

    #[test]
    fn test_missing_key_column_is_fatal() {
        let mut table = Table::new(row(&["id", "menu_id"]), vec![]);
        let err = clean_pages(&mut table).unwrap_err();
        assert!(matches!(
            err,
            CleanerError::MissingColumn { ref column, .. } if column == "page_number"
        ));
    }
}
