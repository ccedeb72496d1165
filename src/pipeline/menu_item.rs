use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

use super::PassReport;
use crate::config::Config;
use crate::constants::{cleaned_column, HIGH_PRICE, PRICE};
use crate::error::Result;
use crate::normalize::{clean_price, format_price, PriceValue};
use crate::table::{raw_cell, Table};

pub const TABLE: &str = "menu_item";

const PRICE_COLUMNS: [&str; 2] = [PRICE, HIGH_PRICE];

/// Add `price_cleaned` and `high_price_cleaned`, writing `placeholder` where
/// no price could be read. Returns the number of changed values per column.
pub fn clean_menu_item_table(
    table: &mut Table,
    source: &Path,
    placeholder: &str,
) -> Result<BTreeMap<String, usize>> {
    let mut changed = BTreeMap::new();

    for column in PRICE_COLUMNS {
        let index = table.require_column(column, source)?;

        let mut count = 0;
        let cleaned: Vec<String> = table
            .rows
            .iter()
            .map(|row| {
                let raw = raw_cell(row, index);
                let price = clean_price(PriceValue::from_cell(raw));
                if price_changed(raw, price) {
                    count += 1;
                }
                format_price(price, placeholder)
            })
            .collect();

        debug!(column, changed = count, "Cleaned price column");
        table.insert_column_after(index, cleaned_column(column), cleaned);
        changed.insert(column.to_string(), count);
    }

    Ok(changed)
}

/// A raw value counts as unchanged when it already reads as the same number,
/// or when it was blank and stays absent.
fn price_changed(raw: &str, cleaned: Option<f64>) -> bool {
    let raw = raw.trim();
    let original = raw.parse::<f64>().ok().filter(|v| v.is_finite());
    match (original, cleaned) {
        (Some(original), Some(cleaned)) => original != cleaned,
        (None, None) => !raw.is_empty(),
        _ => true,
    }
}

pub fn run(config: &Config) -> Result<PassReport> {
    let (input, output) = config.menu_item_paths();
    let mut report = PassReport::start(TABLE, &input, &output);

    let mut table = Table::read_csv(&input)?;
    report.rows_read = table.rows.len();
    report.changed =
        clean_menu_item_table(&mut table, &input, &config.menu_item.missing_placeholder)?;
    table.write_csv(&output)?;

    Ok(report.finish(table.rows.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_price_columns_are_cleaned_in_place_order() {
        let mut table = Table::new(
            row(&["id", "price", "high_price", "dish_id"]),
            vec![
                row(&["1", "0.4", "", "10"]),
                row(&["2", "two dollars", "three and a half", "11"]),
                row(&["3", "2 1/2", "$1.50", "12"]),
                row(&["4", "n/a", "3/4", "13"]),
            ],
        );

        let changed = clean_menu_item_table(&mut table, Path::new("MenuItem.csv"), "NaN").unwrap();

        assert_eq!(
            table.headers,
            row(&["id", "price", "price_cleaned", "high_price", "high_price_cleaned", "dish_id"])
        );
        let price: Vec<&str> = table.rows.iter().map(|r| r[2].as_str()).collect();
        let high: Vec<&str> = table.rows.iter().map(|r| r[4].as_str()).collect();
        assert_eq!(price, vec!["0.4", "2.0", "2.5", "NaN"]);
        assert_eq!(high, vec!["NaN", "3.5", "1.5", "0.75"]);

        assert_eq!(changed["price"], 3);
        assert_eq!(changed["high_price"], 3);
    }

    #[test]
    fn test_custom_placeholder() {
        let mut table = Table::new(row(&["price", "high_price"]), vec![row(&["?", ""])]);
        clean_menu_item_table(&mut table, Path::new("MenuItem.csv"), "NA").unwrap();
        assert_eq!(table.rows[0], row(&["?", "NA", "", "NA"]));
    }

    #[test]
    fn test_price_changed() {
        assert!(!price_changed("1.5", Some(1.5)));
        assert!(!price_changed(" 2 ", Some(2.0)));
        assert!(!price_changed("", None));
        assert!(price_changed("$1.50", Some(1.5)));
        assert!(price_changed("junk", None));
        assert!(price_changed("", Some(0.0)));
    }
}
