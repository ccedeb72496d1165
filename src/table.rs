use std::fs::File;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{CleanerError, Result};

/// An in-memory CSV table. Cells are kept as text; a blank cell is the
/// absent value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Load a whole CSV file with a header row
    pub fn read_csv(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| CleanerError::read(path, e))?;
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| CleanerError::csv(path, e))?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let width = headers.len();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| CleanerError::csv(path, e))?;
            if record.len() > width {
                return Err(CleanerError::ExtraFields {
                    path: path.to_path_buf(),
                    line: record.position().map_or(0, |p| p.line()),
                    expected: width,
                    found: record.len(),
                });
            }
            let mut row: Vec<String> = record.iter().map(|s| s.to_string()).collect();
            // Short rows get blank cells
            row.resize(width, String::new());
            rows.push(row);
        }

        debug!(path = %path.display(), rows = rows.len(), columns = width, "Loaded table");
        Ok(Self { headers, rows })
    }

    /// Serialize the table to `path`.
    ///
    /// The data goes to a temporary file in the destination directory which
    /// is renamed into place only once fully written, so a failure never
    /// leaves a truncated output behind.
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let temp = NamedTempFile::new_in(dir).map_err(|e| CleanerError::write(path, e))?;

        let mut writer = csv::Writer::from_writer(temp);
        writer
            .write_record(&self.headers)
            .map_err(|e| CleanerError::csv(path, e))?;
        for row in &self.rows {
            writer.write_record(row).map_err(|e| CleanerError::csv(path, e))?;
        }

        writer.flush().map_err(|e| CleanerError::write(path, e))?;
        let temp = writer.into_inner().map_err(|e| {
            CleanerError::write(path, std::io::Error::new(e.error().kind(), e.to_string()))
        })?;
        temp.persist(path)
            .map_err(|e| CleanerError::write(path, e.error))?;

        debug!(path = %path.display(), rows = self.rows.len(), "Wrote table");
        Ok(())
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Index of a column that must exist; `path` names the file in the error
    pub fn require_column(&self, name: &str, path: &Path) -> Result<usize> {
        self.column_index(name).ok_or_else(|| CleanerError::MissingColumn {
            path: path.to_path_buf(),
            column: name.to_string(),
        })
    }

    /// Values of one column, blank cells as `None`
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = Option<&str>> + '_ {
        self.rows.iter().map(move |row| cell(row, index))
    }

    /// Insert a derived column right after `source`, returning its index.
    ///
    /// `values` must hold one entry per row.
    pub fn insert_column_after(
        &mut self,
        source: usize,
        name: String,
        values: Vec<String>,
    ) -> usize {
        debug_assert_eq!(values.len(), self.rows.len());
        let at = source + 1;
        self.headers.insert(at, name);
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.insert(at, value);
        }
        at
    }
}

/// Raw text of one cell, `""` when out of range
pub fn raw_cell(row: &[String], index: usize) -> &str {
    row.get(index).map(String::as_str).unwrap_or("")
}

/// One cell as an optional value: blank or out-of-range is `None`
pub fn cell(row: &[String], index: usize) -> Option<&str> {
    row.get(index)
        .map(String::as_str)
        .filter(|value| !value.trim().is_empty())
}
