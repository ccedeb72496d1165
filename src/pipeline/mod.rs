//! The three cleaning passes, one per source table.
//!
//! Each pass loads its CSV in full, applies the normalizers column by column,
//! and writes the result next to the configured output path. Table-level
//! transforms are split from file I/O so they can be exercised in memory.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;
use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::metrics;

pub mod menu;
pub mod menu_item;
pub mod menu_page;

/// Which table to clean
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    Menu,
    MenuItem,
    MenuPage,
}

impl Pass {
    pub const ALL: [Pass; 3] = [Pass::Menu, Pass::MenuItem, Pass::MenuPage];

    pub fn table_name(&self) -> &'static str {
        match self {
            Pass::Menu => menu::TABLE,
            Pass::MenuItem => menu_item::TABLE,
            Pass::MenuPage => menu_page::TABLE,
        }
    }

    pub fn run(&self, config: &Config) -> Result<PassReport> {
        match self {
            Pass::Menu => menu::run(config),
            Pass::MenuItem => menu_item::run(config),
            Pass::MenuPage => menu_page::run(config),
        }
    }
}

/// Summary of one pass over one table
#[derive(Debug, Clone, Serialize)]
pub struct PassReport {
    pub table: String,
    pub input_file: String,
    pub output_file: String,
    pub rows_read: usize,
    pub rows_written: usize,
    /// Per source column, how many cleaned values differ from the original
    pub changed: BTreeMap<String, usize>,
    /// Per reason, how many rows were left out of the output
    pub dropped: BTreeMap<String, usize>,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
    #[serde(skip)]
    timer: Option<Instant>,
}

impl PassReport {
    pub fn start(table: &str, input: &Path, output: &Path) -> Self {
        info!(table, input = %input.display(), "Starting pass");
        Self {
            table: table.to_string(),
            input_file: input.display().to_string(),
            output_file: output.display().to_string(),
            rows_read: 0,
            rows_written: 0,
            changed: BTreeMap::new(),
            dropped: BTreeMap::new(),
            started_at: Utc::now(),
            duration_ms: 0,
            timer: Some(Instant::now()),
        }
    }

    /// Stamp the duration, record counters, and log the outcome
    pub fn finish(mut self, rows_written: usize) -> Self {
        self.rows_written = rows_written;
        self.duration_ms = self
            .timer
            .take()
            .map(|t| t.elapsed().as_millis() as u64)
            .unwrap_or_default();

        metrics::pass::rows_read(&self.table, self.rows_read);
        metrics::pass::rows_written(&self.table, self.rows_written);
        for (field, count) in &self.changed {
            metrics::pass::values_changed(&self.table, field, *count);
        }
        for (reason, count) in &self.dropped {
            metrics::pass::rows_dropped(&self.table, reason_label(reason), *count);
        }

        info!(
            table = %self.table,
            rows_read = self.rows_read,
            rows_written = self.rows_written,
            duration_ms = self.duration_ms,
            output = %self.output_file,
            "Pass finished"
        );
        self
    }

    /// Human readable console summary
    pub fn summary(&self) -> String {
        let mut out = format!(
            "{}: {} rows read, {} rows written -> {}\n",
            self.table, self.rows_read, self.rows_written, self.output_file
        );
        for (field, count) in &self.changed {
            out.push_str(&format!("   {} cleaned changes: {}\n", field, count));
        }
        for (reason, count) in &self.dropped {
            out.push_str(&format!("   rows dropped ({}): {}\n", reason, count));
        }
        out
    }
}

// Metric labels must be 'static; reasons come from a closed set
fn reason_label(reason: &str) -> &'static str {
    match reason {
        menu_page::DROPPED_MISSING_KEY => menu_page::DROPPED_MISSING_KEY,
        menu_page::DROPPED_DUPLICATE => menu_page::DROPPED_DUPLICATE,
        _ => "other",
    }
}
