//! Counters for the cleaning passes, recorded through the `metrics` facade.
//!
//! Nothing is exported unless [`init`] installs the Prometheus recorder;
//! without it every call below is a no-op.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::{CleanerError, Result};

pub const ROWS_READ: &str = "menu_cleaner_rows_read_total";
pub const ROWS_WRITTEN: &str = "menu_cleaner_rows_written_total";
pub const VALUES_CHANGED: &str = "menu_cleaner_values_changed_total";
pub const ROWS_DROPPED: &str = "menu_cleaner_rows_dropped_total";

/// Install the Prometheus recorder and return a handle for rendering
pub fn init() -> Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder().map_err(|e| {
        CleanerError::Config(format!("Failed to install Prometheus recorder: {}", e))
    })?;
    info!("Metrics recorder installed");
    Ok(handle)
}

/// Write the current metric values in Prometheus text format
pub fn dump(handle: &PrometheusHandle, path: &Path) -> Result<()> {
    fs::write(path, handle.render()).map_err(|e| CleanerError::write(path, e))?;
    info!(path = %path.display(), "Metrics written");
    Ok(())
}

pub mod pass {
    use super::{ROWS_DROPPED, ROWS_READ, ROWS_WRITTEN, VALUES_CHANGED};

    pub fn rows_read(table: &str, count: usize) {
        ::metrics::counter!(ROWS_READ, "table" => table.to_string()).increment(count as u64);
    }

    pub fn rows_written(table: &str, count: usize) {
        ::metrics::counter!(ROWS_WRITTEN, "table" => table.to_string()).increment(count as u64);
    }

    /// Cleaned values that differ from their source in `field`
    pub fn values_changed(table: &str, field: &str, count: usize) {
        ::metrics::counter!(
            VALUES_CHANGED,
            "table" => table.to_string(),
            "field" => field.to_string()
        )
        .increment(count as u64);
    }

    pub fn rows_dropped(table: &str, reason: &'static str, count: usize) {
        ::metrics::counter!(ROWS_DROPPED, "table" => table.to_string(), "reason" => reason)
            .increment(count as u64);
    }
}
