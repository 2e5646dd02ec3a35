//! CSV report adapter implementing ReportPort.
//!
//! Writes `holdings.csv`, `watchlist.csv` and `totals.csv` into the output
//! directory, creating it if needed. Watchlist rows keep their ranked order.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::domain::aggregator::Dashboard;
use crate::domain::error::DashboardError;
use crate::ports::report_port::ReportPort;

pub const HOLDINGS_FILE: &str = "holdings.csv";
pub const WATCHLIST_FILE: &str = "watchlist.csv";
pub const TOTALS_FILE: &str = "totals.csv";

pub struct CsvReportAdapter;

impl CsvReportAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CsvReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

fn write_rows<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), DashboardError> {
    let report_err = |e: csv::Error| DashboardError::Report {
        reason: format!("failed to write {}: {}", path.display(), e),
    };

    let mut writer = csv::Writer::from_path(path).map_err(report_err)?;
    for row in rows {
        writer.serialize(row).map_err(report_err)?;
    }
    writer.flush()?;
    Ok(())
}

impl ReportPort for CsvReportAdapter {
    fn write(&self, dashboard: &Dashboard, output_dir: &Path) -> Result<(), DashboardError> {
        fs::create_dir_all(output_dir)?;

        write_rows(&output_dir.join(HOLDINGS_FILE), &dashboard.holdings.rows)?;
        write_rows(&output_dir.join(WATCHLIST_FILE), &dashboard.watchlist.rows)?;
        write_rows(&output_dir.join(TOTALS_FILE), &[dashboard.totals])?;

        log::info!("wrote dashboard report to {}", output_dir.display());
        Ok(())
    }
}
