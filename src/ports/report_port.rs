//! Report generation port trait.

use crate::domain::aggregator::Dashboard;
use crate::domain::error::DashboardError;
use std::path::Path;

/// Port for writing the dashboard views somewhere outside the process.
pub trait ReportPort {
    fn write(&self, dashboard: &Dashboard, output_dir: &Path) -> Result<(), DashboardError>;
}
