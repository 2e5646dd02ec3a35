//! Port traits at the I/O seams of the dashboard.

pub mod clock_port;
pub mod config_port;
pub mod price_port;
pub mod report_port;
