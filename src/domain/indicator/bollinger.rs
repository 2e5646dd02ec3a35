//! Upper Bollinger band.
//!
//! Upper = SMA(n) + multiplier × StdDev(n), where StdDev is the sample
//! standard deviation (divides by N-1). Default parameters: period=20,
//! multiplier=2.0.

use crate::domain::indicator::stddev::latest_stddev;
use crate::domain::indicator_helpers::latest_sma;

/// Upper band at the last bar, `None` while the window is incomplete.
pub fn latest_upper_band(closes: &[f64], period: usize, multiplier: f64) -> Option<f64> {
    let middle = latest_sma(closes, period)?;
    let stddev = latest_stddev(closes, period)?;
    Some(middle + multiplier * stddev)
}
