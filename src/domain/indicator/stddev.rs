//! Standard Deviation indicator.
//!
//! Sample standard deviation over the last n closing prices:
//! STDDEV(n) = sqrt(sum((C[i] - SMA(n))^2) / (n - 1))
//! Needs at least two closes in the window.

use crate::domain::indicator_helpers::{mean, trailing_window};

pub fn sample_stddev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let avg = mean(values)?;
    let variance = values
        .iter()
        .map(|v| {
            let diff = v - avg;
            diff * diff
        })
        .sum::<f64>()
        / (values.len() - 1) as f64;
    Some(variance.sqrt())
}

/// STDDEV(n) evaluated at the last bar.
pub fn latest_stddev(closes: &[f64], period: usize) -> Option<f64> {
    trailing_window(closes, period).and_then(sample_stddev)
}
