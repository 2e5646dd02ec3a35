//! Shared helpers for latest-value rolling statistics.
//!
//! Every helper looks only at the trailing window ending on the most recent
//! close. `None` means the window does not fit in the series.

/// Trailing window of exactly `period` closes, or `None` if too short.
pub fn trailing_window(closes: &[f64], period: usize) -> Option<&[f64]> {
    if period == 0 || closes.len() < period {
        return None;
    }
    Some(&closes[closes.len() - period..])
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// SMA(n) evaluated at the last bar.
pub fn latest_sma(closes: &[f64], period: usize) -> Option<f64> {
    trailing_window(closes, period).and_then(mean)
}

/// Highest close over the last `lookback` bars, or over all of them if the
/// series is shorter.
pub fn trailing_high(closes: &[f64], lookback: usize) -> Option<f64> {
    if lookback == 0 {
        return None;
    }
    let start = closes.len().saturating_sub(lookback);
    closes[start..].iter().copied().reduce(f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_window_exact_fit() {
        let closes = [1.0, 2.0, 3.0];
        assert_eq!(trailing_window(&closes, 3), Some(&closes[..]));
        assert_eq!(trailing_window(&closes, 2), Some(&closes[1..]));
    }

    #[test]
    fn trailing_window_too_short() {
        assert_eq!(trailing_window(&[1.0, 2.0], 3), None);
        assert_eq!(trailing_window(&[1.0, 2.0], 0), None);
    }

    #[test]
    fn latest_sma_uses_last_window() {
        let closes = [10.0, 20.0, 30.0, 40.0, 50.0];
        let sma = latest_sma(&closes, 3).unwrap();
        assert!((sma - 40.0).abs() < 1e-12);
    }

    #[test]
    fn latest_sma_insufficient() {
        assert_eq!(latest_sma(&[10.0, 20.0], 20), None);
    }

    #[test]
    fn trailing_high_limits_lookback() {
        let closes = [90.0, 10.0, 20.0, 15.0];
        assert_eq!(trailing_high(&closes, 3), Some(20.0));
        assert_eq!(trailing_high(&closes, 4), Some(90.0));
    }

    #[test]
    fn trailing_high_uses_all_when_short() {
        let closes = [5.0, 7.0, 6.0];
        assert_eq!(trailing_high(&closes, 252), Some(7.0));
    }

    #[test]
    fn trailing_high_empty() {
        assert_eq!(trailing_high(&[], 252), None);
        assert_eq!(trailing_high(&[1.0], 0), None);
    }
}
