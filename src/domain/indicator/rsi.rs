//! RSI (Relative Strength Index) indicator.
//!
//! Uses a simple rolling mean of the last n gains and losses (no Wilder
//! smoothing):
//! - change[i] = C[i] - C[i-1]
//! - gain = max(change, 0), loss = max(-change, 0)
//! - RS = mean(gain over n) / mean(loss over n)
//!
//! Formula: RSI = 100 - (100 / (1 + RS))
//! If mean loss == 0 and mean gain > 0: RSI = 100
//! If both are 0 (flat window): RSI = 50
//!
//! Warmup: needs n price changes, i.e. n + 1 closes.

use crate::domain::indicator_helpers::trailing_window;

pub const RSI_NEUTRAL: f64 = 50.0;

/// RSI(n) evaluated at the last bar.
pub fn latest_rsi(closes: &[f64], period: usize) -> Option<f64> {
    if period == 0 {
        return None;
    }
    let window = trailing_window(closes, period + 1)?;

    let (gain_sum, loss_sum) = window.windows(2).fold((0.0, 0.0), |(g, l), pair| {
        let change = pair[1] - pair[0];
        if change > 0.0 {
            (g + change, l)
        } else {
            (g, l - change)
        }
    });

    let avg_gain = gain_sum / period as f64;
    let avg_loss = loss_sum / period as f64;

    let rsi = if avg_loss == 0.0 && avg_gain == 0.0 {
        RSI_NEUTRAL
    } else if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - (100.0 / (1.0 + avg_gain / avg_loss))
    };
    Some(rsi)
}
