//! Exponential Moving Average.
//!
//! k = 2/(n+1), EMA[0] = C[0], then EMA[i] = C[i]*k + EMA[i-1]*(1-k).
//! No SMA seed and no warmup: every bar carries a value.
//!
//! The update is evaluated as EMA[i-1] + k*(C[i] - EMA[i-1]) so a constant
//! series reproduces its price exactly.

/// Full EMA series, one value per close.
pub fn calculate_ema(closes: &[f64], span: usize) -> Vec<f64> {
    if span == 0 || closes.is_empty() {
        return Vec::new();
    }

    let k = 2.0 / (span as f64 + 1.0);
    let mut values = Vec::with_capacity(closes.len());
    let mut ema = closes[0];
    values.push(ema);

    for &close in &closes[1..] {
        ema += k * (close - ema);
        values.push(ema);
    }

    values
}

/// Latest EMA value over the whole series.
pub fn latest_ema(closes: &[f64], span: usize) -> Option<f64> {
    calculate_ema(closes, span).last().copied()
}
