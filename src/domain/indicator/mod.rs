//! Indicator engine: reduces a price series to its latest snapshot.
//!
//! - `IndicatorBundle`: latest close, previous close, fast/slow EMA, RSI,
//!   volatility-band resistance and trailing-high resistance
//! - `IndicatorType`: indicator identity + parameters, used for labelling
//! - `compute_indicators`: never fails; degrades to the zero-sentinel bundle

pub mod bollinger;
pub mod ema;
pub mod rsi;
pub mod stddev;

use crate::domain::error::DashboardError;
use crate::domain::indicator_helpers::trailing_high;
use crate::domain::price_series::PriceSeries;
use std::fmt;

pub const EMA_FAST_SPAN: usize = 50;
pub const EMA_SLOW_SPAN: usize = 200;
pub const RSI_PERIOD: usize = 14;
pub const BAND_PERIOD: usize = 20;
pub const BAND_STDDEV_MULT: f64 = 2.0;
pub const TRAILING_HIGH_SESSIONS: usize = 252;

/// Sentinel for "unavailable" on every bundle field.
pub const UNAVAILABLE: f64 = 0.0;

/// Point-in-time indicator snapshot for one ticker.
///
/// Any field equal to [`UNAVAILABLE`] means the series was empty, too short
/// for that statistic, or could not be used.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorBundle {
    pub price: f64,
    pub prev_close: f64,
    pub ema_fast: f64,
    pub ema_slow: f64,
    pub rsi: f64,
    /// Upper volatility band (SMA20 + 2 sample std-devs).
    pub resistance1: f64,
    /// Highest close over the trailing 52 weeks.
    pub resistance2: f64,
}

impl IndicatorBundle {
    pub const UNAVAILABLE: IndicatorBundle = IndicatorBundle {
        price: UNAVAILABLE,
        prev_close: UNAVAILABLE,
        ema_fast: UNAVAILABLE,
        ema_slow: UNAVAILABLE,
        rsi: UNAVAILABLE,
        resistance1: UNAVAILABLE,
        resistance2: UNAVAILABLE,
    };

    pub fn is_available(&self) -> bool {
        self.price != UNAVAILABLE
    }

    /// (price - prev_close) / prev_close, 0 without a previous close.
    pub fn day_change_pct(&self) -> f64 {
        if self.prev_close > 0.0 {
            (self.price - self.prev_close) / self.prev_close
        } else {
            0.0
        }
    }

    pub fn labelled(&self) -> [(IndicatorType, f64); 5] {
        [
            (IndicatorType::Ema(EMA_FAST_SPAN), self.ema_fast),
            (IndicatorType::Ema(EMA_SLOW_SPAN), self.ema_slow),
            (IndicatorType::Rsi(RSI_PERIOD), self.rsi),
            (
                IndicatorType::BollingerUpper {
                    period: BAND_PERIOD,
                    stddev_mult_x100: (BAND_STDDEV_MULT * 100.0) as u32,
                },
                self.resistance1,
            ),
            (
                IndicatorType::TrailingHigh(TRAILING_HIGH_SESSIONS),
                self.resistance2,
            ),
        ]
    }
}

impl Default for IndicatorBundle {
    fn default() -> Self {
        Self::UNAVAILABLE
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Ema(usize),
    Rsi(usize),
    BollingerUpper { period: usize, stddev_mult_x100: u32 },
    TrailingHigh(usize),
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Ema(span) => write!(f, "EMA({})", span),
            IndicatorType::Rsi(period) => write!(f, "RSI({})", period),
            IndicatorType::BollingerUpper {
                period,
                stddev_mult_x100,
            } => {
                let mult = *stddev_mult_x100 as f64 / 100.0;
                write!(f, "BOLLINGER_UPPER({},{})", period, mult)
            }
            IndicatorType::TrailingHigh(sessions) => write!(f, "HIGH({})", sessions),
        }
    }
}

/// Computes the bundle, rejecting series that cannot be trusted.
///
/// Short series are not errors: statistics whose window does not fit are
/// left at [`UNAVAILABLE`]. Fewer than two closes yields the full sentinel.
pub fn try_compute_indicators(series: &PriceSeries) -> Result<IndicatorBundle, DashboardError> {
    let closes = series.closes();

    if let Some(bad) = closes.iter().find(|c| !c.is_finite() || **c <= 0.0) {
        return Err(DashboardError::MalformedSeries {
            ticker: series.ticker().to_string(),
            reason: format!("close {} is not a positive finite price", bad),
        });
    }

    if closes.len() < 2 {
        return Ok(IndicatorBundle::UNAVAILABLE);
    }

    let or_unavailable = |v: Option<f64>| v.filter(|x| x.is_finite()).unwrap_or(UNAVAILABLE);

    Ok(IndicatorBundle {
        price: closes[closes.len() - 1],
        prev_close: closes[closes.len() - 2],
        ema_fast: or_unavailable(ema::latest_ema(&closes, EMA_FAST_SPAN)),
        ema_slow: or_unavailable(ema::latest_ema(&closes, EMA_SLOW_SPAN)),
        rsi: or_unavailable(rsi::latest_rsi(&closes, RSI_PERIOD)),
        resistance1: or_unavailable(
            bollinger::latest_upper_band(&closes, BAND_PERIOD, BAND_STDDEV_MULT),
        ),
        resistance2: or_unavailable(trailing_high(&closes, TRAILING_HIGH_SESSIONS)),
    })
}

/// Per-ticker boundary of the engine: never fails.
pub fn compute_indicators(series: &PriceSeries) -> IndicatorBundle {
    match try_compute_indicators(series) {
        Ok(bundle) => {
            if !bundle.is_available() {
                log::warn!(
                    "{}: {} closes, not enough history for indicators",
                    series.ticker(),
                    series.len()
                );
            }
            bundle
        }
        Err(e) => {
            log::warn!("{}: using unavailable indicators ({})", series.ticker(), e);
            IndicatorBundle::UNAVAILABLE
        }
    }
}
