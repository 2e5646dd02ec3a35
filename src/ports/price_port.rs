//! Price history provider port trait.

use crate::domain::error::DashboardError;
use crate::domain::price_series::PriceSeries;
use std::collections::HashMap;

pub trait PriceHistoryPort {
    /// Chronological closes covering the last `lookback_sessions` sessions.
    fn fetch_history(
        &self,
        ticker: &str,
        lookback_sessions: usize,
    ) -> Result<PriceSeries, DashboardError>;

    /// Fetches every ticker, leaving failed ones out of the map.
    ///
    /// A failure for one ticker never blocks the others.
    fn fetch_batch(
        &self,
        tickers: &[String],
        lookback_sessions: usize,
    ) -> HashMap<String, PriceSeries> {
        let mut histories = HashMap::with_capacity(tickers.len());
        for ticker in tickers {
            match self.fetch_history(ticker, lookback_sessions) {
                Ok(series) => {
                    histories.insert(ticker.clone(), series);
                }
                Err(e) => log::warn!("skipping {} ({})", ticker, e),
            }
        }
        histories
    }
}
