//! Time-to-live cache in front of a price history provider.
//!
//! Successful fetches are kept per `(ticker, lookback)` until the TTL runs
//! out. Failures pass straight through and are retried on the next call.
//!
//! Only pays off when one adapter serves several refreshes, e.g. a
//! long-running caller holding the port from `cli::cached_price_port`. The
//! one-shot `dashboard` command reads the provider directly.

use crate::domain::error::DashboardError;
use crate::domain::price_series::PriceSeries;
use crate::ports::clock_port::ClockPort;
use crate::ports::price_port::PriceHistoryPort;
use chrono::{DateTime, Duration, Utc};
use std::cell::RefCell;
use std::collections::HashMap;

type CacheKey = (String, usize);

pub struct CachedPriceAdapter<P, C> {
    inner: P,
    clock: C,
    ttl: Duration,
    entries: RefCell<HashMap<CacheKey, (DateTime<Utc>, PriceSeries)>>,
}

impl<P: PriceHistoryPort, C: ClockPort> CachedPriceAdapter<P, C> {
    pub fn new(inner: P, clock: C, ttl: Duration) -> Self {
        Self {
            inner,
            clock,
            ttl,
            entries: RefCell::new(HashMap::new()),
        }
    }

    /// Drops every cached history so the next fetch goes to the provider.
    pub fn invalidate_all(&self) {
        let dropped = self.entries.borrow().len();
        self.entries.borrow_mut().clear();
        log::info!("price cache cleared ({} entries)", dropped);
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    pub fn cached_len(&self) -> usize {
        self.entries.borrow().len()
    }

    fn lookup(&self, key: &CacheKey, now: DateTime<Utc>) -> Option<PriceSeries> {
        let entries = self.entries.borrow();
        let (stored_at, series) = entries.get(key)?;
        if now - *stored_at < self.ttl {
            Some(series.clone())
        } else {
            None
        }
    }
}

impl<P: PriceHistoryPort, C: ClockPort> PriceHistoryPort for CachedPriceAdapter<P, C> {
    fn fetch_history(
        &self,
        ticker: &str,
        lookback_sessions: usize,
    ) -> Result<PriceSeries, DashboardError> {
        let key = (ticker.to_string(), lookback_sessions);
        let now = self.clock.now();

        if let Some(series) = self.lookup(&key, now) {
            log::debug!("cache hit for {} ({} sessions)", ticker, lookback_sessions);
            return Ok(series);
        }

        log::debug!("cache miss for {} ({} sessions)", ticker, lookback_sessions);
        let series = self.inner.fetch_history(ticker, lookback_sessions)?;
        self.entries
            .borrow_mut()
            .insert(key, (now, series.clone()));
        Ok(series)
    }
}
