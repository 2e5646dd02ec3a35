#![allow(dead_code)]

use buyzone::domain::error::DashboardError;
use buyzone::domain::holding::{Category, Holding};
use buyzone::domain::portfolio::Portfolio;
pub use buyzone::domain::price_series::{PricePoint, PriceSeries};
use buyzone::domain::watchlist::WatchlistEntry;
use buyzone::ports::price_port::PriceHistoryPort;
use chrono::{Duration, NaiveDate};
use std::cell::RefCell;
use std::collections::HashMap;

pub struct MockPricePort {
    pub data: HashMap<String, Vec<f64>>,
    pub errors: HashMap<String, String>,
    pub requests: RefCell<Vec<(String, usize)>>,
}

impl MockPricePort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn with_series(mut self, ticker: &str, closes: Vec<f64>) -> Self {
        self.data.insert(ticker.to_string(), closes);
        self
    }

    pub fn with_error(mut self, ticker: &str, reason: &str) -> Self {
        self.errors.insert(ticker.to_string(), reason.to_string());
        self
    }
}

impl PriceHistoryPort for MockPricePort {
    fn fetch_history(
        &self,
        ticker: &str,
        lookback_sessions: usize,
    ) -> Result<PriceSeries, DashboardError> {
        self.requests
            .borrow_mut()
            .push((ticker.to_string(), lookback_sessions));
        if let Some(reason) = self.errors.get(ticker) {
            return Err(DashboardError::DataSource {
                ticker: ticker.to_string(),
                reason: reason.clone(),
            });
        }
        match self.data.get(ticker) {
            Some(closes) => Ok(make_series(ticker, closes).tail(lookback_sessions)),
            None => Err(DashboardError::NoData {
                ticker: ticker.to_string(),
            }),
        }
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// One close per calendar day starting 2024-01-01.
pub fn make_series(ticker: &str, closes: &[f64]) -> PriceSeries {
    let start = date(2024, 1, 1);
    let points = closes
        .iter()
        .enumerate()
        .map(|(i, &c)| PricePoint::new(start + Duration::days(i as i64), c))
        .collect();
    PriceSeries::new(ticker, points).unwrap()
}

/// `count` closes rising linearly from `first` to `last` inclusive.
pub fn linear_closes(first: f64, last: f64, count: usize) -> Vec<f64> {
    let step = (last - first) / (count - 1) as f64;
    (0..count).map(|i| first + step * i as f64).collect()
}

pub fn flat_closes(price: f64, count: usize) -> Vec<f64> {
    vec![price; count]
}

pub fn sample_portfolio() -> Portfolio {
    let mut portfolio = Portfolio::new(90.0).unwrap();
    portfolio
        .add_holding(Holding::new("AMZN", Category::Growth, 200.0, 2.0).with_name("Amazon.com Inc."))
        .unwrap();
    portfolio
        .add_holding(Holding::new("KO", Category::Defensive, 50.0, 10.0))
        .unwrap();
    portfolio
        .add_watch(WatchlistEntry::new("PLTR").with_tier("S+"))
        .unwrap();
    portfolio.add_watch(WatchlistEntry::new("KO")).unwrap();
    portfolio
}

/// Writes `<dir>/<TICKER>.csv` with a `date,close` header.
pub fn write_price_csv(dir: &std::path::Path, ticker: &str, closes: &[f64]) {
    let start = date(2024, 1, 1);
    let mut content = String::from("date,close\n");
    for (i, close) in closes.iter().enumerate() {
        let day = start + Duration::days(i as i64);
        content.push_str(&format!("{},{}\n", day.format("%Y-%m-%d"), close));
    }
    std::fs::write(dir.join(format!("{}.csv", ticker)), content).unwrap();
}
