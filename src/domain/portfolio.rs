//! Holdings/watchlist repository.
//!
//! Owned by the caller and mutated only through the commands below. The
//! aggregator borrows it immutably for one refresh.

use std::collections::BTreeSet;

use super::holding::Holding;
use super::watchlist::WatchlistEntry;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PortfolioError {
    #[error("duplicate ticker: {0}")]
    DuplicateTicker(String),

    #[error("unknown ticker: {0}")]
    UnknownTicker(String),

    #[error("invalid quantity for {ticker}: {quantity}")]
    InvalidQuantity { ticker: String, quantity: f64 },

    #[error("invalid average cost for {ticker}: {average_cost}")]
    InvalidCost { ticker: String, average_cost: f64 },

    #[error("cash balance must be non-negative, got {0}")]
    NegativeCash(f64),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Portfolio {
    cash: f64,
    holdings: Vec<Holding>,
    watchlist: Vec<WatchlistEntry>,
}

impl Portfolio {
    pub fn new(cash: f64) -> Result<Self, PortfolioError> {
        let mut portfolio = Portfolio::default();
        portfolio.set_cash(cash)?;
        Ok(portfolio)
    }

    pub fn cash(&self) -> f64 {
        self.cash
    }

    pub fn holdings(&self) -> &[Holding] {
        &self.holdings
    }

    pub fn watchlist(&self) -> &[WatchlistEntry] {
        &self.watchlist
    }

    pub fn add_holding(&mut self, holding: Holding) -> Result<(), PortfolioError> {
        if self.has_holding(&holding.ticker) {
            return Err(PortfolioError::DuplicateTicker(holding.ticker));
        }
        validate_cost_basis(&holding.ticker, holding.average_cost, holding.quantity)?;
        self.holdings.push(holding);
        Ok(())
    }

    pub fn get_holding(&self, ticker: &str) -> Option<&Holding> {
        self.holdings.iter().find(|h| h.ticker == ticker)
    }

    pub fn has_holding(&self, ticker: &str) -> bool {
        self.get_holding(ticker).is_some()
    }

    pub fn remove_holding(&mut self, ticker: &str) -> Result<Holding, PortfolioError> {
        let idx = self
            .holdings
            .iter()
            .position(|h| h.ticker == ticker)
            .ok_or_else(|| PortfolioError::UnknownTicker(ticker.to_string()))?;
        Ok(self.holdings.remove(idx))
    }

    pub fn update_cost_basis(
        &mut self,
        ticker: &str,
        average_cost: f64,
        quantity: f64,
    ) -> Result<(), PortfolioError> {
        validate_cost_basis(ticker, average_cost, quantity)?;
        let holding = self
            .holdings
            .iter_mut()
            .find(|h| h.ticker == ticker)
            .ok_or_else(|| PortfolioError::UnknownTicker(ticker.to_string()))?;
        holding.average_cost = average_cost;
        holding.quantity = quantity;
        Ok(())
    }

    pub fn add_watch(&mut self, entry: WatchlistEntry) -> Result<(), PortfolioError> {
        if self.is_watched(&entry.ticker) {
            return Err(PortfolioError::DuplicateTicker(entry.ticker));
        }
        self.watchlist.push(entry);
        Ok(())
    }

    pub fn is_watched(&self, ticker: &str) -> bool {
        self.watchlist.iter().any(|e| e.ticker == ticker)
    }

    pub fn remove_watch(&mut self, ticker: &str) -> Result<WatchlistEntry, PortfolioError> {
        let idx = self
            .watchlist
            .iter()
            .position(|e| e.ticker == ticker)
            .ok_or_else(|| PortfolioError::UnknownTicker(ticker.to_string()))?;
        Ok(self.watchlist.remove(idx))
    }

    pub fn set_cash(&mut self, cash: f64) -> Result<(), PortfolioError> {
        if !cash.is_finite() || cash < 0.0 {
            return Err(PortfolioError::NegativeCash(cash));
        }
        self.cash = cash;
        Ok(())
    }

    /// Distinct tickers across holdings and watchlist, sorted.
    pub fn tracked_tickers(&self) -> Vec<String> {
        let tickers: BTreeSet<&str> = self
            .holdings
            .iter()
            .map(|h| h.ticker.as_str())
            .chain(self.watchlist.iter().map(|e| e.ticker.as_str()))
            .collect();
        tickers.into_iter().map(str::to_string).collect()
    }
}

fn validate_cost_basis(ticker: &str, average_cost: f64, quantity: f64) -> Result<(), PortfolioError> {
    if !quantity.is_finite() || quantity <= 0.0 {
        return Err(PortfolioError::InvalidQuantity {
            ticker: ticker.to_string(),
            quantity,
        });
    }
    if !average_cost.is_finite() || average_cost < 0.0 {
        return Err(PortfolioError::InvalidCost {
            ticker: ticker.to_string(),
            average_cost,
        });
    }
    Ok(())
}
