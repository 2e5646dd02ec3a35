//! Candidate tickers with their static tier.

pub const UNRANKED_TIER: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchlistEntry {
    pub ticker: String,
    /// Qualitative rank such as "S+", "A" or "ETF". Purely descriptive.
    pub tier: String,
}

impl WatchlistEntry {
    pub fn new(ticker: &str) -> Self {
        Self {
            ticker: ticker.trim().to_uppercase(),
            tier: UNRANKED_TIER.to_string(),
        }
    }

    pub fn with_tier(mut self, tier: &str) -> Self {
        let tier = tier.trim();
        self.tier = if tier.is_empty() {
            UNRANKED_TIER.to_string()
        } else {
            tier.to_string()
        };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tier_is_unranked() {
        let e = WatchlistEntry::new(" pltr ");
        assert_eq!(e.ticker, "PLTR");
        assert_eq!(e.tier, "-");
    }

    #[test]
    fn with_tier() {
        assert_eq!(WatchlistEntry::new("AAPL").with_tier("S+").tier, "S+");
        assert_eq!(WatchlistEntry::new("AAPL").with_tier("  ").tier, "-");
    }
}
