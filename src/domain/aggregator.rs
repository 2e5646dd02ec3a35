//! Builds the holdings view, the ranked watchlist and portfolio totals from
//! one refresh worth of price histories.

use crate::domain::holding::{Category, Holding};
use crate::domain::indicator::{compute_indicators, IndicatorBundle};
use crate::domain::portfolio::Portfolio;
use crate::domain::price_series::PriceSeries;
use crate::domain::signal::{classify, SignalBundle, SignalState};
use crate::domain::watchlist::WatchlistEntry;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoldingRow {
    pub ticker: String,
    pub name: Option<String>,
    #[serde(serialize_with = "serialize_display")]
    pub category: Category,
    pub quantity: f64,
    pub average_cost: f64,
    pub price: f64,
    pub prev_close: f64,
    pub value: f64,
    pub cost: f64,
    pub gain: f64,
    pub pct_return: f64,
    pub day_change: f64,
    pub day_change_pct: f64,
    #[serde(serialize_with = "serialize_display")]
    pub signal: SignalState,
    pub diff_to_support: f64,
    pub upside: f64,
    pub ema_fast: f64,
    pub ema_slow: f64,
    pub resistance1: f64,
    pub resistance2: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WatchlistRow {
    pub ticker: String,
    pub tier: String,
    pub price: f64,
    pub day_change_pct: f64,
    #[serde(serialize_with = "serialize_display")]
    pub signal: SignalState,
    pub diff_to_support: f64,
    pub upside: f64,
    pub rsi: f64,
    pub resistance1: f64,
    pub resistance2: f64,
    pub ema_fast: f64,
    pub ema_slow: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HoldingsView {
    pub rows: Vec<HoldingRow>,
}

impl HoldingsView {
    /// Rows grouped by category, each group in holding order.
    pub fn by_category(&self) -> BTreeMap<Category, Vec<&HoldingRow>> {
        let mut groups: BTreeMap<Category, Vec<&HoldingRow>> = BTreeMap::new();
        for row in &self.rows {
            groups.entry(row.category.clone()).or_default().push(row);
        }
        groups
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct WatchlistView {
    pub rows: Vec<WatchlistRow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Totals {
    pub cash: f64,
    pub invested_value: f64,
    pub total_value: f64,
    pub total_cost: f64,
    pub total_gain: f64,
    pub total_return_pct: f64,
    pub total_day_change: f64,
    pub total_day_change_pct: f64,
}

impl Totals {
    /// Total value converted at a static exchange rate.
    pub fn in_currency(&self, rate: f64) -> f64 {
        self.total_value * rate
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dashboard {
    pub holdings: HoldingsView,
    pub watchlist: WatchlistView,
    pub totals: Totals,
}

/// One full refresh: engine once per distinct ticker, then classifier and
/// P/L per row. Tickers missing from `histories` get the sentinel bundle.
pub fn build(portfolio: &Portfolio, histories: &HashMap<String, PriceSeries>) -> Dashboard {
    let bundles = compute_bundles(portfolio, histories);
    let bundle_for = |ticker: &str| {
        bundles
            .get(ticker)
            .copied()
            .unwrap_or(IndicatorBundle::UNAVAILABLE)
    };

    let holdings = HoldingsView {
        rows: portfolio
            .holdings()
            .iter()
            .map(|h| holding_row(h, &bundle_for(&h.ticker)))
            .collect(),
    };

    let mut watchlist = WatchlistView {
        rows: portfolio
            .watchlist()
            .iter()
            .map(|e| watchlist_row(e, &bundle_for(&e.ticker)))
            .collect(),
    };
    rank_watchlist(&mut watchlist.rows);

    let totals = compute_totals(&holdings.rows, portfolio.cash());

    log::info!(
        "refreshed {} holdings, {} watchlist tickers",
        holdings.rows.len(),
        watchlist.rows.len()
    );

    Dashboard {
        holdings,
        watchlist,
        totals,
    }
}

fn compute_bundles(
    portfolio: &Portfolio,
    histories: &HashMap<String, PriceSeries>,
) -> HashMap<String, IndicatorBundle> {
    portfolio
        .tracked_tickers()
        .into_iter()
        .map(|ticker| {
            let bundle = match histories.get(&ticker) {
                Some(series) => compute_indicators(series),
                None => {
                    log::warn!("{}: no price history, indicators unavailable", ticker);
                    IndicatorBundle::UNAVAILABLE
                }
            };
            log::debug!("{}: {:?}", ticker, bundle);
            (ticker, bundle)
        })
        .collect()
}

fn holding_row(holding: &Holding, bundle: &IndicatorBundle) -> HoldingRow {
    let SignalBundle {
        state,
        diff_to_support,
        upside,
    } = classify(bundle);
    let price = bundle.price;

    HoldingRow {
        ticker: holding.ticker.clone(),
        name: holding.name.clone(),
        category: holding.category.clone(),
        quantity: holding.quantity,
        average_cost: holding.average_cost,
        price,
        prev_close: bundle.prev_close,
        value: holding.value(price),
        cost: holding.cost(),
        gain: holding.gain(price),
        pct_return: holding.pct_return(price),
        day_change: holding.day_change(price, bundle.prev_close),
        day_change_pct: bundle.day_change_pct(),
        signal: state,
        diff_to_support,
        upside,
        ema_fast: bundle.ema_fast,
        ema_slow: bundle.ema_slow,
        resistance1: bundle.resistance1,
        resistance2: bundle.resistance2,
    }
}

fn watchlist_row(entry: &WatchlistEntry, bundle: &IndicatorBundle) -> WatchlistRow {
    let signal = classify(bundle);
    WatchlistRow {
        ticker: entry.ticker.clone(),
        tier: entry.tier.clone(),
        price: bundle.price,
        day_change_pct: bundle.day_change_pct(),
        signal: signal.state,
        diff_to_support: signal.diff_to_support,
        upside: signal.upside,
        rsi: bundle.rsi,
        resistance1: bundle.resistance1,
        resistance2: bundle.resistance2,
        ema_fast: bundle.ema_fast,
        ema_slow: bundle.ema_slow,
    }
}

/// Signal bucket first, then distance to support, then ticker.
pub fn rank_watchlist(rows: &mut [WatchlistRow]) {
    rows.sort_by(|a, b| {
        a.signal
            .cmp(&b.signal)
            .then(a.diff_to_support.total_cmp(&b.diff_to_support))
            .then_with(|| a.ticker.cmp(&b.ticker))
    });
}

pub fn compute_totals(rows: &[HoldingRow], cash: f64) -> Totals {
    let invested_value: f64 = rows.iter().map(|r| r.value).sum();
    let total_cost: f64 = rows.iter().map(|r| r.cost).sum();
    let total_gain: f64 = rows.iter().map(|r| r.gain).sum();
    let total_day_change: f64 = rows.iter().map(|r| r.day_change).sum();

    Totals {
        cash,
        invested_value,
        total_value: invested_value + cash,
        total_cost,
        total_gain,
        total_return_pct: if total_cost == 0.0 {
            0.0
        } else {
            total_gain / total_cost
        },
        total_day_change,
        total_day_change_pct: if invested_value == 0.0 {
            0.0
        } else {
            total_day_change / invested_value
        },
    }
}

fn serialize_display<T, S>(value: &T, s: S) -> Result<S::Ok, S::Error>
where
    T: std::fmt::Display,
    S: serde::Serializer,
{
    s.collect_str(value)
}
