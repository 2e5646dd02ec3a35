//! CLI definition and dispatch.

use chrono::Duration;
use clap::{Parser, Subcommand};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::cached_price_adapter::CachedPriceAdapter;
use crate::adapters::csv_adapter::CsvPriceAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::aggregator::{self, Dashboard, HoldingsView, Totals, WatchlistView};
use crate::domain::config_validation::{
    holding_sections, optional_double, validate_dashboard_config, DASHBOARD_SECTION,
    DEFAULT_CACHE_TTL_SECS, DEFAULT_LOOKBACK_SESSIONS, HOLDING_SECTION_PREFIX, TIERS_SECTION,
    WATCHLIST_SECTION,
};
use crate::domain::error::DashboardError;
use crate::domain::holding::{Category, Holding};
use crate::domain::indicator::try_compute_indicators;
use crate::domain::portfolio::Portfolio;
use crate::domain::signal::{classify, rsi_zone, FAR_FROM_SUPPORT};
use crate::domain::universe::parse_tickers;
use crate::domain::watchlist::WatchlistEntry;
use crate::ports::clock_port::SystemClock;
use crate::ports::config_port::ConfigPort;
use crate::ports::price_port::PriceHistoryPort;
use crate::ports::report_port::ReportPort;

pub const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Parser, Debug)]
#[command(name = "buyzone", about = "Buy-zone dashboard for a personal portfolio")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Refresh prices and print holdings, watchlist and totals
    Dashboard {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// Directory for holdings.csv, watchlist.csv and totals.csv
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show indicators and signal for one ticker
    Signal {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        ticker: String,
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
    /// Validate a dashboard configuration
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

/// Settings from the `[dashboard]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub cash_balance: f64,
    pub data_dir: Option<PathBuf>,
    pub lookback_sessions: usize,
    pub cache_ttl: Duration,
    pub fx_rate: Option<f64>,
    pub fx_currency: Option<String>,
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Dashboard {
            config,
            data_dir,
            output,
        } => run_dashboard(&config, data_dir.as_deref(), output.as_deref()),
        Command::Signal {
            config,
            ticker,
            data_dir,
        } => run_signal(&config, &ticker, data_dir.as_deref()),
        Command::Validate { config } => run_validate(&config),
    }
}

fn report(err: DashboardError) -> ExitCode {
    eprintln!("error: {err}");
    (&err).into()
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        report(DashboardError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        })
    })
}

pub fn build_dashboard_config(config: &dyn ConfigPort) -> Result<DashboardConfig, DashboardError> {
    let lookback = config.get_int(
        DASHBOARD_SECTION,
        "lookback_sessions",
        DEFAULT_LOOKBACK_SESSIONS,
    );
    let lookback_sessions = usize::try_from(lookback)
        .ok()
        .filter(|n| *n >= 2)
        .ok_or_else(|| DashboardError::ConfigInvalid {
            section: DASHBOARD_SECTION.into(),
            key: "lookback_sessions".into(),
            reason: "lookback_sessions must be at least 2".into(),
        })?;

    let ttl_secs = config
        .get_int(DASHBOARD_SECTION, "cache_ttl_secs", DEFAULT_CACHE_TTL_SECS)
        .max(0);

    Ok(DashboardConfig {
        cash_balance: optional_double(config, DASHBOARD_SECTION, "cash_balance")?
            .unwrap_or(0.0),
        data_dir: config
            .get_string(DASHBOARD_SECTION, "data_dir")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from),
        lookback_sessions,
        cache_ttl: Duration::seconds(ttl_secs),
        fx_rate: optional_double(config, DASHBOARD_SECTION, "fx_rate")?,
        fx_currency: config
            .get_string(DASHBOARD_SECTION, "fx_currency")
            .filter(|s| !s.trim().is_empty()),
    })
}

/// Builds the repository from `[holding.*]`, `[watchlist]` and `[tiers]`.
pub fn build_portfolio(config: &dyn ConfigPort) -> Result<Portfolio, DashboardError> {
    let cash = optional_double(config, DASHBOARD_SECTION, "cash_balance")?.unwrap_or(0.0);
    let mut portfolio = Portfolio::new(cash)?;

    for section in holding_sections(config) {
        let ticker = section[HOLDING_SECTION_PREFIX.len()..].to_uppercase();
        let required = |key: &str| -> Result<f64, DashboardError> {
            optional_double(config, &section, key)?.ok_or_else(|| DashboardError::ConfigMissing {
                section: section.clone(),
                key: key.to_string(),
            })
        };
        let average_cost = required("avg_cost")?;
        let quantity = required("quantity")?;

        let category = config
            .get_string(&section, "category")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| UNCATEGORIZED.to_string());
        let Ok(category) = category.parse::<Category>();

        let mut holding = Holding::new(&ticker, category, average_cost, quantity);
        if let Some(name) = config.get_string(&section, "name") {
            holding = holding.with_name(name.trim());
        }
        portfolio.add_holding(holding)?;
    }

    let tickers = config
        .get_string(WATCHLIST_SECTION, "tickers")
        .unwrap_or_default();
    let tickers = parse_tickers(&tickers).map_err(|e| DashboardError::ConfigInvalid {
        section: WATCHLIST_SECTION.into(),
        key: "tickers".into(),
        reason: e.to_string(),
    })?;
    for ticker in tickers {
        let mut entry = WatchlistEntry::new(&ticker);
        if let Some(tier) = config
            .get_string(TIERS_SECTION, &ticker)
            .filter(|t| !t.trim().is_empty())
        {
            entry = entry.with_tier(tier.trim());
        }
        portfolio.add_watch(entry)?;
    }

    Ok(portfolio)
}

pub fn resolve_data_dir(
    data_dir_override: Option<&Path>,
    config: &DashboardConfig,
) -> Result<PathBuf, DashboardError> {
    data_dir_override
        .map(Path::to_path_buf)
        .or_else(|| config.data_dir.clone())
        .ok_or_else(|| DashboardError::ConfigMissing {
            section: DASHBOARD_SECTION.into(),
            key: "data_dir".into(),
        })
}

/// CSV price source behind the `[dashboard] cache_ttl_secs` cache, for
/// callers that keep one port alive across refreshes.
pub fn cached_price_port(
    data_dir: PathBuf,
    settings: &DashboardConfig,
) -> CachedPriceAdapter<CsvPriceAdapter, SystemClock> {
    CachedPriceAdapter::new(CsvPriceAdapter::new(data_dir), SystemClock, settings.cache_ttl)
}

/// Fetches every tracked ticker and aggregates one refresh.
pub fn refresh_dashboard(
    price_port: &dyn PriceHistoryPort,
    portfolio: &Portfolio,
    lookback_sessions: usize,
) -> Dashboard {
    let tickers = portfolio.tracked_tickers();
    log::info!("fetching {} tickers", tickers.len());
    let histories = price_port.fetch_batch(&tickers, lookback_sessions);
    aggregator::build(portfolio, &histories)
}

fn fmt_pct(fraction: f64) -> String {
    format!("{:+.2}%", fraction * 100.0)
}

fn fmt_diff(diff: f64) -> String {
    if diff == FAR_FROM_SUPPORT {
        "n/a".to_string()
    } else {
        fmt_pct(diff)
    }
}

pub fn render_holdings(view: &HoldingsView) -> String {
    let mut out = String::from("=== Holdings ===\n");
    for (category, rows) in view.by_category() {
        let _ = writeln!(out, "[{}]", category);
        for row in rows {
            let _ = writeln!(
                out,
                "  {:<8} {:>10.2} x {:<12.6} value {:>10.2}  P/L {:>+9.2} ({})  day {}  {:<11} support {}",
                row.ticker,
                row.price,
                row.quantity,
                row.value,
                row.gain,
                fmt_pct(row.pct_return),
                fmt_pct(row.day_change_pct),
                row.signal,
                fmt_diff(row.diff_to_support),
            );
        }
    }
    out
}

pub fn render_watchlist(view: &WatchlistView) -> String {
    let mut out = String::from("=== Watchlist ===\n");
    for row in &view.rows {
        let _ = writeln!(
            out,
            "  {:<8} {:<3} {:>10.2}  {:<11} support {:>8}  upside {:>8}  RSI {:>5.1} ({})",
            row.ticker,
            row.tier,
            row.price,
            row.signal,
            fmt_diff(row.diff_to_support),
            fmt_pct(row.upside),
            row.rsi,
            rsi_zone(row.rsi),
        );
    }
    out
}

pub fn render_totals(totals: &Totals, config: &DashboardConfig) -> String {
    let mut out = String::from("=== Totals ===\n");
    let _ = writeln!(out, "Cash:             {:.2}", totals.cash);
    let _ = writeln!(out, "Invested:         {:.2}", totals.invested_value);
    let _ = writeln!(out, "Total Value:      {:.2}", totals.total_value);
    let _ = writeln!(out, "Total Cost:       {:.2}", totals.total_cost);
    let _ = writeln!(
        out,
        "Total Gain:       {:+.2} ({})",
        totals.total_gain,
        fmt_pct(totals.total_return_pct)
    );
    let _ = writeln!(
        out,
        "Day Change:       {:+.2} ({})",
        totals.total_day_change,
        fmt_pct(totals.total_day_change_pct)
    );
    if let Some(rate) = config.fx_rate {
        let currency = config.fx_currency.as_deref().unwrap_or("FX");
        let _ = writeln!(
            out,
            "Total Value ({}): {:.2}",
            currency,
            totals.in_currency(rate)
        );
    }
    out
}

fn load_validated(config_path: &Path) -> Result<(FileConfigAdapter, DashboardConfig), ExitCode> {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = load_config(config_path)?;
    validate_dashboard_config(&adapter).map_err(report)?;
    let settings = build_dashboard_config(&adapter).map_err(report)?;
    Ok((adapter, settings))
}

pub fn run_dashboard(config_path: &Path, data_dir: Option<&Path>, output: Option<&Path>) -> ExitCode {
    let (adapter, settings) = match load_validated(config_path) {
        Ok(loaded) => loaded,
        Err(code) => return code,
    };

    let portfolio = match build_portfolio(&adapter) {
        Ok(p) => p,
        Err(e) => return report(e),
    };
    let data_dir = match resolve_data_dir(data_dir, &settings) {
        Ok(d) => d,
        Err(e) => return report(e),
    };

    let price_port = CsvPriceAdapter::new(data_dir);
    let dashboard = refresh_dashboard(&price_port, &portfolio, settings.lookback_sessions);

    print!("{}", render_holdings(&dashboard.holdings));
    println!();
    print!("{}", render_watchlist(&dashboard.watchlist));
    println!();
    print!("{}", render_totals(&dashboard.totals, &settings));

    if let Some(dir) = output {
        if let Err(e) = CsvReportAdapter::new().write(&dashboard, dir) {
            return report(e);
        }
        eprintln!("\nReport written to: {}", dir.display());
    }

    ExitCode::SUCCESS
}

pub fn run_signal(config_path: &Path, ticker: &str, data_dir: Option<&Path>) -> ExitCode {
    let (_adapter, settings) = match load_validated(config_path) {
        Ok(loaded) => loaded,
        Err(code) => return code,
    };
    let data_dir = match resolve_data_dir(data_dir, &settings) {
        Ok(d) => d,
        Err(e) => return report(e),
    };

    let ticker = ticker.trim().to_uppercase();
    let source = CsvPriceAdapter::new(data_dir);
    let series = match source.fetch_history(&ticker, settings.lookback_sessions) {
        Ok(s) => s,
        Err(e) => return report(e),
    };
    let bundle = match try_compute_indicators(&series) {
        Ok(b) => b,
        Err(e) => return report(e),
    };
    let signal = classify(&bundle);

    println!("=== {} ({} sessions) ===", ticker, series.len());
    println!("Price:       {:.4}", bundle.price);
    println!(
        "Prev Close:  {:.4} ({})",
        bundle.prev_close,
        fmt_pct(bundle.day_change_pct())
    );
    for (indicator, value) in bundle.labelled() {
        println!("{:<24} {:.4}", indicator.to_string(), value);
    }
    println!("RSI Zone:    {}", rsi_zone(bundle.rsi));
    println!("Signal:      {}", signal.state);
    println!("Support:     {}", fmt_diff(signal.diff_to_support));
    println!("Upside:      {}", fmt_pct(signal.upside));
    ExitCode::SUCCESS
}

pub fn run_validate(config_path: &Path) -> ExitCode {
    let (adapter, settings) = match load_validated(config_path) {
        Ok(loaded) => loaded,
        Err(code) => return code,
    };
    let portfolio = match build_portfolio(&adapter) {
        Ok(p) => p,
        Err(e) => return report(e),
    };

    eprintln!("\nDashboard:");
    eprintln!("  cash_balance:      {:.2}", settings.cash_balance);
    eprintln!("  lookback_sessions: {}", settings.lookback_sessions);
    eprintln!("  cache_ttl_secs:    {}", settings.cache_ttl.num_seconds());
    match &settings.data_dir {
        Some(dir) => eprintln!("  data_dir:          {}", dir.display()),
        None => eprintln!("  data_dir:          (not set)"),
    }

    eprintln!("\nHoldings: {}", portfolio.holdings().len());
    for h in portfolio.holdings() {
        eprintln!(
            "  {:<8} {:<12} {} @ {:.4}",
            h.ticker, h.category, h.quantity, h.average_cost
        );
    }
    eprintln!("\nWatchlist: {}", portfolio.watchlist().len());
    for e in portfolio.watchlist() {
        eprintln!("  {:<8} {}", e.ticker, e.tier);
    }

    eprintln!("\nConfiguration is valid.");
    ExitCode::SUCCESS
}
