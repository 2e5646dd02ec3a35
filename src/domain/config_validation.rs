//! Configuration validation.
//!
//! Checks every dashboard field before any price history is fetched.

use crate::domain::error::DashboardError;
use crate::domain::universe::parse_tickers;
use crate::ports::config_port::ConfigPort;

pub const DASHBOARD_SECTION: &str = "dashboard";
pub const WATCHLIST_SECTION: &str = "watchlist";
pub const TIERS_SECTION: &str = "tiers";
pub const HOLDING_SECTION_PREFIX: &str = "holding.";

pub const DEFAULT_LOOKBACK_SESSIONS: i64 = 400;
pub const DEFAULT_CACHE_TTL_SECS: i64 = 60;

pub fn validate_dashboard_config(config: &dyn ConfigPort) -> Result<(), DashboardError> {
    validate_cash_balance(config)?;
    validate_lookback(config)?;
    validate_cache_ttl(config)?;
    validate_fx_rate(config)?;
    validate_holdings(config)?;
    validate_watchlist(config)?;
    Ok(())
}

/// Sections of the form `[holding.TICKER]`, lower-cased as the parser stores them.
pub fn holding_sections(config: &dyn ConfigPort) -> Vec<String> {
    config
        .sections()
        .into_iter()
        .filter(|s| s.starts_with(HOLDING_SECTION_PREFIX))
        .collect()
}

/// Reads an optional number, failing on text that is present but not numeric.
pub fn optional_double(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<Option<f64>, DashboardError> {
    match config.get_string(section, key) {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| DashboardError::ConfigInvalid {
                section: section.to_string(),
                key: key.to_string(),
                reason: format!("{} must be a number, got {:?}", key, s),
            }),
    }
}

fn required_double(config: &dyn ConfigPort, section: &str, key: &str) -> Result<f64, DashboardError> {
    optional_double(config, section, key)?.ok_or_else(|| DashboardError::ConfigMissing {
        section: section.to_string(),
        key: key.to_string(),
    })
}

fn invalid(section: &str, key: &str, reason: &str) -> DashboardError {
    DashboardError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

fn validate_cash_balance(config: &dyn ConfigPort) -> Result<(), DashboardError> {
    let value = optional_double(config, DASHBOARD_SECTION, "cash_balance")?.unwrap_or(0.0);
    if !value.is_finite() || value < 0.0 {
        return Err(invalid(
            DASHBOARD_SECTION,
            "cash_balance",
            "cash_balance must be non-negative",
        ));
    }
    Ok(())
}

fn validate_lookback(config: &dyn ConfigPort) -> Result<(), DashboardError> {
    let value = config.get_int(
        DASHBOARD_SECTION,
        "lookback_sessions",
        DEFAULT_LOOKBACK_SESSIONS,
    );
    if value < 2 {
        return Err(invalid(
            DASHBOARD_SECTION,
            "lookback_sessions",
            "lookback_sessions must be at least 2",
        ));
    }
    Ok(())
}

fn validate_cache_ttl(config: &dyn ConfigPort) -> Result<(), DashboardError> {
    let value = config.get_int(DASHBOARD_SECTION, "cache_ttl_secs", DEFAULT_CACHE_TTL_SECS);
    if value < 0 {
        return Err(invalid(
            DASHBOARD_SECTION,
            "cache_ttl_secs",
            "cache_ttl_secs must be non-negative",
        ));
    }
    Ok(())
}

fn validate_fx_rate(config: &dyn ConfigPort) -> Result<(), DashboardError> {
    match optional_double(config, DASHBOARD_SECTION, "fx_rate")? {
        Some(rate) if !rate.is_finite() || rate <= 0.0 => Err(invalid(
            DASHBOARD_SECTION,
            "fx_rate",
            "fx_rate must be positive",
        )),
        _ => Ok(()),
    }
}

fn validate_holdings(config: &dyn ConfigPort) -> Result<(), DashboardError> {
    for section in holding_sections(config) {
        if section.len() == HOLDING_SECTION_PREFIX.len() {
            return Err(invalid(&section, "ticker", "holding section needs a ticker"));
        }

        let quantity = required_double(config, &section, "quantity")?;
        if !quantity.is_finite() || quantity <= 0.0 {
            return Err(invalid(&section, "quantity", "quantity must be positive"));
        }

        let average_cost = required_double(config, &section, "avg_cost")?;
        if !average_cost.is_finite() || average_cost < 0.0 {
            return Err(invalid(
                &section,
                "avg_cost",
                "avg_cost must be non-negative",
            ));
        }
    }
    Ok(())
}

fn validate_watchlist(config: &dyn ConfigPort) -> Result<(), DashboardError> {
    if let Some(tickers) = config.get_string(WATCHLIST_SECTION, "tickers") {
        parse_tickers(&tickers)
            .map_err(|e| invalid(WATCHLIST_SECTION, "tickers", &e.to_string()))?;
    }
    Ok(())
}
