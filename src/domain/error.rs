//! Domain error types.

use crate::domain::portfolio::PortfolioError;

/// Top-level error type for buyzone.
///
/// None of these escape the aggregator: per-ticker data problems degrade to
/// the zero-sentinel bundle. They surface at the adapter and CLI layers.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("price source error for {ticker}: {reason}")]
    DataSource { ticker: String, reason: String },

    #[error("no price history for {ticker}")]
    NoData { ticker: String },

    #[error("price history for {ticker} is not in strictly increasing date order at {date}")]
    UnorderedSeries { ticker: String, date: chrono::NaiveDate },

    #[error("malformed price history for {ticker}: {reason}")]
    MalformedSeries { ticker: String, reason: String },

    #[error(transparent)]
    Portfolio(#[from] PortfolioError),

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&DashboardError> for std::process::ExitCode {
    fn from(err: &DashboardError) -> Self {
        let code: u8 = match err {
            DashboardError::Io(_) | DashboardError::Report { .. } => 1,
            DashboardError::ConfigParse { .. }
            | DashboardError::ConfigMissing { .. }
            | DashboardError::ConfigInvalid { .. } => 2,
            DashboardError::DataSource { .. } => 3,
            DashboardError::Portfolio(_) => 4,
            DashboardError::NoData { .. }
            | DashboardError::UnorderedSeries { .. }
            | DashboardError::MalformedSeries { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn display_config_missing() {
        let err = DashboardError::ConfigMissing {
            section: "dashboard".into(),
            key: "data_dir".into(),
        };
        assert_eq!(err.to_string(), "missing config key [dashboard] data_dir");
    }

    #[test]
    fn display_unordered_series() {
        let err = DashboardError::UnorderedSeries {
            ticker: "NVDA".into(),
            date: NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "price history for NVDA is not in strictly increasing date order at 2025-03-04"
        );
    }

    #[test]
    fn portfolio_error_is_transparent() {
        let err: DashboardError = PortfolioError::UnknownTicker("KO".into()).into();
        assert_eq!(err.to_string(), "unknown ticker: KO");
    }

    #[test]
    fn exit_codes_by_category() {
        use std::process::ExitCode;

        let config = DashboardError::ConfigInvalid {
            section: "dashboard".into(),
            key: "cash_balance".into(),
            reason: "negative".into(),
        };
        assert_eq!(ExitCode::from(&config), ExitCode::from(2));

        let data = DashboardError::NoData {
            ticker: "AAPL".into(),
        };
        assert_eq!(ExitCode::from(&data), ExitCode::from(5));

        let source = DashboardError::DataSource {
            ticker: "AAPL".into(),
            reason: "timeout".into(),
        };
        assert_eq!(ExitCode::from(&source), ExitCode::from(3));
    }
}
