//! CSV file price history adapter.
//!
//! One file per ticker, `<base>/<TICKER>.csv`, with a header row. Columns are
//! located by name so exports with extra OHLCV columns load unchanged.

use crate::domain::error::DashboardError;
use crate::domain::price_series::{PricePoint, PriceSeries};
use crate::ports::price_port::PriceHistoryPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

const DATE_COLUMNS: [&str; 2] = ["date", "timestamp"];
const CLOSE_COLUMNS: [&str; 3] = ["adj_close", "adj close", "close"];

pub struct CsvPriceAdapter {
    base_path: PathBuf,
}

impl CsvPriceAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, ticker: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", ticker))
    }
}

fn find_column(headers: &csv::StringRecord, candidates: &[&str]) -> Option<usize> {
    candidates.iter().find_map(|wanted| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(wanted))
    })
}

impl PriceHistoryPort for CsvPriceAdapter {
    fn fetch_history(
        &self,
        ticker: &str,
        lookback_sessions: usize,
    ) -> Result<PriceSeries, DashboardError> {
        let source_err = |reason: String| DashboardError::DataSource {
            ticker: ticker.to_string(),
            reason,
        };

        let path = self.csv_path(ticker);
        let content = fs::read_to_string(&path)
            .map_err(|e| source_err(format!("failed to read {}: {}", path.display(), e)))?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let headers = rdr
            .headers()
            .map_err(|e| source_err(format!("CSV header error: {}", e)))?
            .clone();
        let date_idx = find_column(&headers, &DATE_COLUMNS)
            .ok_or_else(|| source_err("missing date column".into()))?;
        let close_idx = find_column(&headers, &CLOSE_COLUMNS)
            .ok_or_else(|| source_err("missing close column".into()))?;

        let mut points = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| source_err(format!("CSV parse error: {}", e)))?;

            let date_str = record
                .get(date_idx)
                .ok_or_else(|| source_err("missing date value".into()))?;
            // Timestamps such as "2025-01-02 00:00:00-05:00" keep their date part.
            let date_part = date_str.trim().get(..10).unwrap_or(date_str);
            let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
                .map_err(|e| source_err(format!("invalid date {:?}: {}", date_str, e)))?;

            let close_str = record.get(close_idx).unwrap_or("").trim();
            if close_str.is_empty() {
                log::debug!("{}: no close on {}, skipping row", ticker, date);
                continue;
            }
            let close: f64 = close_str
                .parse()
                .map_err(|e| source_err(format!("invalid close value {:?}: {}", close_str, e)))?;

            points.push(PricePoint::new(date, close));
        }

        if points.is_empty() {
            return Err(DashboardError::NoData {
                ticker: ticker.to_string(),
            });
        }

        let series = PriceSeries::from_unsorted(ticker, points).tail(lookback_sessions);
        log::debug!("{}: loaded {} sessions from {}", ticker, series.len(), path.display());
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test_data() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().to_path_buf();

        let csv_content = "date,open,high,low,close,volume\n\
            2024-01-17,110.0,120.0,105.0,115.0,55000\n\
            2024-01-15,100.0,110.0,90.0,105.0,50000\n\
            2024-01-16,105.0,115.0,100.0,110.0,60000\n";

        fs::write(path.join("AMZN.csv"), csv_content).unwrap();
        fs::write(path.join("EMPTY.csv"), "date,close\n").unwrap();
        fs::write(
            path.join("YF.csv"),
            "Date,Open,High,Low,Close,Adj Close,Volume\n\
             2024-01-15 00:00:00-05:00,1,1,1,10.0,9.5,100\n\
             2024-01-16 00:00:00-05:00,1,1,1,11.0,,100\n\
             2024-01-17 00:00:00-05:00,1,1,1,12.0,11.5,100\n",
        )
        .unwrap();
        fs::write(path.join("BAD.csv"), "date,close\n2024-01-15,abc\n").unwrap();
        fs::write(path.join("NOCLOSE.csv"), "date,open\n2024-01-15,1.0\n").unwrap();

        (dir, path)
    }

    #[test]
    fn fetch_history_sorted_by_date() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvPriceAdapter::new(path);

        let series = adapter.fetch_history("AMZN", 400).unwrap();

        assert_eq!(series.ticker(), "AMZN");
        assert_eq!(series.closes(), vec![105.0, 110.0, 115.0]);
    }

    #[test]
    fn fetch_history_limits_lookback() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvPriceAdapter::new(path);

        let series = adapter.fetch_history("AMZN", 2).unwrap();
        assert_eq!(series.closes(), vec![110.0, 115.0]);
    }

    #[test]
    fn fetch_history_prefers_adjusted_close_and_skips_blanks() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvPriceAdapter::new(path);

        let series = adapter.fetch_history("YF", 400).unwrap();
        assert_eq!(series.closes(), vec![9.5, 11.5]);
    }

    #[test]
    fn fetch_history_missing_file() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvPriceAdapter::new(path);

        let result = adapter.fetch_history("XYZ", 400);
        assert!(matches!(result, Err(DashboardError::DataSource { .. })));
    }

    #[test]
    fn fetch_history_empty_file_is_no_data() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvPriceAdapter::new(path);

        let result = adapter.fetch_history("EMPTY", 400);
        assert!(matches!(result, Err(DashboardError::NoData { .. })));
    }

    #[test]
    fn fetch_history_bad_values() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvPriceAdapter::new(path);

        assert!(adapter.fetch_history("BAD", 400).is_err());
        assert!(adapter.fetch_history("NOCLOSE", 400).is_err());
    }

    #[test]
    fn fetch_batch_drops_failures() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvPriceAdapter::new(path);

        let tickers = vec!["AMZN".to_string(), "XYZ".to_string(), "YF".to_string()];
        let histories = adapter.fetch_batch(&tickers, 400);

        assert_eq!(histories.len(), 2);
        assert!(histories.contains_key("AMZN"));
        assert!(histories.contains_key("YF"));
        assert!(!histories.contains_key("XYZ"));
    }
}
