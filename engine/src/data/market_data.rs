// Where raw price series come from. The pipeline only ever sees the `RawSeries` a source returns.
use std::path::PathBuf;

use shared::models::{LookbackPeriod, RawSeries};

use super::csv_parser::OhlcCsvParser;
use crate::error::EngineError;

/// Resolves a symbol and a lookback period into a raw price table.
pub trait MarketDataSource: Send + Sync {
    fn fetch(&self, symbol: &str, period: LookbackPeriod) -> Result<RawSeries, EngineError>;
}

/// Serves a single CSV export, trimmed to the requested period.
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CsvFileSource { path: path.into() }
    }
}

impl MarketDataSource for CsvFileSource {
    fn fetch(&self, symbol: &str, period: LookbackPeriod) -> Result<RawSeries, EngineError> {
        let series = OhlcCsvParser::load_series(&self.path, symbol)?;
        let trimmed = series.trim_to_period(period);
        tracing::debug!(
            symbol = %symbol,
            %period,
            loaded = series.len(),
            kept = trimmed.len(),
            "Trimmed series to lookback period"
        );
        Ok(trimmed)
    }
}
