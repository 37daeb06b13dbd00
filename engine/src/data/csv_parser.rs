use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use shared::models::{PriceField, RawCandle, RawSeries};

use crate::error::EngineError;

// Cell formats of provider exports: ISO dates and plain decimals, with several spellings of "no value".
pub mod provider_format {
    use anyhow::{anyhow, Result};
    use chrono::NaiveDate;

    const MISSING_TOKENS: [&str; 5] = ["", "null", "nan", "na", "n/a"];

    /// Parses a price cell. Empty cells and missing-value tokens give `None`.
    pub fn parse_value(s: &str) -> Result<Option<f64>> {
        let trimmed = s.trim();
        if MISSING_TOKENS.contains(&trimmed.to_lowercase().as_str()) {
            return Ok(None);
        }
        let value: f64 = trimmed
            .parse()
            .map_err(|e| anyhow!("Failed to parse decimal '{}': {}", s, e))?;
        Ok(Some(value).filter(|v| v.is_finite()))
    }

    /// Parses "YYYY-MM-DD", ignoring any time-of-day suffix.
    pub fn parse_date(s: &str) -> Result<NaiveDate> {
        let trimmed = s.trim();
        let date_part = trimmed.get(..10).unwrap_or(trimmed);
        NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
            .map_err(|e| anyhow!("Failed to parse date '{}': {}", s, e))
    }

}

/// Reader for daily OHLC exports (`Date,Open,High,Low,Close[,Adj Close][,Volume]`).
///
/// Price columns that the header does not carry are left out of the series schema
/// rather than rejected; the sanitizer decides whether that is fatal.
pub struct OhlcCsvParser;

impl OhlcCsvParser {
    pub fn load_series(file_path: impl AsRef<Path>, symbol: &str) -> Result<RawSeries, EngineError> {
        let file_path = file_path.as_ref();
        let file = File::open(file_path)?;
        let series = Self::parse_series(BufReader::new(file), symbol)?;
        tracing::info!(
            symbol = %symbol,
            path = %file_path.display(),
            rows = series.len(),
            "Loaded price series from CSV"
        );
        Ok(series)
    }

    pub fn parse_series<R: Read>(reader: R, symbol: &str) -> Result<RawSeries, EngineError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let date_pos = Self::column_position(&headers, "Date")
            .or_else(|| Self::column_position(&headers, "Datetime"))
            .ok_or_else(|| EngineError::CsvDataFormatError("Missing 'Date' column".to_string()))?;

        let positions: Vec<(PriceField, usize)> = PriceField::ALL
            .into_iter()
            .filter_map(|field| Self::column_position(&headers, field.column_name()).map(|pos| (field, pos)))
            .collect();
        let columns = positions.iter().map(|(field, _)| *field).collect();

        let mut rows = Vec::new();
        for (idx, result) in rdr.records().enumerate() {
            let record = result?;
            let line = idx + 2;

            let date_str = record.get(date_pos).unwrap_or_default();
            let timestamp = provider_format::parse_date(date_str)
                .map_err(|e| EngineError::CsvDataFormatError(format!("Error parsing 'Date' at line {}: {}", line, e)))?;

            let mut candle = RawCandle {
                timestamp,
                open: None,
                high: None,
                low: None,
                close: None,
                volume: None,
            };
            for (field, pos) in &positions {
                let value = provider_format::parse_value(record.get(*pos).unwrap_or_default()).map_err(|e| {
                    EngineError::CsvDataFormatError(format!("Error parsing '{}' at line {}: {}", field, line, e))
                })?;
                match field {
                    PriceField::Open => candle.open = value,
                    PriceField::High => candle.high = value,
                    PriceField::Low => candle.low = value,
                    PriceField::Close => candle.close = value,
                    PriceField::Volume => candle.volume = value,
                }
            }
            rows.push(candle);
        }

        Ok(RawSeries::with_columns(symbol, columns, rows))
    }

    // Header lookup ignores case and surrounding whitespace.
    fn column_position(headers: &StringRecord, name: &str) -> Option<usize> {
        headers
            .iter()
            .position(|header| header.trim().eq_ignore_ascii_case(name))
    }
}
