// Validates a raw provider table and drops rows that cannot be used downstream.
use shared::models::{Candle, PriceField, PriceSeries, RawSeries};
use shared::utils::present;

use crate::error::EngineError;

pub struct SeriesSanitizer;

impl SeriesSanitizer {
    /// Removes rows without a usable close price, keeping order and every other field.
    ///
    /// Checks run in order: empty input, missing close column, nothing left after
    /// dropping, then timestamp ordering of the surviving rows.
    pub fn sanitize(raw: &RawSeries) -> Result<PriceSeries, EngineError> {
        if raw.is_empty() {
            return Err(EngineError::EmptySeries);
        }
        if !raw.has_column(PriceField::Close) {
            return Err(EngineError::MissingField(PriceField::Close));
        }

        let candles: Vec<Candle> = raw
            .rows
            .iter()
            .filter_map(|row| {
                row.close_value().map(|close| Candle {
                    timestamp: row.timestamp,
                    open: present(row.open),
                    high: present(row.high),
                    low: present(row.low),
                    close,
                    volume: present(row.volume),
                })
            })
            .collect();

        if candles.is_empty() {
            return Err(EngineError::AllValuesMissing);
        }

        if let Some(index) = candles
            .windows(2)
            .position(|w| w[1].timestamp <= w[0].timestamp)
        {
            return Err(EngineError::UnorderedTimestamps { index: index + 1 });
        }

        let dropped = raw.len() - candles.len();
        if dropped > 0 {
            tracing::warn!(symbol = %raw.symbol, dropped, kept = candles.len(), "Dropped rows with missing close");
        } else {
            tracing::debug!(symbol = %raw.symbol, rows = candles.len(), "Series passed sanitization unchanged");
        }

        Ok(PriceSeries {
            symbol: raw.symbol.clone(),
            candles,
        })
    }
}
