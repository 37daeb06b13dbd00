// sanitize -> indicators -> signals -> one output table
pub mod export;

use shared::models::{LookbackPeriod, OutputRow, OutputTable, RawSeries};

use crate::config::PipelineSettings;
use crate::data::{MarketDataSource, SeriesSanitizer};
use crate::error::EngineError;
use crate::indicators::IndicatorEngine;
use crate::signals::SignalClassifier;

pub struct PipelineOrchestrator {
    engine: IndicatorEngine,
    classifier: SignalClassifier,
}

impl PipelineOrchestrator {
    /// Builds the pipeline from `settings`, rejecting settings that fail validation.
    pub fn new(settings: &PipelineSettings) -> Result<Self, EngineError> {
        settings.validate()?;
        Ok(Self::with_components(
            IndicatorEngine::new(settings),
            SignalClassifier::from_settings(settings),
        ))
    }

    pub fn with_components(engine: IndicatorEngine, classifier: SignalClassifier) -> Self {
        PipelineOrchestrator { engine, classifier }
    }

    /// Runs every stage over `raw`. The first failing stage aborts the run and its
    /// error is returned unchanged; no partial table is produced.
    pub fn run(&self, raw: &RawSeries) -> Result<OutputTable, EngineError> {
        tracing::info!(symbol = %raw.symbol, rows = raw.len(), "Running indicator pipeline");

        let series = SeriesSanitizer::sanitize(raw).map_err(|e| stage_failed("sanitize", e))?;
        let indicators = self.engine.compute(&series).map_err(|e| stage_failed("indicators", e))?;
        let signals = self.classifier.classify(&indicators.rsi);

        let rows: Vec<OutputRow> = series
            .candles
            .iter()
            .zip(signals)
            .enumerate()
            .map(|(i, (candle, signal))| OutputRow {
                timestamp: candle.timestamp,
                open: candle.open,
                high: candle.high,
                low: candle.low,
                close: candle.close,
                sma: indicators.sma.get(i).copied().flatten(),
                rsi: indicators.rsi.get(i).copied().flatten(),
                macd_diff: indicators.macd_diff.get(i).copied().flatten(),
                signal,
            })
            .collect();

        let table = OutputTable {
            symbol: series.symbol,
            indicators: self.engine.describe(),
            rows,
        };
        tracing::info!(
            symbol = %table.symbol,
            rows = table.len(),
            buys = table.buy_markers().len(),
            sells = table.sell_markers().len(),
            "Pipeline finished"
        );
        Ok(table)
    }

    /// Fetches the series from `source` and runs the pipeline over it.
    pub fn run_source(
        &self,
        source: &dyn MarketDataSource,
        symbol: &str,
        period: LookbackPeriod,
    ) -> Result<OutputTable, EngineError> {
        let raw = source.fetch(symbol, period)?;
        self.run(&raw)
    }
}

fn stage_failed(stage: &str, err: EngineError) -> EngineError {
    tracing::debug!(stage, kind = err.kind(), "Pipeline stage failed");
    err
}

impl Default for PipelineOrchestrator {
    fn default() -> Self {
        Self::with_components(IndicatorEngine::default(), SignalClassifier::default())
    }
}
