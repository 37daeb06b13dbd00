// Runs the configured indicator strategies over the close column of a sanitized series.
use shared::models::{IndicatorInfo, PriceSeries};

use super::{IndicatorCalculator, MacdDiff, Rsi, Sma};
use crate::config::PipelineSettings;
use crate::error::EngineError;

/// Fewest prices any indicator can work with; below this the series is rejected.
pub const MIN_HISTORY: usize = 2;

/// Indicator columns, each aligned with the candles of the input series.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSet {
    pub sma: Vec<Option<f64>>,
    pub rsi: Vec<Option<f64>>,
    pub macd_diff: Vec<Option<f64>>,
}

pub struct IndicatorEngine {
    sma: Box<dyn IndicatorCalculator>,
    rsi: Box<dyn IndicatorCalculator>,
    macd_diff: Box<dyn IndicatorCalculator>,
}

impl IndicatorEngine {
    pub fn new(settings: &PipelineSettings) -> Self {
        Self::with_calculators(
            Box::new(Sma::new(settings.sma_period)),
            Box::new(Rsi::new(settings.rsi_period)),
            Box::new(MacdDiff::new(
                settings.macd_fast,
                settings.macd_slow,
                settings.macd_signal,
            )),
        )
    }

    /// Builds an engine from arbitrary strategies for the three indicator slots.
    pub fn with_calculators(
        sma: Box<dyn IndicatorCalculator>,
        rsi: Box<dyn IndicatorCalculator>,
        macd_diff: Box<dyn IndicatorCalculator>,
    ) -> Self {
        Self { sma, rsi, macd_diff }
    }

    pub fn describe(&self) -> Vec<IndicatorInfo> {
        vec![self.sma.info(), self.rsi.info(), self.macd_diff.info()]
    }

    pub fn compute(&self, series: &PriceSeries) -> Result<IndicatorSet, EngineError> {
        if series.len() < MIN_HISTORY {
            return Err(EngineError::InsufficientHistory {
                required: MIN_HISTORY,
                actual: series.len(),
            });
        }

        let closes = series.closes();
        let set = IndicatorSet {
            sma: self.sma.calculate(&closes),
            rsi: self.rsi.calculate(&closes),
            macd_diff: self.macd_diff.calculate(&closes),
        };

        tracing::debug!(
            symbol = %series.symbol,
            points = closes.len(),
            sma_warm_up = self.sma.warm_up(),
            rsi_warm_up = self.rsi.warm_up(),
            macd_warm_up = self.macd_diff.warm_up(),
            sma_defined = defined_count(&set.sma),
            rsi_defined = defined_count(&set.rsi),
            macd_defined = defined_count(&set.macd_diff),
            "Computed indicators"
        );
        Ok(set)
    }
}

impl Default for IndicatorEngine {
    fn default() -> Self {
        Self::new(&PipelineSettings::default())
    }
}

fn defined_count(values: &[Option<f64>]) -> usize {
    values.iter().filter(|v| v.is_some()).count()
}
