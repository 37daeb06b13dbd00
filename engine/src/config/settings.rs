// Pipeline settings, loaded from an optional JSON file. Missing fields fall back to the defaults.
use std::path::Path;

use serde::Deserialize;

use crate::error::EngineError;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PipelineSettings {
    pub sma_period: usize,
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub oversold: f64,
    pub overbought: f64,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        PipelineSettings {
            sma_period: 20,
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            oversold: 30.0,
            overbought: 70.0,
        }
    }
}

impl PipelineSettings {
    pub fn from_json_str(json: &str) -> Result<Self, EngineError> {
        let settings: PipelineSettings = serde_json::from_str(json)
            .map_err(|e| EngineError::ConfigError(format!("Invalid settings JSON: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "Loaded pipeline settings file");
        Self::from_json_str(&contents)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        let periods = [
            ("sma_period", self.sma_period),
            ("rsi_period", self.rsi_period),
            ("macd_fast", self.macd_fast),
            ("macd_slow", self.macd_slow),
            ("macd_signal", self.macd_signal),
        ];
        if let Some((name, _)) = periods.iter().find(|(_, p)| *p == 0) {
            return Err(EngineError::ConfigError(format!("{} must be greater than 0", name)));
        }
        if self.macd_fast >= self.macd_slow {
            return Err(EngineError::ConfigError(format!(
                "macd_fast ({}) must be less than macd_slow ({})",
                self.macd_fast, self.macd_slow
            )));
        }
        let thresholds_valid = (0.0..=100.0).contains(&self.oversold)
            && (0.0..=100.0).contains(&self.overbought)
            && self.oversold < self.overbought;
        if !thresholds_valid {
            return Err(EngineError::ConfigError(format!(
                "thresholds must satisfy 0 <= oversold ({}) < overbought ({}) <= 100",
                self.oversold, self.overbought
            )));
        }
        Ok(())
    }
}
