use shared::models::Signal;

use crate::config::PipelineSettings;

/// Maps oscillator readings to Buy/Sell/Hold, one point at a time.
///
/// Buy strictly below `oversold`, Sell strictly above `overbought`. Readings on a
/// threshold, in between, or undefined are Hold. There is no memory across points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalClassifier {
    oversold: f64,
    overbought: f64,
}

impl SignalClassifier {
    pub fn new(oversold: f64, overbought: f64) -> Self {
        Self {
            oversold,
            overbought,
        }
    }

    pub fn from_settings(settings: &PipelineSettings) -> Self {
        Self::new(settings.oversold, settings.overbought)
    }

    pub fn signal_for(&self, oscillator: Option<f64>) -> Signal {
        match oscillator {
            Some(value) if value < self.oversold => Signal::Buy,
            Some(value) if value > self.overbought => Signal::Sell,
            _ => Signal::Hold,
        }
    }

    pub fn classify(&self, oscillator: &[Option<f64>]) -> Vec<Signal> {
        oscillator.iter().map(|v| self.signal_for(*v)).collect()
    }
}

impl Default for SignalClassifier {
    fn default() -> Self {
        Self::from_settings(&PipelineSettings::default())
    }
}
