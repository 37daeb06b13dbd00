// Technical indicators module
pub mod ema;
pub mod engine;
pub mod macd;
pub mod rsi;
pub mod sma;

pub use engine::{IndicatorEngine, IndicatorSet, MIN_HISTORY};
pub use macd::MacdDiff;
pub use rsi::Rsi;
pub use sma::Sma;

use serde_json::Value;
use shared::models::IndicatorInfo;

/// Computes a numeric series from a close-price sequence.
///
/// The result is aligned one-to-one with the input; `None` marks positions where the
/// indicator does not have enough history yet.
pub trait IndicatorCalculator: Send + Sync {
    fn name(&self) -> &str;
    fn parameters(&self) -> Value;
    /// Number of leading positions that are always `None`.
    fn warm_up(&self) -> usize;
    fn calculate(&self, closes: &[f64]) -> Vec<Option<f64>>;

    fn info(&self) -> IndicatorInfo {
        IndicatorInfo {
            name: self.name().to_string(),
            parameters: self.parameters(),
            warm_up: self.warm_up(),
        }
    }
}
