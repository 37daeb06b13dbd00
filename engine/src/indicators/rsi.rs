// Relative Strength Index (RSI) indicator implementation
//
// Wilder smoothing: the first average gain/loss is the simple mean of the first
// `period` differences, later ones are (prev * (period - 1) + current) / period.
use super::IndicatorCalculator;
use serde_json::Value;

pub struct Rsi {
    name: String,
    period: usize,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self {
            name: format!("RSI({})", period),
            period,
        }
    }
}

/// RSI from smoothed averages. No losses means 100, no movement at all means 50.
/// Averages that overflowed leave the value undefined unless only the gains did.
fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> Option<f64> {
    if avg_loss == 0.0 {
        return Some(if avg_gain > 0.0 { 100.0 } else { 50.0 });
    }
    if avg_gain.is_infinite() && avg_loss.is_finite() {
        return Some(100.0);
    }
    let rs = avg_gain / avg_loss;
    Some(100.0 - (100.0 / (1.0 + rs))).filter(|v| v.is_finite())
}

impl IndicatorCalculator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn warm_up(&self) -> usize {
        self.period
    }

    fn calculate(&self, closes: &[f64]) -> Vec<Option<f64>> {
        if self.period == 0 || closes.len() <= self.period {
            return vec![None; closes.len()];
        }

        let period = self.period as f64;
        let (gains, losses): (Vec<f64>, Vec<f64>) = closes
            .windows(2)
            .map(|w| {
                let change = w[1] - w[0];
                if change > 0.0 {
                    (change, 0.0)
                } else {
                    (0.0, -change)
                }
            })
            .unzip();

        let mut results = vec![None; self.period];

        let mut avg_gain = gains[..self.period].iter().sum::<f64>() / period;
        let mut avg_loss = losses[..self.period].iter().sum::<f64>() / period;
        results.push(rsi_from_averages(avg_gain, avg_loss));

        for (gain, loss) in gains[self.period..].iter().zip(&losses[self.period..]) {
            avg_gain = (avg_gain * (period - 1.0) + gain) / period;
            avg_loss = (avg_loss * (period - 1.0) + loss) / period;
            results.push(rsi_from_averages(avg_gain, avg_loss));
        }
        results
    }
}
