// MACD histogram: (fast EMA - slow EMA) minus its own EMA.
use super::ema::ema_series;
use super::IndicatorCalculator;
use serde_json::Value;

pub struct MacdDiff {
    name: String,
    fast: usize,
    slow: usize,
    signal: usize,
}

impl MacdDiff {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Self {
        Self {
            name: format!("MACD_DIFF({},{},{})", fast, slow, signal),
            fast,
            slow,
            signal,
        }
    }
}

impl IndicatorCalculator for MacdDiff {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "fast": self.fast, "slow": self.slow, "signal": self.signal })
    }

    // The MACD line starts with the slower EMA, the signal line needs `signal` of those.
    fn warm_up(&self) -> usize {
        (self.fast.max(self.slow) + self.signal).saturating_sub(2)
    }

    fn calculate(&self, closes: &[f64]) -> Vec<Option<f64>> {
        if self.fast == 0 || self.slow == 0 || self.signal == 0 {
            return vec![None; closes.len()];
        }

        let fast_ema = ema_series(closes, self.fast);
        let slow_ema = ema_series(closes, self.slow);
        let macd_line: Vec<Option<f64>> = fast_ema
            .iter()
            .zip(&slow_ema)
            .map(|(f, s)| Some((*f)? - (*s)?))
            .collect();

        let Some(start) = macd_line.iter().position(Option::is_some) else {
            return vec![None; closes.len()];
        };
        let defined: Vec<f64> = macd_line[start..].iter().flatten().copied().collect();
        let signal_line = ema_series(&defined, self.signal);

        let mut results = vec![None; start];
        results.extend(
            defined
                .iter()
                .zip(signal_line)
                .map(|(macd, signal)| signal.map(|s| macd - s)),
        );
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macd_warm_up_is_33_for_default_spans() {
        let macd = MacdDiff::new(12, 26, 9);
        assert_eq!(macd.warm_up(), 33);

        let closes: Vec<f64> = (0..60).map(|i| 100.0 + (i as f64 * 0.3).cos() * 4.0).collect();
        let results = macd.calculate(&closes);
        assert_eq!(results.len(), 60);
        assert!(results[..33].iter().all(Option::is_none));
        assert!(results[33..].iter().all(Option::is_some));
    }

    #[test]
    fn test_macd_insufficient_data() {
        let macd = MacdDiff::new(12, 26, 9);
        assert_eq!(macd.calculate(&[1.0; 10]), vec![None; 10]);
        // Slow EMA is defined but the signal line is not yet.
        assert_eq!(macd.calculate(&[1.0; 33]), vec![None; 33]);
        assert!(macd.calculate(&[1.0; 34])[33].is_some());
    }

    #[test]
    fn test_macd_flat_prices() {
        let results = MacdDiff::new(12, 26, 9).calculate(&[100.0; 50]);
        assert!(results[33..].iter().all(|v| *v == Some(0.0)));
    }

    #[test]
    fn test_macd_small_spans_by_hand() {
        // fast 2, slow 3, signal 2 over 1..=6
        // fast EMA: -, 1.5, 2.5, 3.5, 4.5, 5.5  slow EMA: -, -, 2, 3, 4, 5
        // MACD: -, -, 0.5, 0.5, 0.5, 0.5  signal(2): -, -, -, 0.5, 0.5, 0.5
        let results = MacdDiff::new(2, 3, 2).calculate(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert!(results[..3].iter().all(Option::is_none));
        for value in &results[3..] {
            assert!(value.unwrap().abs() < 1e-12);
        }
    }

    #[test]
    fn test_macd_rising_trend_turns_positive() {
        let mut closes = vec![100.0; 40];
        closes.extend((1..=10).map(|i| 100.0 + i as f64 * 2.0));
        let results = MacdDiff::new(12, 26, 9).calculate(&closes);
        assert!(results[45].unwrap() > 0.0);
    }
}
