// Simple Moving Average (SMA) indicator implementation
use super::IndicatorCalculator;
use serde_json::Value;
use shared::utils::mean;

pub struct Sma {
    name: String,
    period: usize,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        Self {
            name: format!("SMA({})", period),
            period,
        }
    }
}

impl IndicatorCalculator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn warm_up(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn calculate(&self, closes: &[f64]) -> Vec<Option<f64>> {
        if self.period == 0 || closes.len() < self.period {
            return vec![None; closes.len()];
        }

        // Every window is summed from its own slice.
        let mut results = vec![None; self.period - 1];
        results.extend((self.period - 1..closes.len()).map(|i| mean(&closes[i + 1 - self.period..=i])));
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Option<f64>, b: f64) {
        let a = a.expect("value should be defined");
        assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
    }

    #[test]
    fn test_sma_calculation() {
        let results = Sma::new(3).calculate(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(results[0], None);
        assert_eq!(results[1], None);
        assert_close(results[2], 2.0);
        assert_close(results[3], 3.0);
        assert_close(results[4], 4.0);
    }

    #[test]
    fn test_sma_insufficient_data() {
        assert_eq!(Sma::new(3).calculate(&[1.0, 2.0]), vec![None, None]);
    }

    #[test]
    fn test_sma_period_one() {
        assert_eq!(
            Sma::new(1).calculate(&[1.0, 2.0, 3.0]),
            vec![Some(1.0), Some(2.0), Some(3.0)]
        );
    }

    #[test]
    fn test_sma_empty_data() {
        assert!(Sma::new(3).calculate(&[]).is_empty());
    }

    #[test]
    fn test_sma_period_zero_is_undefined() {
        assert_eq!(Sma::new(0).calculate(&[1.0, 2.0]), vec![None, None]);
    }

    #[test]
    fn test_sma_large_value_leaving_window_does_not_leak() {
        let mut closes = vec![1e17];
        closes.extend([1.0; 20]);
        let results = Sma::new(20).calculate(&closes);
        assert_eq!(results[20], Some(1.0));
    }

    #[test]
    fn test_sma_20_defined_count_and_last_value() {
        let closes: Vec<f64> = (0..45).map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0).collect();
        let results = Sma::new(20).calculate(&closes);
        assert_eq!(results.len(), 45);
        assert_eq!(results.iter().filter(|v| v.is_some()).count(), 45 - 19);
        assert!(results[..19].iter().all(Option::is_none));
        let expected = closes[25..].iter().sum::<f64>() / 20.0;
        assert_eq!(results[44], Some(expected));
    }
}
