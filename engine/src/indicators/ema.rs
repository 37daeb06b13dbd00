// Exponential Moving Average (EMA), the building block of the MACD histogram

/// EMA with multiplier `2 / (period + 1)`, seeded with the SMA of the first `period` values.
/// The first defined value sits at index `period - 1`.
pub fn ema_series(values: &[f64], period: usize) -> Vec<Option<f64>> {
    if period == 0 || values.len() < period {
        return vec![None; values.len()];
    }

    let mut results = vec![None; period - 1];
    let multiplier = 2.0 / (period as f64 + 1.0);

    let initial_sum: f64 = values[..period].iter().sum();
    let mut previous_ema = initial_sum / period as f64;
    results.push(Some(previous_ema));

    for value in &values[period..] {
        let ema = (value - previous_ema) * multiplier + previous_ema;
        results.push(Some(ema));
        previous_ema = ema;
    }
    results
}
