// Small numeric helpers shared by the engine and by consumers of the output table.

/// Treats non-finite values the same as missing ones.
pub fn present(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present_filters_non_finite() {
        assert_eq!(present(Some(1.5)), Some(1.5));
        assert_eq!(present(Some(f64::NAN)), None);
        assert_eq!(present(Some(f64::INFINITY)), None);
        assert_eq!(present(None), None);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
    }
}
