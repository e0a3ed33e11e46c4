//! Small numeric helpers shared by the rules, classifier and indices

/// Arithmetic mean, `None` for an empty input
pub fn mean<I: IntoIterator<Item = f64>>(values: I) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for v in values {
        sum += v;
        count += 1;
    }
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Population variance
pub fn variance(values: &[f64]) -> Option<f64> {
    let avg = mean(values.iter().copied())?;
    mean(values.iter().map(|v| (v - avg).powi(2)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean([2.0, 4.0]), Some(3.0));
        assert_eq!(mean(std::iter::empty()), None);
        assert_eq!(mean(vec![5.0]), Some(5.0));
    }

    #[test]
    fn test_variance() {
        assert_eq!(variance(&[2.0, 2.0, 2.0]), Some(0.0));
        assert_eq!(variance(&[1.0, 3.0]), Some(1.0));
        assert_eq!(variance(&[]), None);
    }
}
