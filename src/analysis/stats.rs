use crate::error::AnalysisError;

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample variance (n - 1 denominator); zero for fewer than two values.
pub fn sample_variance(values: &[f64]) -> f64 {
    if values.len() <= 1 {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64
}

pub fn sample_std_dev(values: &[f64]) -> f64 {
    sample_variance(values).sqrt()
}

/// Median of an already sorted slice.
pub fn median_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return 0.0;
    }
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// First and third quartile by sorted position (`n/4`, `3n/4`).
///
/// Below four values the split degenerates, so both quartiles are the median.
pub fn quartiles_sorted(sorted: &[f64]) -> (f64, f64) {
    let n = sorted.len();
    if n < 4 {
        let median = median_sorted(sorted);
        return (median, median);
    }
    (sorted[n / 4], sorted[3 * n / 4])
}

/// Value occurring in more than half of the entries of a sorted slice, if any.
pub fn majority_sorted(sorted: &[f64]) -> Option<f64> {
    let mut start = 0;
    while start < sorted.len() {
        let value = sorted[start];
        let run = sorted[start..].iter().take_while(|v| **v == value).count();
        if run * 2 > sorted.len() {
            return Some(value);
        }
        start += run;
    }
    None
}

/// Autocorrelation at lags `1..=max_lag`, with covariance and variance both
/// normalized by `n`. A constant series yields zeros.
pub fn autocorrelation(values: &[f64], max_lag: usize) -> Vec<f64> {
    let n = values.len();
    let max_lag = max_lag.min(n.saturating_sub(1));
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / n as f64;

    (1..=max_lag)
        .map(|lag| {
            if variance == 0.0 {
                return 0.0;
            }
            let covariance = values
                .iter()
                .zip(&values[lag..])
                .map(|(a, b)| (a - m) * (b - m))
                .sum::<f64>()
                / n as f64;
            covariance / variance
        })
        .collect()
}

pub fn ensure_finite(name: &'static str, value: f64) -> Result<f64, AnalysisError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AnalysisError::NonFinite(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_variance() {
        assert_eq!(sample_variance(&[5.0]), 0.0);
        assert_eq!(sample_variance(&[]), 0.0);
        assert!((sample_variance(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]) - 4.571_428).abs() < 1e-5);
    }

    #[test]
    fn test_median_sorted() {
        assert_eq!(median_sorted(&[1.0, 2.0, 3.0]), 2.0);
        assert_eq!(median_sorted(&[1.0, 2.0, 3.0, 4.0]), 2.5);
    }

    #[test]
    fn test_quartiles_small_inputs_use_median() {
        assert_eq!(quartiles_sorted(&[1.0, 2.0, 3.0]), (2.0, 2.0));
        assert_eq!(quartiles_sorted(&[7.0]), (7.0, 7.0));
    }

    #[test]
    fn test_quartiles_bracket_median() {
        let series: [&[f64]; 4] = [
            &[1.0, 2.0, 3.0, 4.0],
            &[1.0, 2.0, 3.0, 4.0, 100.0],
            &[-3.0, 0.5, 2.0, 8.0, 9.0, 11.0],
            &[1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0, 50.0, 51.0],
        ];
        for sorted in series {
            let (q1, q3) = quartiles_sorted(sorted);
            let median = median_sorted(sorted);
            assert!(q1 <= median && median <= q3, "{:?}", sorted);
        }
    }

    #[test]
    fn test_majority() {
        assert_eq!(majority_sorted(&[1.0, 1.0, 2.0]), Some(1.0));
        assert_eq!(majority_sorted(&[1.0, 2.0, 2.0]), Some(2.0));
        assert_eq!(majority_sorted(&[1.0, 1.0, 2.0, 2.0]), None);
        assert_eq!(majority_sorted(&[1.0, 2.0, 3.0]), None);
        assert_eq!(majority_sorted(&[]), None);
    }

    #[test]
    fn test_autocorrelation_constant_series() {
        assert_eq!(autocorrelation(&[3.0, 3.0, 3.0, 3.0], 5), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_autocorrelation_linear_series() {
        let acf = autocorrelation(&[1.0, 2.0, 3.0, 4.0, 5.0], 5);
        assert_eq!(acf.len(), 4);
        assert!((acf[0] - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_ensure_finite() {
        assert!(ensure_finite("mean", 1.0).is_ok());
        assert!(ensure_finite("mean", f64::INFINITY).is_err());
    }
}
