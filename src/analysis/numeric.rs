use serde_json::Value;

use super::result::{AnalysisResult, ResultBuilder, round4};
use super::stats;
use super::Analyzer;
use crate::error::AnalysisError;

pub const INVALID_NUMERIC: &str = "Invalid numeric data";
pub const NO_NUMERIC: &str = "No valid numeric data found";
pub const OUTLIERS_DETECTED: &str = "Outliers detected";

#[derive(Debug, Clone, PartialEq)]
pub struct NumericSummary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub mode: Option<f64>,
    pub std_dev: f64,
    pub variance: f64,
    pub min: f64,
    pub max: f64,
    pub q1: f64,
    pub q3: f64,
    pub outliers: Vec<f64>,
}

impl NumericSummary {
    pub fn compute(values: &[f64], iqr_multiplier: f64) -> Result<Self, AnalysisError> {
        if values.is_empty() {
            return Err(AnalysisError::Empty);
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let mean = stats::ensure_finite("mean", stats::mean(values))?;
        let variance = stats::ensure_finite("variance", stats::sample_variance(values))?;
        let (q1, q3) = stats::quartiles_sorted(&sorted);
        let iqr = stats::ensure_finite("iqr", q3 - q1)?;
        let lower = q1 - iqr_multiplier * iqr;
        let upper = q3 + iqr_multiplier * iqr;

        Ok(NumericSummary {
            count: values.len(),
            mean,
            median: stats::median_sorted(&sorted),
            mode: stats::majority_sorted(&sorted),
            std_dev: variance.sqrt(),
            variance,
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            q1,
            q3,
            outliers: values
                .iter()
                .copied()
                .filter(|v| *v < lower || *v > upper)
                .collect(),
        })
    }

    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    pub fn data_quality_score(&self) -> f64 {
        1.0 - self.outliers.len() as f64 / self.count as f64
    }

    pub fn variability_coefficient(&self) -> f64 {
        if self.mean == 0.0 {
            0.0
        } else {
            self.std_dev / self.mean
        }
    }
}

impl Analyzer {
    /// Analyzes a JSON array, skipping entries that are not finite numbers.
    pub fn analyze_numeric(&self, input: &Value) -> AnalysisResult {
        let Value::Array(items) = input else {
            return AnalysisResult::failure(INVALID_NUMERIC, numeric_hints());
        };
        let values: Vec<f64> = items.iter().filter_map(Value::as_f64).collect();
        self.analyze_numbers(&values)
    }

    pub fn analyze_numbers(&self, values: &[f64]) -> AnalysisResult {
        let values: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if values.is_empty() {
            return AnalysisResult::failure(NO_NUMERIC, numeric_hints());
        }

        let mut builder = ResultBuilder::start();
        let summary = match NumericSummary::compute(&values, self.config.iqr_multiplier) {
            Ok(summary) => summary,
            Err(err) => {
                tracing::warn!("Numeric analysis failed: {}", err);
                return builder.fail(format!("Analysis error: {}", err));
            }
        };

        let outliers: Vec<f64> = summary.outliers.iter().map(|v| round4(*v)).collect();
        builder
            .data("count", summary.count)
            .data("mean", round4(summary.mean))
            .data("median", round4(summary.median))
            .data("mode", summary.mode.map(round4))
            .data("std_dev", round4(summary.std_dev))
            .data("variance", round4(summary.variance))
            .data("min", round4(summary.min))
            .data("max", round4(summary.max))
            .data("range", round4(summary.range()))
            .data("q1", round4(summary.q1))
            .data("q3", round4(summary.q3))
            .data("iqr", round4(summary.iqr()))
            .data("outlier_count", outliers.len())
            .data("outliers", outliers);

        if !summary.outliers.is_empty() {
            builder
                .warn(OUTLIERS_DETECTED)
                .recommend("Review outlying values for entry or measurement errors");
        }
        if summary.variability_coefficient().abs() > 1.0 {
            builder.recommend("Values vary widely; consider segmenting the series");
        }

        let elapsed = builder.elapsed();
        builder
            .metric("processing_time", elapsed)
            .metric("data_quality_score", summary.data_quality_score())
            .metric("variability_coefficient", summary.variability_coefficient());

        tracing::debug!(count = summary.count, "Numeric analysis complete");
        builder.finish()
    }
}

fn numeric_hints() -> Vec<String> {
    vec!["Provide a list containing at least one number".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reference_series() {
        let result = Analyzer::default().analyze_numeric(&json!([1, 2, 3, 4, 100]));
        assert!(result.success);
        assert_eq!(result.data["mean"], json!(22.0));
        assert_eq!(result.data["median"], json!(3.0));
        assert_eq!(result.data["q1"], json!(2.0));
        assert_eq!(result.data["q3"], json!(4.0));
        assert_eq!(result.data["outliers"], json!([100.0]));
        assert_eq!(result.data["outlier_count"], json!(1));
        assert!(result.warning(OUTLIERS_DETECTED));
        assert_eq!(result.metrics["data_quality_score"], 0.8);
    }

    #[test]
    fn test_empty_and_invalid_input() {
        let analyzer = Analyzer::default();
        let empty = analyzer.analyze_numeric(&json!([]));
        assert!(!empty.success);
        assert!(empty.warning(NO_NUMERIC));

        let null = analyzer.analyze_numeric(&Value::Null);
        assert!(!null.success);
        assert!(null.warning(INVALID_NUMERIC));
        assert!(null.data.is_empty() && null.metrics.is_empty());
    }

    #[test]
    fn test_filters_non_numeric_entries() {
        let result = Analyzer::default().analyze_numeric(&json!([1, null, "x", 3, true]));
        assert!(result.success);
        assert_eq!(result.data["count"], json!(2));
        assert_eq!(result.data["mean"], json!(2.0));

        let nothing = Analyzer::default().analyze_numeric(&json!(["a", null]));
        assert!(nothing.warning(NO_NUMERIC));
    }

    #[test]
    fn test_single_value() {
        let result = Analyzer::default().analyze_numbers(&[4.0]);
        assert!(result.success);
        assert_eq!(result.data["std_dev"], json!(0.0));
        assert_eq!(result.data["variance"], json!(0.0));
        assert_eq!(result.data["q1"], json!(4.0));
        assert_eq!(result.data["mode"], json!(4.0));
    }

    #[test]
    fn test_mode_requires_majority() {
        let analyzer = Analyzer::default();
        let majority = analyzer.analyze_numbers(&[2.0, 2.0, 2.0, 5.0]);
        assert_eq!(majority.data["mode"], json!(2.0));
        let split = analyzer.analyze_numbers(&[2.0, 2.0, 5.0, 5.0]);
        assert_eq!(split.data["mode"], Value::Null);
    }

    #[test]
    fn test_huge_values_stay_numeric() {
        let result = Analyzer::default().analyze_numbers(&[1e305]);
        assert!(result.success);
        assert_eq!(result.data["mean"], json!(1e305));
        assert_eq!(result.data["max"], json!(1e305));
    }

    #[test]
    fn test_many_distinct_values() {
        let values: Vec<f64> = (0..60_000).map(f64::from).collect();
        let result = Analyzer::default().analyze_numbers(&values);
        assert!(result.success);
        assert_eq!(result.data["mode"], Value::Null);
        assert_eq!(result.data["count"], json!(60_000));
    }

    #[test]
    fn test_zero_mean_variability() {
        let result = Analyzer::default().analyze_numbers(&[-1.0, 1.0]);
        assert_eq!(result.metrics["variability_coefficient"], 0.0);
    }

    #[test]
    fn test_overflow_reports_analysis_error() {
        let result = Analyzer::default().analyze_numbers(&[f64::MAX, f64::MAX]);
        assert!(!result.success);
        assert!(result.data.is_empty());
        assert!(result.warnings.iter().any(|w| w.starts_with("Analysis error: ")));
    }

    #[test]
    fn test_repeatable() {
        let analyzer = Analyzer::default();
        let input = json!([3.5, 1.25, 9, 9, 2, 40]);
        let mut a = analyzer.analyze_numeric(&input);
        let mut b = analyzer.analyze_numeric(&input);
        a.metrics.remove("processing_time");
        b.metrics.remove("processing_time");
        assert_eq!(a.data, b.data);
        assert_eq!(a.metrics, b.metrics);
    }
}
