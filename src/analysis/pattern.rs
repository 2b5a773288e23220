use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Value, json};

use super::result::{AnalysisResult, ResultBuilder, round4};
use super::stats;
use super::Analyzer;

pub const INSUFFICIENT_DATA: &str = "Insufficient data for pattern detection";
pub const UNSUPPORTED_DATA: &str = "Unsupported data type for pattern detection";

const MIN_SERIES_LEN: usize = 3;
const SEASONALITY_LAGS: usize = 5;

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap());
static URL: Lazy<Regex> = Lazy::new(|| Regex::new(r#"https?://[^\s<>"']+"#).unwrap());
static PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\+?1[-.\s]?)?(?:\(\d{3}\)\s?|\b\d{3}[-.\s]?)\d{3}[-.\s]?\d{4}\b").unwrap()
});
static DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d{1,4}/\d{1,2}/\d{1,4}\b").unwrap());

/// Input accepted by the pattern detector.
#[derive(Debug, Clone, PartialEq)]
pub enum PatternInput<'a> {
    Text(&'a str),
    Series(Vec<f64>),
}

impl<'a> PatternInput<'a> {
    pub fn from_value(value: &'a Value) -> Option<Self> {
        match value {
            Value::String(text) => Some(PatternInput::Text(text)),
            Value::Array(items) => {
                let values: Vec<f64> = items
                    .iter()
                    .filter_map(Value::as_f64)
                    .filter(|v| v.is_finite())
                    .collect();
                // A list that holds something, but no numbers, is not a series.
                if values.is_empty() && !items.is_empty() {
                    return None;
                }
                Some(PatternInput::Series(values))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Increasing,
    Decreasing,
    Mixed,
}

impl Trend {
    pub fn of(differences: &[f64]) -> Self {
        if differences.iter().all(|d| *d >= 0.0) {
            Trend::Increasing
        } else if differences.iter().all(|d| *d <= 0.0) {
            Trend::Decreasing
        } else {
            Trend::Mixed
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Increasing => "increasing",
            Trend::Decreasing => "decreasing",
            Trend::Mixed => "mixed",
        }
    }
}

fn find_all(pattern: &Regex, text: &str) -> Vec<String> {
    pattern
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

impl Analyzer {
    pub fn detect_patterns(&self, input: &Value) -> AnalysisResult {
        match PatternInput::from_value(input) {
            Some(input) => self.detect(input),
            None => AnalysisResult::failure(UNSUPPORTED_DATA, Vec::new()),
        }
    }

    pub fn detect(&self, input: PatternInput<'_>) -> AnalysisResult {
        match input {
            PatternInput::Text(text) => self.text_patterns(text),
            PatternInput::Series(values) => self.series_patterns(&values),
        }
    }

    fn text_patterns(&self, text: &str) -> AnalysisResult {
        let mut builder = ResultBuilder::start();

        let emails = find_all(&EMAIL, text);
        let urls: Vec<String> = URL
            .find_iter(text)
            .map(|m| {
                m.as_str()
                    .trim_end_matches(['.', ',', ';', ':', '!', '?', ')'])
                    .to_string()
            })
            .collect();
        let phone_numbers = find_all(&PHONE, text);
        let dates = find_all(&DATE, text);
        let total = emails.len() + urls.len() + phone_numbers.len() + dates.len();

        builder
            .data(
                "counts",
                json!({
                    "emails": emails.len(),
                    "urls": urls.len(),
                    "phone_numbers": phone_numbers.len(),
                    "dates": dates.len(),
                }),
            )
            .data("emails", emails)
            .data("urls", urls)
            .data("phone_numbers", phone_numbers)
            .data("dates", dates);

        let elapsed = builder.elapsed();
        builder
            .metric("processing_time", elapsed)
            .metric("total_matches", total as f64);
        builder.finish()
    }

    fn series_patterns(&self, values: &[f64]) -> AnalysisResult {
        if values.len() < MIN_SERIES_LEN {
            return AnalysisResult::failure(
                INSUFFICIENT_DATA,
                vec![format!("Provide at least {} numeric values", MIN_SERIES_LEN)],
            );
        }

        let mut builder = ResultBuilder::start();
        let differences: Vec<f64> = values.windows(2).map(|w| w[1] - w[0]).collect();
        let trend = Trend::of(&differences);
        let volatility = stats::sample_std_dev(values);
        if !volatility.is_finite() {
            return builder.fail("Analysis error: non-finite volatility");
        }
        let acf = stats::autocorrelation(values, self.config.max_lag);
        let seasonality_detected = acf
            .iter()
            .take(SEASONALITY_LAGS)
            .any(|r| r.abs() > self.config.seasonality_threshold);
        let peak = acf.iter().fold(0.0_f64, |acc, r| acc.max(r.abs()));

        builder
            .data("count", values.len())
            .data("trend", trend.as_str())
            .data(
                "differences",
                differences.iter().map(|d| round4(*d)).collect::<Vec<_>>(),
            )
            .data("volatility", round4(volatility))
            .data(
                "autocorrelation",
                acf.iter().map(|r| round4(*r)).collect::<Vec<_>>(),
            )
            .data("seasonality_detected", seasonality_detected);

        if seasonality_detected {
            builder.recommend("Repeating structure found; consider seasonal decomposition");
        }

        let elapsed = builder.elapsed();
        builder
            .metric("processing_time", elapsed)
            .metric("volatility", volatility)
            .metric("max_autocorrelation", peak);
        builder.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_and_url() {
        let result = Analyzer::default().detect_patterns(&json!("contact me at a@b.com or http://x.com"));
        assert!(result.success);
        assert_eq!(result.data["counts"]["emails"], json!(1));
        assert_eq!(result.data["counts"]["urls"], json!(1));
        assert_eq!(result.data["emails"], json!(["a@b.com"]));
        assert_eq!(result.data["urls"], json!(["http://x.com"]));
    }

    #[test]
    fn test_phone_and_date() {
        let text = "Call 555-123-4567 or (555) 987-6543 before 12/31/2024.";
        let result = Analyzer::default().detect_patterns(&json!(text));
        assert_eq!(result.data["counts"]["phone_numbers"], json!(2));
        assert_eq!(result.data["dates"], json!(["12/31/2024"]));
    }

    #[test]
    fn test_url_trailing_punctuation() {
        let result = Analyzer::default().detect_patterns(&json!("See https://example.com/a, then stop."));
        assert_eq!(result.data["urls"], json!(["https://example.com/a"]));
    }

    #[test]
    fn test_increasing_trend() {
        let result = Analyzer::default().detect_patterns(&json!([1, 2, 3, 4, 5]));
        assert!(result.success);
        assert_eq!(result.data["trend"], json!("increasing"));
        assert_eq!(result.data["autocorrelation"].as_array().unwrap().len(), 4);
        assert_eq!(result.data["seasonality_detected"], json!(false));
    }

    #[test]
    fn test_decreasing_and_mixed() {
        let analyzer = Analyzer::default();
        let down = analyzer.detect_patterns(&json!([9, 7, 7, 1]));
        assert_eq!(down.data["trend"], json!("decreasing"));
        let mixed = analyzer.detect_patterns(&json!([1, 3, 2]));
        assert_eq!(mixed.data["trend"], json!("mixed"));
    }

    #[test]
    fn test_seasonality() {
        let series = json!([1, 5, 1, 5, 1, 5, 1, 5, 1, 5, 1, 5]);
        let result = Analyzer::default().detect_patterns(&series);
        assert_eq!(result.data["seasonality_detected"], json!(true));
        assert_eq!(result.data["trend"], json!("mixed"));
    }

    #[test]
    fn test_constant_series() {
        let result = Analyzer::default().detect_patterns(&json!([2, 2, 2, 2]));
        assert_eq!(result.data["autocorrelation"], json!([0.0, 0.0, 0.0]));
        assert_eq!(result.data["volatility"], json!(0.0));
    }

    #[test]
    fn test_insufficient_and_unsupported() {
        let analyzer = Analyzer::default();
        let short = analyzer.detect_patterns(&json!([1, 2]));
        assert!(!short.success);
        assert!(short.warning(INSUFFICIENT_DATA));

        let other = analyzer.detect_patterns(&json!({ "a": 1 }));
        assert!(!other.success);
        assert!(other.warning(UNSUPPORTED_DATA));
        assert!(analyzer.detect_patterns(&Value::Null).warning(UNSUPPORTED_DATA));
        assert!(analyzer.detect_patterns(&json!(["a", "b", "c"])).warning(UNSUPPORTED_DATA));
        assert!(analyzer.detect_patterns(&json!([])).warning(INSUFFICIENT_DATA));
    }
}
