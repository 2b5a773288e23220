use std::collections::BTreeMap;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Outcome of a single analyzer call.
///
/// A failed result never carries `data` or `metrics`; use [`AnalysisResult::failure`]
/// to build one and [`ResultBuilder`] for successful results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub success: bool,
    pub data: Map<String, Value>,
    pub metrics: BTreeMap<String, f64>,
    pub warnings: Vec<String>,
    pub recommendations: Vec<String>,
    pub processing_time: f64,
}

impl AnalysisResult {
    pub fn failure(warning: impl Into<String>, recommendations: Vec<String>) -> Self {
        AnalysisResult {
            success: false,
            data: Map::new(),
            metrics: BTreeMap::new(),
            warnings: vec![warning.into()],
            recommendations,
            processing_time: 0.0,
        }
    }

    pub fn warning(&self, text: &str) -> bool {
        self.warnings.iter().any(|w| w == text)
    }
}

pub struct ResultBuilder {
    started: Instant,
    data: Map<String, Value>,
    metrics: BTreeMap<String, f64>,
    warnings: Vec<String>,
    recommendations: Vec<String>,
}

impl ResultBuilder {
    pub fn start() -> Self {
        ResultBuilder {
            started: Instant::now(),
            data: Map::new(),
            metrics: BTreeMap::new(),
            warnings: Vec::new(),
            recommendations: Vec::new(),
        }
    }

    pub fn elapsed(&self) -> f64 {
        round4(self.started.elapsed().as_secs_f64())
    }

    pub fn data(&mut self, key: &str, value: impl Into<Value>) -> &mut Self {
        self.data.insert(key.to_string(), value.into());
        self
    }

    pub fn metric(&mut self, key: &str, value: f64) -> &mut Self {
        self.metrics.insert(key.to_string(), round4(value));
        self
    }

    pub fn warn(&mut self, text: impl Into<String>) -> &mut Self {
        self.warnings.push(text.into());
        self
    }

    pub fn recommend(&mut self, text: impl Into<String>) -> &mut Self {
        self.recommendations.push(text.into());
        self
    }

    pub fn finish(self) -> AnalysisResult {
        let processing_time = self.elapsed();
        AnalysisResult {
            success: true,
            data: self.data,
            metrics: self.metrics,
            warnings: self.warnings,
            recommendations: self.recommendations,
            processing_time,
        }
    }

    /// Abandons the partial result, keeping only warnings and recommendations.
    pub fn fail(self, warning: impl Into<String>) -> AnalysisResult {
        let processing_time = self.elapsed();
        let mut warnings = self.warnings;
        warnings.push(warning.into());
        AnalysisResult {
            success: false,
            data: Map::new(),
            metrics: BTreeMap::new(),
            warnings,
            recommendations: self.recommendations,
            processing_time,
        }
    }
}

/// Rounds to 4 decimals; magnitudes too large to scale are returned as-is.
pub fn round4(value: f64) -> f64 {
    let scaled = value * 10_000.0;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round4() {
        assert_eq!(round4(1.234_56), 1.2346);
        assert_eq!(round4(-0.000_04), -0.0);
        assert_eq!(round4(22.0), 22.0);
    }

    #[test]
    fn test_round4_keeps_huge_values() {
        assert_eq!(round4(1e305), 1e305);
        assert_eq!(round4(-f64::MAX), -f64::MAX);
    }

    #[test]
    fn test_failure_is_empty() {
        let result = AnalysisResult::failure("bad", vec!["retry".into()]);
        assert!(!result.success);
        assert!(result.data.is_empty());
        assert!(result.metrics.is_empty());
        assert!(result.warning("bad"));
    }

    #[test]
    fn test_builder_fail_drops_data() {
        let mut builder = ResultBuilder::start();
        builder.data("count", 3).metric("score", 0.5).warn("first");
        let result = builder.fail("second");
        assert!(!result.success);
        assert!(result.data.is_empty());
        assert!(result.metrics.is_empty());
        assert_eq!(result.warnings, vec!["first", "second"]);
    }

    #[test]
    fn test_builder_rounds_metrics() {
        let mut builder = ResultBuilder::start();
        builder.metric("ratio", 2.0 / 3.0);
        let result = builder.finish();
        assert!(result.success);
        assert_eq!(result.metrics["ratio"], 0.6667);
    }
}
