//! Stateless analyzers for text, numeric series and embedded patterns.
//!
//! Every entry point is total: bad input and computation faults come back as
//! an [`AnalysisResult`] with `success == false` and a warning, never a panic
//! or an `Err`.

pub mod files;
pub mod numeric;
pub mod pattern;
pub mod result;
pub mod stats;
pub mod text;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::AnalysisConfig;
use result::{AnalysisResult, ResultBuilder};

pub const UNSUPPORTED_ANALYSIS: &str = "Unsupported data type for analysis";

#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalysisConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisKind {
    Text,
    Numeric,
    Pattern,
    Comprehensive,
}

impl AnalysisKind {
    /// Unknown names fall back to a comprehensive run.
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "text" => AnalysisKind::Text,
            "numeric" => AnalysisKind::Numeric,
            "pattern" | "patterns" => AnalysisKind::Pattern,
            _ => AnalysisKind::Comprehensive,
        }
    }
}

impl Analyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Analyzer { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn run(&self, kind: AnalysisKind, input: &Value) -> AnalysisResult {
        match kind {
            AnalysisKind::Text => self.analyze_text_value(input),
            AnalysisKind::Numeric => self.analyze_numeric(input),
            AnalysisKind::Pattern => self.detect_patterns(input),
            AnalysisKind::Comprehensive => self.comprehensive(input),
        }
    }

    /// Runs every analyzer that applies to the input's shape and nests each
    /// successful section's data under its own key.
    pub fn comprehensive(&self, input: &Value) -> AnalysisResult {
        let sections = match input {
            Value::String(_) => vec![
                ("text", self.analyze_text_value(input)),
                ("patterns", self.detect_patterns(input)),
            ],
            Value::Array(_) => vec![
                ("numeric", self.analyze_numeric(input)),
                ("patterns", self.detect_patterns(input)),
            ],
            _ => return AnalysisResult::failure(UNSUPPORTED_ANALYSIS, Vec::new()),
        };

        let mut builder = ResultBuilder::start();
        let mut succeeded = false;
        let mut metrics: Vec<(String, f64)> = Vec::new();
        for (name, section) in sections {
            for warning in section.warnings {
                builder.warn(format!("{}: {}", name, warning));
            }
            for advice in section.recommendations {
                builder.recommend(advice);
            }
            if !section.success {
                continue;
            }
            succeeded = true;
            metrics.extend(
                section
                    .metrics
                    .into_iter()
                    .filter(|(key, _)| key != "processing_time")
                    .map(|(key, value)| (format!("{}.{}", name, key), value)),
            );
            builder.data(name, Value::Object(section.data));
        }

        if !succeeded {
            return builder.fail(UNSUPPORTED_ANALYSIS);
        }
        for (key, value) in metrics {
            builder.metric(&key, value);
        }
        let elapsed = builder.elapsed();
        builder.metric("processing_time", elapsed);
        builder.finish()
    }
}

/// Section data of a comprehensive result, if that section succeeded.
pub fn section<'a>(result: &'a AnalysisResult, name: &str) -> Option<&'a Map<String, Value>> {
    result.data.get(name).and_then(Value::as_object)
}
