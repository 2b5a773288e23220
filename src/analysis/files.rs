use csv::{ReaderBuilder, Trim};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::result::AnalysisResult;
use super::Analyzer;
use crate::error::AnalysisError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    Text,
    Csv,
    Json,
}

const EXTENSIONS: &[(&str, FileFormat)] = &[
    ("txt", FileFormat::Text),
    ("text", FileFormat::Text),
    ("md", FileFormat::Text),
    ("log", FileFormat::Text),
    ("csv", FileFormat::Csv),
    ("json", FileFormat::Json),
];

const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

impl FileFormat {
    pub fn from_filename(filename: &str) -> Result<Self, AnalysisError> {
        let extension = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .ok_or_else(|| AnalysisError::UnsupportedFormat(filename.to_string()))?;

        EXTENSIONS
            .iter()
            .find(|(ext, _)| *ext == extension)
            .map(|(_, format)| *format)
            .ok_or(AnalysisError::UnsupportedFormat(extension))
    }

    pub fn process(&self, analyzer: &Analyzer, content: &str) -> AnalysisResult {
        match self {
            FileFormat::Text => analyzer.analyze_text(content),
            FileFormat::Csv => analyzer.analyze_numbers(&csv_numbers(content)),
            FileFormat::Json => match serde_json::from_str::<Value>(content) {
                Ok(value) => analyzer.comprehensive(&value),
                Err(err) => AnalysisResult::failure(
                    format!("Analysis error: {}", AnalysisError::from(err)),
                    Vec::new(),
                ),
            },
        }
    }
}

/// Every cell of a comma-separated document that parses as a number.
///
/// Quoted cells are read whole, so `"a,1"` is text rather than the number 1.
pub fn csv_numbers(content: &str) -> Vec<f64> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(content.as_bytes());

    reader
        .records()
        .filter_map(|record| match record {
            Ok(record) => Some(record),
            Err(err) => {
                tracing::debug!("Skipping malformed CSV record: {}", err);
                None
            }
        })
        .flat_map(|record| {
            record
                .iter()
                .filter_map(|cell| cell.parse::<f64>().ok())
                .filter(|v| v.is_finite())
                .collect::<Vec<_>>()
        })
        .collect()
}

pub fn format_file_size(size_bytes: u64) -> String {
    if size_bytes == 0 {
        return "0 B".to_string();
    }
    let mut unit = 0;
    let mut size = size_bytes as f64;
    while size >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", size_bytes)
    } else {
        format!("{:.2} {}", size, SIZE_UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_filename() {
        assert_eq!(FileFormat::from_filename("notes.TXT").unwrap(), FileFormat::Text);
        assert_eq!(FileFormat::from_filename("sales.2024.csv").unwrap(), FileFormat::Csv);
        assert_eq!(FileFormat::from_filename("data.json").unwrap(), FileFormat::Json);
        assert!(FileFormat::from_filename("archive.zip").is_err());
        assert!(FileFormat::from_filename("README").is_err());
    }

    #[test]
    fn test_csv_numbers() {
        let csv = "month,revenue\njan,100\nfeb, 250.5\nmar,\"75\"\n";
        assert_eq!(csv_numbers(csv), vec![100.0, 250.5, 75.0]);
    }

    #[test]
    fn test_csv_quoted_comma_is_text() {
        assert_eq!(csv_numbers("label,value\n\"a,1\",2\n"), vec![2.0]);
        assert_eq!(csv_numbers("1,2,3\n4\n"), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_process_csv() {
        let result = FileFormat::Csv.process(&Analyzer::default(), "a,b\n1,2\n3,4\n");
        assert!(result.success);
        assert_eq!(result.data["count"], json!(4));
    }

    #[test]
    fn test_process_json() {
        let analyzer = Analyzer::default();
        let ok = FileFormat::Json.process(&analyzer, "[1, 2, 3, 4, 5]");
        assert!(ok.success);
        assert_eq!(ok.data["patterns"]["trend"], json!("increasing"));

        let broken = FileFormat::Json.process(&analyzer, "{not json");
        assert!(!broken.success);
        assert!(broken.warnings[0].starts_with("Analysis error: "));
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(1536), "1.50 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5.00 MB");
    }
}
