use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::analysis::files::{FileFormat, format_file_size};
use crate::analysis::AnalysisKind;
use crate::api::auth::ApiToken;
use crate::assistant;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub data: Value,
}

#[derive(Debug, Deserialize)]
pub struct FileRequest {
    pub filename: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    pub message: String,
}

pub async fn analyze(
    State(state): State<Arc<AppState>>,
    _token: ApiToken,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<Value>, AppError> {
    if request.data.is_null() {
        return Err(AppError::BadRequest("No data provided".into()));
    }
    let kind = AnalysisKind::from_name(request.kind.as_deref().unwrap_or("general"));
    let result = state.analyzer.run(kind, &request.data);
    tracing::info!("Analysis performed: {:?} (success={})", kind, result.success);

    Ok(Json(json!({
        "success": true,
        "analysis_type": kind,
        "result": result,
        "timestamp": Utc::now().to_rfc3339(),
    })))
}

pub async fn process_file(
    State(state): State<Arc<AppState>>,
    _token: ApiToken,
    Json(request): Json<FileRequest>,
) -> Result<Json<Value>, AppError> {
    if request.filename.trim().is_empty() {
        return Err(AppError::BadRequest("No file selected".into()));
    }
    let format = FileFormat::from_filename(&request.filename)?;
    let result = format.process(&state.analyzer, &request.content);
    tracing::info!("Processed file {} as {:?}", request.filename, format);

    Ok(Json(json!({
        "success": result.success,
        "filename": request.filename,
        "file_type": format,
        "size": format_file_size(request.content.len() as u64),
        "result": result,
    })))
}

pub async fn classify(
    _token: ApiToken,
    Json(request): Json<ClassifyRequest>,
) -> Json<Value> {
    let intent = assistant::classify(&request.message);
    Json(json!({ "intent": intent }))
}
