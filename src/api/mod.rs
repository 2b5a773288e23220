pub mod analyze;
pub mod auth;
pub mod health;
pub mod login;
pub mod security;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        // Authentication
        .route("/api/v1/login", post(login::login))
        .route("/api/v1/register/validate", post(login::validate_registration))
        // Analysis API
        .route("/api/v1/analyze", post(analyze::analyze))
        .route("/api/v1/process-file", post(analyze::process_file))
        .route("/api/v1/assistant/classify", post(analyze::classify))
        .route("/api/v1/security/events", get(security::security_events))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
