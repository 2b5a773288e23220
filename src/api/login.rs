use std::net::SocketAddr;
use std::sync::Arc;

use axum::Json;
use axum::extract::{ConnectInfo, State};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::AppError;
use crate::security;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct LoginRequest {
    username: String,
    password: String,
}

#[derive(Deserialize)]
pub struct RegisterRequest {
    username: String,
    email: String,
    password: String,
    confirm_password: String,
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(form): Json<LoginRequest>,
) -> Result<Json<Value>, AppError> {
    let ip = addr.ip();
    let mut guard = state.guard.lock().await;

    if guard.is_blocked(&ip) {
        return Err(AppError::Forbidden(
            "Too many failed attempts. Please try again later.".into(),
        ));
    }

    if security::is_suspicious_input(&form.username) {
        tracing::warn!("Suspicious login input from {}", ip);
        guard.record_failed_attempt(ip);
        return Err(AppError::BadRequest("Invalid username".into()));
    }

    if form.username == state.admin_config.username
        && form.password == state.admin_config.password
    {
        guard.clear_failed_attempts(&ip);
        tracing::info!("Successful login from {}", ip);
        Ok(Json(json!({ "success": true, "username": form.username })))
    } else {
        guard.record_failed_attempt(ip);
        Err(AppError::Unauthorized("Invalid username or password."))
    }
}

pub async fn validate_registration(Json(form): Json<RegisterRequest>) -> Json<Value> {
    let errors = security::registration_errors(
        &form.username,
        &form.email,
        &form.password,
        &form.confirm_password,
    );
    Json(json!({ "valid": errors.is_empty(), "errors": errors }))
}
