use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::state::AppState;

/// Request carrying the configured API token as a Bearer credential.
pub struct ApiToken;

impl FromRequestParts<Arc<AppState>> for ApiToken {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or(AppError::Unauthorized("Missing Authorization header"))?;

        let value = header_value
            .to_str()
            .map_err(|_| AppError::Unauthorized("Invalid Authorization header value"))?;

        let token = value
            .strip_prefix("Bearer ")
            .ok_or(AppError::Unauthorized("Expected Bearer token"))?;

        if token != state.api_token {
            return Err(AppError::Unauthorized("Invalid API token"));
        }
        Ok(ApiToken)
    }
}
