use std::sync::Arc;

use axum::Json;
use axum::extract::State;

use crate::api::auth::ApiToken;
use crate::security::SecurityEvent;
use crate::state::AppState;

pub async fn security_events(
    State(state): State<Arc<AppState>>,
    _token: ApiToken,
) -> Json<Vec<SecurityEvent>> {
    Json(state.guard.lock().await.security_events())
}
