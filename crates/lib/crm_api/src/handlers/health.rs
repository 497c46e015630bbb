//! Health endpoint.

use axum::Json;
use axum::extract::State;
use tracing::warn;

use crate::AppState;
use crate::models::{ApiResponse, HealthResponse};
use crm_core::store::UserStore;

/// `GET /api/health`: reports the version and whether the store answers.
pub async fn health_handler(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let store_reachable = match state.users.ping().await {
        Ok(()) => true,
        Err(e) => {
            warn!("store health check failed: {e}");
            false
        }
    };

    Json(ApiResponse::ok(HealthResponse {
        version: crm_core::version().to_string(),
        store_reachable,
    }))
}
