//! Health check handlers.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use std::time::Duration;

/// Liveness probe - process is running.
pub async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "alive" })),
    )
}

/// Readiness probe - storage root is reachable.
pub async fn readiness_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    const TIMEOUT: Duration = Duration::from_secs(5);

    let mut response = serde_json::json!({
        "status": "ready",
        "storage": "unknown"
    });

    let store = state.policy.store().clone();
    let ready = match tokio::time::timeout(TIMEOUT, store.health_check()).await {
        Ok(Ok(())) => {
            response["storage"] = serde_json::json!("ready");
            true
        }
        Ok(Err(e)) => {
            tracing::error!(error = %e, "Storage readiness check failed");
            response["storage"] = serde_json::json!(format!("not_ready: {}", e));
            false
        }
        Err(_) => {
            tracing::error!("Storage readiness check timed out");
            response["storage"] = serde_json::json!("timeout");
            false
        }
    };

    let status_code = if ready {
        StatusCode::OK
    } else {
        response["status"] = serde_json::json!("not_ready");
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
