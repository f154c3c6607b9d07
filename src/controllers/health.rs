use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::infrastructure::http::ServerStatus;

/// GET / - Service status. Always succeeds, even with no engine loaded.
pub async fn status(State(status): State<Arc<ServerStatus>>) -> impl IntoResponse {
    Json(json!({
        "status": "running",
        "model_loaded": status.model_loaded,
        "device": status.device,
    }))
}
