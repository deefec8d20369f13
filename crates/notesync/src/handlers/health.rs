//! Liveness probe.

use axum::{http::StatusCode, response::IntoResponse, Json};

/// GET /healthz - static liveness probe.
///
/// Answers without touching storage so orchestrators can distinguish "process
/// up" from "store broken".
#[axum::debug_handler]
pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "healthy" })))
}
