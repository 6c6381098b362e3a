//! Health Check Handler

use axum::Json;
use serde::Serialize;

use crate::utils::time::now_millis;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: i64,
}

/// GET /health - liveness probe, no authentication
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: now_millis(),
    })
}
