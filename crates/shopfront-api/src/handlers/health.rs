//! Health check handler

use axum::Json;
use serde::Serialize;

use crate::response::ApiResponse;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
}

/// Health check - GET /health
pub async fn health_check() -> Json<ApiResponse<HealthStatus>> {
    Json(ApiResponse::success(HealthStatus {
        status: "ok".to_string(),
        service: "shopfront-server".to_string(),
    }))
}
