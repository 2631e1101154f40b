/// Health check API routes
use axum::Json;
use freight_core::ApiResponse;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// GET /api/health - Health check endpoint
pub async fn health() -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::ok(
        "Service is healthy.",
        HealthResponse {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    ))
}
