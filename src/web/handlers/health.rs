//! Health check HTTP handler

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use tracing::warn;

use crate::web::{responses::ok, ApiResponse, AppState};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
    pub version: &'static str,
}

/// Liveness plus a database round trip
pub async fn health_check(State(state): State<AppState>) -> axum::response::Response {
    match state.database.ping().await {
        Ok(()) => ok(HealthResponse {
            status: "healthy",
            database: "connected",
            version: env!("CARGO_PKG_VERSION"),
        })
        .into_response(),
        Err(e) => {
            warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse::<()>::error("Database connection failed".to_string())),
            )
                .into_response()
        }
    }
}
