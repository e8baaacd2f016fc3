//! Health check endpoints.

use axum::{Json, Router, routing::get};
use brandtrack_core::orders::OrderStore;
use brandtrack_core::record::RecordStore;
use serde::Serialize;

use crate::AppState;

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
}

/// Health check handler.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Creates health check routes.
pub fn routes<R, O>() -> Router<AppState<R, O>>
where
    R: RecordStore + 'static,
    O: OrderStore + 'static,
{
    Router::new().route("/health", get(health_check))
}
