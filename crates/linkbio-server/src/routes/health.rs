//! Health check endpoint.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
    storage: &'static str,
    cached_pages: u64,
}

/// Public health check endpoint.
///
/// Does not touch the storage backend, so it stays cheap for load balancer
/// probes.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "linkbio-server",
        version: env!("CARGO_PKG_VERSION"),
        storage: state.store.backend_name(),
        cached_pages: state.cache.entry_count(),
    })
}
