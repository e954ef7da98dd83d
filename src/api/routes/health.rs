//! Health Routes
//!
//! Health check endpoints for monitoring and container probes.
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (entry storage is readable)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;
use crate::store::EntryStore;

/// GET /health/live
///
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Returns 200 if the stored entries can be read and parsed.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    match check_storage(&state) {
        Some(_) => StatusCode::OK,
        None => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// GET /health
///
/// Full health status with component details.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let entries = check_storage(&state);

    let (status, storage) = match entries {
        Some(_) => ("healthy", "ok"),
        None => ("degraded", "error"),
    };

    Json(HealthResponse {
        status: status.to_string(),
        storage: storage.to_string(),
        entries,
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Entry count read straight from the store, bypassing the malformed-reset policy
fn check_storage(state: &AppState) -> Option<usize> {
    match state.guestbook.store().load_entries() {
        Ok(entries) => Some(entries.len()),
        Err(e) => {
            tracing::warn!("Storage health check failed: {}", e);
            None
        }
    }
}
