//! Health, liveness, and readiness endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::MethodFilter;
use axum::Json;
use serde_json::json;

use super::{AppState, Controller, Route};
use crate::network::HealthState;

/// Exposes `/health`, `/health/live`, and `/health/ready`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HealthController;

impl Controller for HealthController {
    fn routes(&self) -> Vec<Route> {
        vec![
            Route::new("/health", MethodFilter::GET, health_handler),
            Route::new("/health/live", MethodFilter::GET, liveness_handler),
            Route::new("/health/ready", MethodFilter::GET, readiness_handler),
        ]
    }
}

/// Returns lifecycle state, in-flight count, and uptime as JSON.
///
/// Always 200; the `state` field says whether the server is serving or draining.
pub async fn health_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "state": state.shutdown.health_state().as_str(),
        "in_flight": state.shutdown.in_flight_count(),
        "uptime_secs": state.start_time.elapsed().as_secs(),
    }))
}

/// Liveness probe: the process is up.
pub async fn liveness_handler() -> StatusCode {
    StatusCode::OK
}

/// Readiness probe: 200 only while `Ready`.
pub async fn readiness_handler(State(state): State<AppState>) -> StatusCode {
    if state.shutdown.health_state() == HealthState::Ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}
