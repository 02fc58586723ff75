//! Liveness endpoint.

use crate::state::AppState;
use axum::{Router, http::StatusCode, routing::get};

/// Registers the health check route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// Answers 200 `OK` while the process is serving requests.
async fn health_check() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}
