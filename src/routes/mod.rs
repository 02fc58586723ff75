//! HTTP route definitions and handlers.
//!
//! Fixed service endpoints (health, metrics) are plain axum routes; every
//! other path falls through to the template route table.

mod dispatch;
mod health_routes;
mod metrics_routes;

use std::sync::Arc;

use axum::Router;

use crate::handlers::{RequestHandler, UPDATE_TEMPLATE, UpdateHandler};
use crate::metrics::Metrics;
use crate::router::RouteError;
use crate::state::{AppState, HandlerTable};
use crate::storage::Storage;

/// Builds the template route table with the metric update handler.
pub fn build_route_table(
    storage: Arc<dyn Storage>,
    metrics: Metrics,
) -> Result<HandlerTable, RouteError> {
    let update: Arc<dyn RequestHandler> = Arc::new(UpdateHandler::new(storage, metrics));
    HandlerTable::new().route(UPDATE_TEMPLATE, update)
}

/// Creates the application router with all configured routes.
///
/// Combines all route modules into a single router and attaches
/// the application state for access in handlers.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(health_routes::routes())
        .merge(metrics_routes::routes())
        .fallback(dispatch::dispatch)
        .with_state(state)
}
