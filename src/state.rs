//! Shared application state.
//!
//! Contains the state that is shared across all request handlers,
//! including configuration, metric storage and the update route table.

use crate::config::ConfigV1;
use crate::handlers::RequestHandler;
use crate::metrics::Metrics;
use crate::router::RouteTable;
use crate::storage::Storage;
use std::sync::Arc;

/// Route table whose templates dispatch to request handlers.
pub type HandlerTable = RouteTable<Arc<dyn RequestHandler>>;

/// Application state shared across all HTTP handlers.
///
/// This state is cloned for each request handler and contains
/// references to the configuration, storage and route table.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded at startup.
    pub config: Arc<ConfigV1>,
    /// Metric storage, seeded before the server starts.
    pub storage: Arc<dyn Storage>,
    /// Template routes, built once at startup and read-only afterwards.
    pub routes: Arc<HandlerTable>,
    /// Prometheus metrics describing the service itself.
    pub metrics: Metrics,
}
