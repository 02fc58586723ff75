//! Application startup and server initialization.
//!
//! This module builds the shared state (seeded storage, route table,
//! self-telemetry) and runs the HTTP server on the configured address.

use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::ConfigV1;
use crate::metrics::Metrics;
use crate::router::RouteError;
use crate::routes;
use crate::state::AppState;
use crate::storage::{StorageError, create_storage};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to initialise storage: {0}")]
    Storage(#[from] StorageError),
    #[error("failed to build routes: {0}")]
    Routes(#[from] RouteError),
    #[error("could not bind to {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Creates the seeded storage, the route table and the shared state.
pub async fn build_state(config: Arc<ConfigV1>) -> Result<AppState, StartupError> {
    let storage = create_storage(&config.storage).await?;
    let metrics = Metrics::new();
    let table = routes::build_route_table(storage.clone(), metrics.clone())?;

    Ok(AppState {
        config,
        storage,
        routes: Arc::new(table),
        metrics,
    })
}

/// Serves the application on an already bound listener until Ctrl-C.
pub async fn serve(listener: TcpListener, state: AppState) -> Result<(), StartupError> {
    let local_addr = listener.local_addr().map_err(StartupError::Serve)?;
    info!(
        "Starting server on {} (configured bind_address {})",
        local_addr, state.config.bind_address
    );
    for template in state.routes.templates() {
        info!("Serving route template {}", template);
    }

    let app = routes::create_router(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(StartupError::Serve)
}

/// Initializes and runs the application server.
///
/// Seeds storage before binding, so the first request already sees the seed.
///
/// # Errors
///
/// Returns an error if storage cannot be seeded, the server fails to bind to
/// the configured address, or it encounters a runtime error.
pub async fn run(config: Arc<ConfigV1>) -> Result<(), StartupError> {
    let state = build_state(config.clone()).await?;

    let listener = TcpListener::bind(&config.bind_address)
        .await
        .map_err(|source| StartupError::Bind {
            address: config.bind_address.clone(),
            source,
        })?;

    serve(listener, state).await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received, stopping server.");
    }
}
