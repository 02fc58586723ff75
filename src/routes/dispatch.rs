//! Fallback dispatcher into the template route table.

use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use tracing::debug;

use crate::handlers::RoutedRequest;
use crate::metrics::MetricsRecorder;
use crate::router::RouteMatch;
use crate::state::AppState;

/// Resolves the request path against the route table and hands the request
/// to the bound handler. Paths matching no template get a bare 404.
pub async fn dispatch(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let Some(RouteMatch {
        template,
        handler,
        params,
    }) = state.routes.resolve(uri.path())
    else {
        debug!("No route matches {} {}", method, uri.path());
        state.metrics.record_unmatched_route();
        return StatusCode::NOT_FOUND.into_response();
    };

    debug!(
        "Dispatching {} {} to '{}' via {}",
        method,
        uri.path(),
        handler.get_name(),
        template
    );
    handler
        .handle(RoutedRequest {
            method,
            headers,
            params,
        })
        .await
}
