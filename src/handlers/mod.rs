//! Request handlers bound to path templates in the route table.

mod errors;
mod update;

use async_trait::async_trait;
use axum::http::{HeaderMap, Method};
use axum::response::Response;

use crate::router::PathParams;

pub use errors::UpdateError;
pub use update::{UPDATE_TEMPLATE, UpdateHandler, UpdateParams};

/// Everything a handler needs from a routed request.
#[derive(Debug, Clone)]
pub struct RoutedRequest {
    pub method: Method,
    pub headers: HeaderMap,
    pub params: PathParams,
}

/// A handler that a path template can be bound to.
#[async_trait]
pub trait RequestHandler: Send + Sync {
    fn get_name(&self) -> &str;
    async fn handle(&self, request: RoutedRequest) -> Response;
}
