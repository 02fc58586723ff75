use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::models::ValueParseError;
use crate::storage::StorageError;

/// Every way an update request can be rejected.
///
/// Each variant maps to a single HTTP status; the response body is always empty.
#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("method {0} is not allowed, expected POST")]
    MethodNotAllowed(Method),
    #[error("unsupported content type \"{0}\", expected text/plain")]
    UnsupportedMediaType(String),
    #[error("route is missing path parameter \"{0}\"")]
    MissingParameter(&'static str),
    #[error("metric type name \"{0}\" does not exist")]
    UnknownMetricType(String),
    #[error("value \"{value}\" for metric type name \"{metric_type}\" is of the wrong type")]
    ValueTypeMismatch {
        metric_type: String,
        value: String,
        #[source]
        source: ValueParseError,
    },
    #[error("metric name \"{0}\" does not exist")]
    MetricNotFound(String),
    #[error("counter \"{name}\" would overflow: {current} + {delta}")]
    CounterOverflow {
        name: String,
        current: i64,
        delta: i64,
    },
    #[error("failed to store metric: {0}")]
    StorageWriteFailure(#[from] StorageError),
}

impl UpdateError {
    pub fn status(&self) -> StatusCode {
        match self {
            UpdateError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            UpdateError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            UpdateError::UnknownMetricType(_)
            | UpdateError::ValueTypeMismatch { .. }
            | UpdateError::CounterOverflow { .. } => StatusCode::BAD_REQUEST,
            UpdateError::MetricNotFound(_) => StatusCode::NOT_FOUND,
            UpdateError::MissingParameter(_) | UpdateError::StorageWriteFailure(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Short label used in telemetry.
    pub fn reason(&self) -> &'static str {
        match self {
            UpdateError::MethodNotAllowed(_) => "method_not_allowed",
            UpdateError::UnsupportedMediaType(_) => "unsupported_media_type",
            UpdateError::MissingParameter(_) => "missing_parameter",
            UpdateError::UnknownMetricType(_) => "unknown_metric_type",
            UpdateError::ValueTypeMismatch { .. } => "value_type_mismatch",
            UpdateError::MetricNotFound(_) => "metric_not_found",
            UpdateError::CounterOverflow { .. } => "counter_overflow",
            UpdateError::StorageWriteFailure(_) => "storage_write_failure",
        }
    }
}

impl IntoResponse for UpdateError {
    fn into_response(self) -> Response {
        self.status().into_response()
    }
}
