use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use tokio::sync::Mutex;
use tracing::{debug, error, warn};

use super::{RequestHandler, RoutedRequest, UpdateError};
use crate::metrics::{Metrics, MetricsRecorder};
use crate::models::{MergeError, MetricKind, MetricValue};
use crate::router::PathParams;
use crate::storage::{Storage, StorageError};

/// Path template the update handler is registered under.
pub const UPDATE_TEMPLATE: &str = "/update/{metricType}/{metricName}/{metricValue}";

const METRIC_TYPE: &str = "metricType";
const METRIC_NAME: &str = "metricName";
const METRIC_VALUE: &str = "metricValue";

const TEXT_PLAIN: &str = "text/plain";

/// The three path parameters of an update request, still as raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateParams {
    pub metric_type: String,
    pub metric_name: String,
    pub metric_value: String,
}

impl TryFrom<&PathParams> for UpdateParams {
    type Error = UpdateError;

    fn try_from(params: &PathParams) -> Result<Self, Self::Error> {
        let get = |key: &'static str| {
            params
                .get(key)
                .map(str::to_string)
                .ok_or(UpdateError::MissingParameter(key))
        };
        Ok(UpdateParams {
            metric_type: get(METRIC_TYPE)?,
            metric_name: get(METRIC_NAME)?,
            metric_value: get(METRIC_VALUE)?,
        })
    }
}

/// Applies `POST /update/{metricType}/{metricName}/{metricValue}` requests.
///
/// Only metrics that already exist in storage can be updated: gauges take the
/// new value, counters add it to the stored total.
pub struct UpdateHandler<R: MetricsRecorder = Metrics> {
    storage: Arc<dyn Storage>,
    recorder: R,
    // Held across each get/set pair so concurrent counter updates do not lose increments.
    write_lock: Mutex<()>,
}

impl<R: MetricsRecorder> UpdateHandler<R> {
    pub fn new(storage: Arc<dyn Storage>, recorder: R) -> Self {
        Self {
            storage,
            recorder,
            write_lock: Mutex::new(()),
        }
    }

    /// Validates the request and applies the update, returning the stored value.
    ///
    /// Checks run in a fixed order (method, content type, metric type, value,
    /// existence) and storage is only written once all of them pass.
    pub async fn update(
        &self,
        method: &Method,
        headers: &HeaderMap,
        params: &PathParams,
    ) -> Result<MetricValue, UpdateError> {
        if method != Method::POST {
            return Err(UpdateError::MethodNotAllowed(method.clone()));
        }

        // Compared as raw bytes: parameters after the prefix may hold non-visible-ASCII.
        let content_type = headers
            .get(CONTENT_TYPE)
            .map(|value| value.as_bytes())
            .unwrap_or_default();
        if !content_type.starts_with(TEXT_PLAIN.as_bytes()) {
            return Err(UpdateError::UnsupportedMediaType(
                String::from_utf8_lossy(content_type).into_owned(),
            ));
        }

        let params = UpdateParams::try_from(params)?;
        self.apply(&params).await
    }

    /// Coerces the value and merges it into the existing metric.
    pub async fn apply(&self, params: &UpdateParams) -> Result<MetricValue, UpdateError> {
        let kind = MetricKind::from_name(&params.metric_type)
            .ok_or_else(|| UpdateError::UnknownMetricType(params.metric_type.clone()))?;

        let update = kind
            .parse_value(&params.metric_value)
            .map_err(|source| UpdateError::ValueTypeMismatch {
                metric_type: params.metric_type.clone(),
                value: params.metric_value.clone(),
                source,
            })?;

        let _guard = self.write_lock.lock().await;

        let current = self
            .storage
            .get(kind, &params.metric_name)
            .await
            .ok_or_else(|| UpdateError::MetricNotFound(params.metric_name.clone()))?;

        let next = current.updated_with(update).map_err(|e| match e {
            MergeError::Overflow { current, delta } => UpdateError::CounterOverflow {
                name: params.metric_name.clone(),
                current,
                delta,
            },
            MergeError::KindMismatch { stored, update } => StorageError::KindMismatch {
                name: params.metric_name.clone(),
                stored,
                update,
            }
            .into(),
        })?;

        self.storage.set(&params.metric_name, next).await?;
        Ok(next)
    }
}

#[async_trait]
impl<R: MetricsRecorder> RequestHandler for UpdateHandler<R> {
    fn get_name(&self) -> &str {
        "update-metric"
    }

    async fn handle(&self, request: RoutedRequest) -> Response {
        let started = Instant::now();
        let outcome = self
            .update(&request.method, &request.headers, &request.params)
            .await;

        let kind = request
            .params
            .get(METRIC_TYPE)
            .and_then(MetricKind::from_name)
            .map_or("unknown", |kind| kind.as_str());
        self.recorder
            .record_update_duration(kind, started.elapsed().as_secs_f64());

        match outcome {
            Ok(value) => {
                self.recorder.record_update(kind, "applied");
                debug!(
                    metric_kind = kind,
                    metric_name = request.params.get(METRIC_NAME).unwrap_or_default(),
                    "Metric updated to {}",
                    value
                );
                StatusCode::OK.into_response()
            }
            Err(e) => {
                self.recorder.record_update(kind, e.reason());
                let status = e.status();
                if status.is_server_error() {
                    error!(status = status.as_u16(), "{}", e);
                } else if status == StatusCode::BAD_REQUEST || status == StatusCode::NOT_FOUND {
                    warn!(status = status.as_u16(), "{}", e);
                } else {
                    debug!(status = status.as_u16(), "{}", e);
                }
                e.into_response()
            }
        }
    }
}
