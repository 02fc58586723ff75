//! Metrics recording implementation using Prometheus.

use prometheus::{
    Counter, CounterVec, Encoder, HistogramVec, Opts, Registry, TextEncoder,
    register_counter_vec_with_registry, register_counter_with_registry,
    register_histogram_vec_with_registry,
};
use std::sync::Arc;

/// Trait for recording the service's own request telemetry.
pub trait MetricsRecorder: Clone + Send + Sync + 'static {
    /// Records the outcome of an update request.
    ///
    /// `kind` is the metric kind or "unknown"; `result` is "applied" or the rejection reason.
    fn record_update(&self, kind: &str, result: &str);

    /// Records how long an update request took to handle.
    fn record_update_duration(&self, kind: &str, duration_secs: f64);

    /// Records a request whose path matched no registered template.
    fn record_unmatched_route(&self);
}

/// Prometheus metrics collector.
#[derive(Clone)]
pub struct Metrics {
    registry: Arc<Registry>,

    metric_updates_total: CounterVec,
    metric_update_duration_seconds: HistogramVec,
    unmatched_requests_total: Counter,
}

impl Metrics {
    /// Creates a new metrics instance with a Prometheus registry.
    pub fn new() -> Self {
        let registry = Arc::new(Registry::new());

        let metric_updates_total = register_counter_vec_with_registry!(
            Opts::new(
                "metric_updates_total",
                "Total number of metric update requests by outcome"
            ),
            &["kind", "result"],
            registry.clone()
        )
        .expect("Failed to register metric_updates_total");

        let metric_update_duration_seconds = register_histogram_vec_with_registry!(
            "metric_update_duration_seconds",
            "Metric update handling duration in seconds",
            &["kind"],
            vec![0.00001, 0.00005, 0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1],
            registry.clone()
        )
        .expect("Failed to register metric_update_duration_seconds");

        let unmatched_requests_total = register_counter_with_registry!(
            Opts::new(
                "unmatched_requests_total",
                "Requests whose path matched no registered route"
            ),
            registry.clone()
        )
        .expect("Failed to register unmatched_requests_total");

        Metrics {
            registry,
            metric_updates_total,
            metric_update_duration_seconds,
            unmatched_requests_total,
        }
    }

    /// Renders all metrics in Prometheus text format.
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsRecorder for Metrics {
    fn record_update(&self, kind: &str, result: &str) {
        self.metric_updates_total
            .with_label_values(&[kind, result])
            .inc();
    }

    fn record_update_duration(&self, kind: &str, duration_secs: f64) {
        self.metric_update_duration_seconds
            .with_label_values(&[kind])
            .observe(duration_secs);
    }

    fn record_unmatched_route(&self) {
        self.unmatched_requests_total.inc();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_includes_recorded_updates() {
        let metrics = Metrics::new();
        metrics.record_update("gauge", "applied");
        metrics.record_update("gauge", "applied");
        metrics.record_update("counter", "metric_not_found");
        metrics.record_update_duration("gauge", 0.0002);
        metrics.record_unmatched_route();

        let text = metrics.render().unwrap();

        assert!(text.contains(r#"metric_updates_total{kind="gauge",result="applied"} 2"#));
        assert!(text.contains(r#"metric_updates_total{kind="counter",result="metric_not_found"} 1"#));
        assert!(text.contains(r#"metric_update_duration_seconds_count{kind="gauge"} 1"#));
        assert!(text.contains("unmatched_requests_total 1"));
    }

    /// Each instance owns its registry, so clones share counts and new instances do not.
    #[test]
    fn test_clones_share_registry() {
        let metrics = Metrics::new();
        let clone = metrics.clone();
        clone.record_unmatched_route();

        assert!(metrics.render().unwrap().contains("unmatched_requests_total 1"));
        assert!(Metrics::new()
            .render()
            .unwrap()
            .contains("unmatched_requests_total 0"));
    }
}
