//! Prometheus self-telemetry for the ingestion service.
//!
//! Counts update outcomes and unmatched requests; stored metric values are
//! not exported here.

mod recorder;

pub use recorder::{Metrics, MetricsRecorder};
