pub mod metric;

pub use metric::{MergeError, MetricKind, MetricValue, ValueParseError};
