use std::fmt;
use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

/// The kinds of metric the service accepts.
///
/// Each kind has a fixed representation: gauges are `f64`, counters are `i64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    Gauge,
    Counter,
}

impl MetricKind {
    pub const ALL: [MetricKind; 2] = [MetricKind::Gauge, MetricKind::Counter];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Gauge => "gauge",
            MetricKind::Counter => "counter",
        }
    }

    /// Looks up a kind by its name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<MetricKind> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name))
    }

    /// Parses a textual value into this kind's representation.
    pub fn parse_value(&self, raw: &str) -> Result<MetricValue, ValueParseError> {
        match self {
            MetricKind::Counter => Ok(MetricValue::Counter(raw.parse::<i64>()?)),
            MetricKind::Gauge => {
                let value = raw.parse::<f64>()?;
                // `str::parse` saturates to infinity instead of reporting overflow.
                if value.is_infinite() && !is_infinity_literal(raw) {
                    return Err(ValueParseError::FloatOutOfRange(raw.to_string()));
                }
                Ok(MetricValue::Gauge(value))
            }
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_infinity_literal(raw: &str) -> bool {
    let unsigned = raw
        .strip_prefix('+')
        .or_else(|| raw.strip_prefix('-'))
        .unwrap_or(raw);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

/// Why a textual value could not be coerced into a metric representation.
#[derive(Debug, Error, PartialEq)]
pub enum ValueParseError {
    #[error("not a valid 64-bit integer: {0}")]
    Integer(#[from] ParseIntError),
    #[error("not a valid 64-bit float: {0}")]
    Float(#[from] ParseFloatError),
    #[error("float value {0} is out of range")]
    FloatOutOfRange(String),
}

/// A single stored metric value, tagged with its kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Gauge(f64),
    Counter(i64),
}

impl MetricValue {
    pub fn kind(&self) -> MetricKind {
        match self {
            MetricValue::Gauge(_) => MetricKind::Gauge,
            MetricValue::Counter(_) => MetricKind::Counter,
        }
    }

    /// Combines the stored value with an incoming update.
    ///
    /// Gauges take the new value, counters add it to the current total.
    pub fn updated_with(self, update: MetricValue) -> Result<MetricValue, MergeError> {
        match (self, update) {
            (MetricValue::Gauge(_), MetricValue::Gauge(new)) => Ok(MetricValue::Gauge(new)),
            (MetricValue::Counter(current), MetricValue::Counter(delta)) => current
                .checked_add(delta)
                .map(MetricValue::Counter)
                .ok_or(MergeError::Overflow { current, delta }),
            (stored, update) => Err(MergeError::KindMismatch {
                stored: stored.kind(),
                update: update.kind(),
            }),
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Gauge(v) => write!(f, "{}", v),
            MetricValue::Counter(v) => write!(f, "{}", v),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum MergeError {
    #[error("counter overflow: {current} + {delta} does not fit in 64 bits")]
    Overflow { current: i64, delta: i64 },
    #[error("cannot apply a {update} update to a stored {stored}")]
    KindMismatch {
        stored: MetricKind,
        update: MetricKind,
    },
}
