use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Storage, StorageError};
use crate::models::{MetricKind, MetricValue};

/// In-memory storage with one map per metric kind.
///
/// State lives for the lifetime of the process; nothing is persisted.
#[derive(Default)]
pub struct MemStorage {
    gauges: RwLock<HashMap<String, f64>>,
    counters: RwLock<HashMap<String, i64>>,
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for MemStorage {
    async fn get(&self, kind: MetricKind, name: &str) -> Option<MetricValue> {
        match kind {
            MetricKind::Gauge => self
                .gauges
                .read()
                .await
                .get(name)
                .copied()
                .map(MetricValue::Gauge),
            MetricKind::Counter => self
                .counters
                .read()
                .await
                .get(name)
                .copied()
                .map(MetricValue::Counter),
        }
    }

    async fn set(&self, name: &str, value: MetricValue) -> Result<(), StorageError> {
        match value {
            MetricValue::Gauge(v) => {
                self.gauges.write().await.insert(name.to_string(), v);
            }
            MetricValue::Counter(v) => {
                self.counters.write().await.insert(name.to_string(), v);
            }
        }
        Ok(())
    }

    fn backend_name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let storage = MemStorage::new();
        assert_eq!(storage.get(MetricKind::Gauge, "missing").await, None);
        assert_eq!(storage.get(MetricKind::Counter, "missing").await, None);
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let storage = MemStorage::new();
        storage.set("g", MetricValue::Gauge(0.5)).await.unwrap();
        storage.set("c", MetricValue::Counter(7)).await.unwrap();

        assert_eq!(
            storage.get(MetricKind::Gauge, "g").await,
            Some(MetricValue::Gauge(0.5))
        );
        assert_eq!(
            storage.get(MetricKind::Counter, "c").await,
            Some(MetricValue::Counter(7))
        );
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let storage = MemStorage::new();
        storage.set("c", MetricValue::Counter(1)).await.unwrap();
        storage.set("c", MetricValue::Counter(42)).await.unwrap();

        assert_eq!(
            storage.get(MetricKind::Counter, "c").await,
            Some(MetricValue::Counter(42))
        );
    }

    /// The same name lives independently in each kind's map.
    #[tokio::test]
    async fn test_kinds_are_independent() {
        let storage = MemStorage::new();
        storage.set("shared", MetricValue::Gauge(1.5)).await.unwrap();

        assert_eq!(storage.get(MetricKind::Counter, "shared").await, None);

        storage.set("shared", MetricValue::Counter(3)).await.unwrap();

        assert_eq!(
            storage.get(MetricKind::Gauge, "shared").await,
            Some(MetricValue::Gauge(1.5))
        );
        assert_eq!(
            storage.get(MetricKind::Counter, "shared").await,
            Some(MetricValue::Counter(3))
        );
    }
}
