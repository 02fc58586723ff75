use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info};

use super::memory::MemStorage;
use crate::config::{SeedConfig, StorageBackend, StorageConfig};
use crate::models::{MetricKind, MetricValue};

/// Errors a storage backend may report on write.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("stored {name} is a {stored}, cannot apply a {update} update")]
    KindMismatch {
        name: String,
        stored: MetricKind,
        update: MetricKind,
    },
}

/// The Storage trait abstracts metric storage: one name->value mapping per kind.
///
/// A name may exist independently as both a gauge and a counter.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Returns the current value of `name` in the mapping for `kind`, if present.
    async fn get(&self, kind: MetricKind, name: &str) -> Option<MetricValue>;

    /// Stores `value` under `name` in the mapping for the value's kind,
    /// replacing whatever was there.
    async fn set(&self, name: &str, value: MetricValue) -> Result<(), StorageError>;

    fn backend_name(&self) -> &str;
}

/// Creates a concrete storage backend from the config and applies the startup seed.
pub async fn create_storage(config: &StorageConfig) -> Result<Arc<dyn Storage>, StorageError> {
    let storage: Arc<dyn Storage> = match config.backend {
        StorageBackend::Memory => Arc::new(MemStorage::new()),
    };
    info!("Using {} metric storage.", storage.backend_name());

    seed_storage(storage.as_ref(), &config.seed).await?;
    Ok(storage)
}

/// Writes every seeded metric into `storage`.
pub async fn seed_storage(storage: &dyn Storage, seed: &SeedConfig) -> Result<(), StorageError> {
    for (name, value) in &seed.gauges {
        debug!("Seeding gauge '{}' = {}", name, value);
        storage.set(name, MetricValue::Gauge(*value)).await?;
    }
    for (name, value) in &seed.counters {
        debug!("Seeding counter '{}' = {}", name, value);
        storage.set(name, MetricValue::Counter(*value)).await?;
    }
    info!(
        "Seeded {} gauge(s) and {} counter(s).",
        seed.gauges.len(),
        seed.counters.len()
    );
    Ok(())
}
