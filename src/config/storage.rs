use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Storage configuration: which backend to use and what to seed it with.
#[derive(Deserialize, Serialize, Debug, Clone, Default, JsonSchema)]
pub struct StorageConfig {
    #[serde(rename = "type", default)]
    pub backend: StorageBackend,
    #[serde(default)]
    pub seed: SeedConfig,
}

/// The existing storage backends, selected by the "type" key in the YAML.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq, JsonSchema)]
pub enum StorageBackend {
    #[default]
    #[serde(rename = "memory")]
    Memory,
}

/// Metrics written into storage before the server accepts requests.
///
/// Updates only ever modify existing metrics, so anything a client should be
/// able to update has to be listed here. A `seed` section in the config
/// replaces the default seed entirely.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, JsonSchema)]
pub struct SeedConfig {
    #[serde(default)]
    pub gauges: BTreeMap<String, f64>,
    #[serde(default)]
    pub counters: BTreeMap<String, i64>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            gauges: BTreeMap::from([("g1".to_string(), 1.0)]),
            counters: BTreeMap::new(),
        }
    }
}
