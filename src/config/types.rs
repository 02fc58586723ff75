use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use schemars::{JsonSchema, schema_for};
use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;
use super::storage::StorageConfig;

/// Current configuration version tag.
pub const CONFIG_VERSION: &str = "1.0.0";

/// Prefix for environment variable overrides, e.g. `METRICS_INGEST_BIND_ADDRESS`.
/// Nested keys use `__`, e.g. `METRICS_INGEST_LOGGING__LEVEL`.
pub const ENV_PREFIX: &str = "METRICS_INGEST_";

/// Environment variable holding the path of the YAML config file.
pub const CONFIG_PATH_ENV: &str = "METRICS_INGEST_CONFIG";

const DEFAULT_CONFIG_PATH: &str = "./config.yaml";

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
#[serde(default)]
pub struct ConfigV1 {
    pub bind_address: String,
    pub logging: LoggingConfig,
    pub storage: StorageConfig,
}

impl Default for ConfigV1 {
    fn default() -> Self {
        Self {
            bind_address: "localhost:8080".to_string(),
            logging: LoggingConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

/// Path of the config file: `$METRICS_INGEST_CONFIG`, or `./config.yaml`.
pub fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Builds the layered figment: version default, then the YAML file (optional),
/// then `METRICS_INGEST_*` environment variables.
pub fn figment(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::default("version", CONFIG_VERSION))
        .merge(Yaml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).ignore(&["config"]).split("__"))
}

/// Load config from the YAML file at `path`, with environment overrides.
pub fn load_config(path: &Path) -> Result<ConfigV1, figment::Error> {
    extract(figment(path))
}

/// Load config from a YAML string, without environment overrides.
pub fn load_config_from_str(yaml: &str) -> Result<ConfigV1, figment::Error> {
    extract(
        Figment::new()
            .merge(Serialized::default("version", CONFIG_VERSION))
            .merge(Yaml::string(yaml)),
    )
}

fn extract(figment: Figment) -> Result<ConfigV1, figment::Error> {
    match figment.extract::<Config>()? {
        Config::ConfigV1(c) => Ok(c),
    }
}

/// Print the JSON schema for the configuration to stdout.
pub fn print_schema() -> Result<(), serde_json::Error> {
    let schema = schema_for!(Config);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
