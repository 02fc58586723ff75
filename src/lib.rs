//! Library exports for metrics-ingest, shared between the binary and tests.

pub mod config;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod router;
pub mod routes;
pub mod startup;
pub mod state;
pub mod storage;
pub mod utils;
