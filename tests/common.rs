#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request};
use metrics_ingest::config::{ConfigV1, load_config_from_str};
use metrics_ingest::routes::create_router;
use metrics_ingest::startup::build_state;
use metrics_ingest::state::AppState;

pub const TEST_CONFIG: &str = r#"
version: "1.0.0"
bind_address: "127.0.0.1:0"
logging:
  level: "debug"
  format: "json"
storage:
  type: memory
  seed:
    gauges:
      g1: 1.0
    counters:
      requests: 10
"#;

pub fn load_test_config() -> ConfigV1 {
    load_config_from_str(TEST_CONFIG).expect("Failed to parse test config YAML")
}

pub async fn build_app(config: ConfigV1) -> (Router, AppState) {
    let state = build_state(Arc::new(config))
        .await
        .expect("failed to build state");
    (create_router(state.clone()), state)
}

pub fn request(method: Method, path: &str, content_type: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(content_type) = content_type {
        builder = builder.header("Content-Type", content_type);
    }
    builder.body(Body::empty()).expect("failed to build request")
}

pub fn update(path: &str) -> Request<Body> {
    request(Method::POST, path, Some("text/plain"))
}
