mod common;

use axum::Router;
use axum::body::to_bytes;
use axum::http::{HeaderValue, Method, StatusCode};
use metrics_ingest::handlers::UPDATE_TEMPLATE;
use metrics_ingest::models::{MetricKind, MetricValue};
use tower::ServiceExt;

use common::{build_app, load_test_config, request, update};

async fn send(app: &Router, req: axum::http::Request<axum::body::Body>) -> StatusCode {
    app.clone()
        .oneshot(req)
        .await
        .expect("request should complete")
        .status()
}

#[tokio::test]
async fn integration_gauge_update_overwrites_seed() {
    let (app, state) = build_app(load_test_config()).await;

    let response = app
        .clone()
        .oneshot(update("/update/gauge/g1/2.5"))
        .await
        .expect("request should complete");

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(body.is_empty());
    assert_eq!(
        state.storage.get(MetricKind::Gauge, "g1").await,
        Some(MetricValue::Gauge(2.5))
    );

    assert_eq!(send(&app, update("/update/gauge/g1/-3")).await, StatusCode::OK);
    assert_eq!(
        state.storage.get(MetricKind::Gauge, "g1").await,
        Some(MetricValue::Gauge(-3.0))
    );
}

/// Segments are percent-decoded before the name lookup and the value parse.
#[tokio::test]
async fn integration_percent_encoded_segments_are_decoded() {
    let (app, state) = build_app(load_test_config()).await;

    assert_eq!(send(&app, update("/update/gauge/g%31/2")).await, StatusCode::OK);
    assert_eq!(
        state.storage.get(MetricKind::Gauge, "g1").await,
        Some(MetricValue::Gauge(2.0))
    );

    assert_eq!(send(&app, update("/update/gauge/g1/%32.5")).await, StatusCode::OK);
    assert_eq!(
        state.storage.get(MetricKind::Gauge, "g1").await,
        Some(MetricValue::Gauge(2.5))
    );

    assert_eq!(
        send(&app, update("/update/counter/req%75ests/%35")).await,
        StatusCode::OK
    );
    assert_eq!(
        state.storage.get(MetricKind::Counter, "requests").await,
        Some(MetricValue::Counter(15))
    );

    // Not valid UTF-8 once decoded, so no template matches.
    assert_eq!(
        send(&app, update("/update/gauge/g%FF/1")).await,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn integration_content_type_with_non_ascii_parameter() {
    let (app, state) = build_app(load_test_config()).await;

    let req = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/update/gauge/g1/4")
        .header(
            "Content-Type",
            HeaderValue::from_bytes(b"text/plain; charset=\xe9").unwrap(),
        )
        .body(axum::body::Body::empty())
        .unwrap();

    assert_eq!(send(&app, req).await, StatusCode::OK);
    assert_eq!(
        state.storage.get(MetricKind::Gauge, "g1").await,
        Some(MetricValue::Gauge(4.0))
    );
}

#[tokio::test]
async fn integration_state_carries_config_and_routes() {
    let (_app, state) = build_app(load_test_config()).await;

    assert_eq!(state.config.bind_address, "127.0.0.1:0");
    assert_eq!(state.config.storage.seed.counters.get("requests"), Some(&10));
    let templates: Vec<&str> = state.routes.templates().collect();
    assert_eq!(templates, vec![UPDATE_TEMPLATE]);
}

#[tokio::test]
async fn integration_counter_update_accumulates() {
    let (app, state) = build_app(load_test_config()).await;

    assert_eq!(send(&app, update("/update/counter/requests/5")).await, StatusCode::OK);
    assert_eq!(send(&app, update("/update/COUNTER/requests/7")).await, StatusCode::OK);

    assert_eq!(
        state.storage.get(MetricKind::Counter, "requests").await,
        Some(MetricValue::Counter(22))
    );
}

#[tokio::test]
async fn integration_unknown_metric_is_not_found() {
    let (app, state) = build_app(load_test_config()).await;

    assert_eq!(send(&app, update("/update/counter/c1/5")).await, StatusCode::NOT_FOUND);
    // g1 only exists as a gauge.
    assert_eq!(send(&app, update("/update/counter/g1/5")).await, StatusCode::NOT_FOUND);
    assert_eq!(state.storage.get(MetricKind::Counter, "c1").await, None);
}

#[tokio::test]
async fn integration_bad_type_or_value_is_bad_request() {
    let (app, state) = build_app(load_test_config()).await;

    for path in [
        "/update/gauge/g1/notanumber",
        "/update/histogram/g1/1",
        "/update/counter/requests/1.5",
        "/update/counter/requests/99999999999999999999",
        "/update/gauge/g1/1e400",
    ] {
        assert_eq!(send(&app, update(path)).await, StatusCode::BAD_REQUEST, "{}", path);
    }

    assert_eq!(
        state.storage.get(MetricKind::Gauge, "g1").await,
        Some(MetricValue::Gauge(1.0))
    );
}

#[tokio::test]
async fn integration_method_not_allowed_comes_first() {
    let (app, _state) = build_app(load_test_config()).await;

    assert_eq!(
        send(&app, request(Method::PUT, "/update/gauge/g1/3", Some("text/plain"))).await,
        StatusCode::METHOD_NOT_ALLOWED
    );
    assert_eq!(
        send(
            &app,
            request(Method::GET, "/update/gauge/g1/3", Some("application/json"))
        )
        .await,
        StatusCode::METHOD_NOT_ALLOWED
    );
}

#[tokio::test]
async fn integration_content_type_must_be_text_plain() {
    let (app, _state) = build_app(load_test_config()).await;

    assert_eq!(
        send(
            &app,
            request(Method::POST, "/update/gauge/g1/3", Some("application/json"))
        )
        .await,
        StatusCode::UNSUPPORTED_MEDIA_TYPE
    );
    assert_eq!(
        send(&app, request(Method::POST, "/update/gauge/g1/3", None)).await,
        StatusCode::UNSUPPORTED_MEDIA_TYPE
    );
    assert_eq!(
        send(
            &app,
            request(
                Method::POST,
                "/update/gauge/g1/3",
                Some("text/plain; charset=utf-8")
            )
        )
        .await,
        StatusCode::OK
    );
}

#[tokio::test]
async fn integration_unmatched_paths_are_not_found() {
    let (app, _state) = build_app(load_test_config()).await;

    for path in [
        "/",
        "/update",
        "/update/gauge/g1",
        "/update/gauge/g1/2.5/",
        "/update/gauge/g1/2.5/extra",
        "/value/gauge/g1",
    ] {
        assert_eq!(send(&app, update(path)).await, StatusCode::NOT_FOUND, "{}", path);
    }
}

#[tokio::test]
async fn integration_health_and_self_metrics() {
    let (app, _state) = build_app(load_test_config()).await;

    assert_eq!(send(&app, update("/update/gauge/g1/2")).await, StatusCode::OK);
    assert_eq!(send(&app, update("/update/gauge/nope/2")).await, StatusCode::NOT_FOUND);
    assert_eq!(send(&app, update("/nowhere")).await, StatusCode::NOT_FOUND);

    assert_eq!(
        send(&app, request(Method::GET, "/health", None)).await,
        StatusCode::OK
    );

    let response = app
        .clone()
        .oneshot(request(Method::GET, "/metrics", None))
        .await
        .expect("request should complete");
    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();

    assert!(text.contains(r#"metric_updates_total{kind="gauge",result="applied"} 1"#));
    assert!(text.contains(r#"metric_updates_total{kind="gauge",result="metric_not_found"} 1"#));
    assert!(text.contains("unmatched_requests_total 1"));
    // Stored metric names never show up in self-telemetry.
    assert!(!text.contains("g1"));
}
