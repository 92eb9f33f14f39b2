//! Counters reach the `/metrics` exposition.
//!
//! The Prometheus recorder is process-global, so this binary installs it once
//! and keeps a single test.

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::extract::connect_info::MockConnectInfo;
use axum::http::{Request, StatusCode};
use metrics_exporter_prometheus::PrometheusBuilder;
use tower::ServiceExt;

use ipecho_core::{CredentialStore, StartupClock};
use ipecho_server::{AppState, router};

async fn send(app: Router, uri: &str) -> (StatusCode, String) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn request_and_auth_failure_counters_are_exported() {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .expect("install recorder");
    let state = AppState::new(StartupClock::start(), Duration::from_secs(30))
        .with_credentials(CredentialStore::parse("alice:pa:ss\n"))
        .with_metrics(handle);
    let app = router(state).layer(MockConnectInfo(SocketAddr::from(([127, 0, 0, 1], 40000))));

    let (status, _) = send(app.clone(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(app.clone(), "/").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(app, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(
        body.contains(r#"ipecho_requests_total{route="/health"} 1"#),
        "missing request counter in:\n{body}"
    );
    assert!(
        body.contains(r#"ipecho_auth_failures_total{reason="missing"} 1"#),
        "missing auth failure counter in:\n{body}"
    );
    // rejected before the handler runs
    assert!(!body.contains(r#"ipecho_requests_total{route="/"}"#));
}
