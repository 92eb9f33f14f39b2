//! ipecho HTTP server.
//!
//! Serves three routes:
//! - `GET /` echoes the client IP, optionally behind HTTP Basic auth
//! - `GET /health` liveness, always 200
//! - `GET /ready` readiness, 503 until the startup grace period passes
//!
//! `GET /metrics` is added when a Prometheus recorder has been installed.

pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod telemetry;

use axum::Router;
use axum::extract::Request;
use axum::middleware::from_fn_with_state;
use axum::routing::get;
use tower_http::trace::TraceLayer;
use tracing::Level;

pub use self::error::{ApiError, AuthFailure};
pub use self::middleware::require_basic_auth;
pub use self::state::AppState;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let echo = Router::new()
        .route("/", get(routes::client_ip))
        .route_layer(from_fn_with_state(state.clone(), require_basic_auth));

    let mut app = Router::new()
        .merge(echo)
        .route("/health", get(routes::health))
        .route("/ready", get(routes::ready));

    if state.metrics.is_some() {
        app = app.route("/metrics", get(routes::metrics_endpoint));
    }

    app.layer(
        TraceLayer::new_for_http().make_span_with(|request: &Request| {
            tracing::span!(
                Level::DEBUG,
                "http_request",
                method = %request.method(),
                path = %request.uri().path(),
            )
        }),
    )
    .with_state(state)
}
