//! Route handlers.

use std::net::SocketAddr;

use axum::Json;
use axum::debug_handler;
use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use ipecho_core::resolve_client_ip;
use serde::Serialize;

use crate::state::AppState;

const X_FORWARDED_FOR: &str = "x-forwarded-for";

#[derive(Debug, Serialize)]
pub struct IpResponse {
    pub ip: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

/// Echo the caller's address, preferring the first `X-Forwarded-For` entry.
#[debug_handler]
pub async fn client_ip(
    ConnectInfo(remote): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> Json<IpResponse> {
    metrics::counter!("ipecho_requests_total", "route" => "/").increment(1);
    Json(IpResponse {
        ip: resolve_client_ip(forwarded_for(&headers), remote),
    })
}

/// First `X-Forwarded-For` occurrence as text. Values carrying non-ASCII
/// bytes are dropped so the caller falls back to the peer address.
pub fn forwarded_for(headers: &HeaderMap) -> Option<&str> {
    // `get` yields the first occurrence when the header is repeated
    let value = headers.get(X_FORWARDED_FOR)?;
    match value.to_str() {
        Ok(s) => Some(s),
        Err(_) => {
            tracing::debug!(
                raw = ?value,
                "x-forwarded-for is not visible ascii; using peer address"
            );
            None
        }
    }
}

/// Liveness check. Always 200; the body tells whether the grace period passed.
#[debug_handler]
pub async fn health(State(state): State<AppState>) -> Json<StatusResponse> {
    metrics::counter!("ipecho_requests_total", "route" => "/health").increment(1);
    Json(StatusResponse {
        status: state.readiness().liveness_status(),
    })
}

/// Readiness check. 503 until the grace period has elapsed.
#[debug_handler]
pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<StatusResponse>) {
    metrics::counter!("ipecho_requests_total", "route" => "/ready").increment(1);
    let readiness = state.readiness();
    let code = if readiness.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (
        code,
        Json(StatusResponse {
            status: readiness.readiness_status(),
        }),
    )
}

#[debug_handler]
pub async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    match state.metrics {
        Some(handle) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
