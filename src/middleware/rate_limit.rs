use axum::{
    body::Body,
    extract::{ConnectInfo, Request},
    http::{Response as HttpResponse, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_governor::{governor::GovernorConfigBuilder, GovernorError, GovernorLayer};

use crate::error::{AppError, AppResult};

/// Type alias for the IP-based governor layer
pub type IpGovernorLayer = GovernorLayer<
    tower_governor::key_extractor::PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware<governor::clock::QuantaInstant>,
    Body,
>;

/// Milliseconds between replenished tokens for a per-minute budget
pub fn replenish_interval_ms(requests_per_minute: u32) -> u64 {
    60_000 / u64::from(requests_per_minute.max(1))
}

/// Create a GovernorLayer limiting each client IP to `requests_per_minute`,
/// with the full budget available as burst
pub fn create_ip_governor(requests_per_minute: u32) -> AppResult<IpGovernorLayer> {
    let config = GovernorConfigBuilder::default()
        .per_millisecond(replenish_interval_ms(requests_per_minute))
        .burst_size(requests_per_minute.max(1))
        .finish()
        .ok_or_else(|| AppError::Config("Invalid rate limit configuration".to_string()))?;

    Ok(GovernorLayer::new(Arc::new(config)).error_handler(rate_limit_error_handler))
}

/// Render governor rejections as JSON errors
pub fn rate_limit_error_handler(error: GovernorError) -> HttpResponse<Body> {
    match error {
        GovernorError::TooManyRequests { wait_time, .. } => (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({
                "error": format!("Too many requests, retry in {} seconds", wait_time)
            })),
        )
            .into_response(),
        other => {
            tracing::error!(error = ?other, "Rate limiter failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Rate limiter failed" })),
            )
                .into_response()
        }
    }
}

/// Log one line per request with client IP and latency; rejections and failures at warn
pub async fn log_request(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let latency_ms = started.elapsed().as_millis() as u64;

    let outcome = request_outcome(status);

    if outcome == "ok" {
        tracing::debug!(
            client_ip = %addr.ip(),
            method = %method,
            uri = %uri,
            status = status.as_u16(),
            latency_ms,
            "Request served"
        );
    } else {
        tracing::warn!(
            client_ip = %addr.ip(),
            method = %method,
            uri = %uri,
            status = status.as_u16(),
            latency_ms,
            outcome,
            "Request not served"
        );
    }

    response
}

/// Classify a response for the request log
pub fn request_outcome(status: StatusCode) -> &'static str {
    if status == StatusCode::TOO_MANY_REQUESTS {
        "rate_limited"
    } else if status.is_client_error() {
        "rejected"
    } else if status.is_server_error() {
        "failed"
    } else {
        "ok"
    }
}
