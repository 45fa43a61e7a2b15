//! Request logging middleware.
//!
//! Access log with method, path, status code, and latency. Runs outside the
//! auth layer, so it never sees (or logs) the caller's identity.

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{info, warn, Instrument};

/// Middleware that logs HTTP requests with timing information.
///
/// Handlers run inside an `http_request` span. 5xx logs at WARN, rejected
/// requests (4xx) at INFO with their own message, the rest at INFO.
pub async fn request_logging(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    // Skip logging for health checks to reduce noise
    if path == "/health" {
        return next.run(request).await;
    }

    let span = tracing::info_span!(
        "http_request",
        method = %method,
        path = %path,
        status = tracing::field::Empty,
    );

    let start = Instant::now();
    let response = next.run(request).instrument(span.clone()).await;
    let latency_ms = start.elapsed().as_millis();

    let status = response.status();
    span.record("status", status.as_u16());

    let _entered = span.enter();
    if status.is_server_error() {
        warn!(status = status.as_u16(), latency_ms, "Request failed (5xx)");
    } else if status.is_client_error() {
        info!(status = status.as_u16(), latency_ms, "Request rejected (4xx)");
    } else {
        info!(status = status.as_u16(), latency_ms, "Request completed");
    }

    response
}
