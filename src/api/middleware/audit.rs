//! Audit middleware for the authentication surface.
//!
//! An explicit interceptor composed ahead of the handler. Every attempt
//! is logged with the client identity and outcome status; rejected
//! attempts log at warn level for audit trails.

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    extract::{ConnectInfo, Request},
    http::StatusCode,
    middleware::Next,
    response::Response,
};

/// Extract client identifier for audit logging.
/// Uses X-Forwarded-For header if behind proxy, otherwise uses connection IP.
fn client_identifier(request: &Request) -> String {
    if let Some(forwarded) = request
        .headers()
        .get("X-Forwarded-For")
        .and_then(|h| h.to_str().ok())
    {
        // Take the first IP in the chain (original client)
        if let Some(ip) = forwarded.split(',').next() {
            return ip.trim().to_string();
        }
    }

    if let Some(real_ip) = request
        .headers()
        .get("X-Real-IP")
        .and_then(|h| h.to_str().ok())
    {
        return real_ip.to_string();
    }

    if let Some(connect_info) = request.extensions().get::<ConnectInfo<SocketAddr>>() {
        return connect_info.0.ip().to_string();
    }

    "unknown".to_string()
}

/// Log each authentication attempt with its outcome.
pub async fn audit_middleware(request: Request, next: Next) -> Response {
    let client = client_identifier(&request);
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis();
    if status == StatusCode::UNAUTHORIZED {
        tracing::warn!(%client, %method, %path, %status, elapsed_ms, "authentication rejected");
    } else {
        tracing::info!(%client, %method, %path, %status, elapsed_ms, "authentication request");
    }

    response
}
