//! Access logging middleware.
//!
//! Emits one structured event per request after the downstream chain has
//! produced a response, so the status and size reflect what the client gets.

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    body::{Body, HttpBody},
    extract::{ConnectInfo, Request},
    http::header::USER_AGENT,
    middleware::Next,
    response::Response,
};

use crate::http::request::request_id;

pub async fn access_log_middleware(req: Request<Body>, next: Next) -> Response {
    let started = Instant::now();

    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let remote_addr = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_default();
    let user_agent = req
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let request_id = request_id(req.headers()).unwrap_or_default().to_string();

    let response = next.run(req).await;

    // Every body this service produces is fully buffered, so the hint is exact.
    let bytes_written = response.body().size_hint().exact().unwrap_or(0);

    tracing::info!(
        method = %method,
        path = %path,
        remote_addr = %remote_addr,
        user_agent = %user_agent,
        status = response.status().as_u16(),
        bytes_written,
        duration = ?started.elapsed(),
        request_id = %request_id,
        "request completed"
    );

    response
}
