//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, Response},
    Router,
};
use budget_api::{build_router, AppConfig, AppState};
use http_body_util::BodyExt;
use tower::ServiceExt;

/// State with default configuration and no database.
pub fn test_state() -> AppState {
    AppState::new(Arc::new(AppConfig::default()), None)
}

/// The full application as served in production, minus the database.
pub fn app() -> Router {
    build_router(test_state())
}

/// Send one request through `app`.
pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

/// Collect and parse a JSON response body.
pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert the fixed security header set is present.
pub fn assert_security_headers<B>(response: &Response<B>) {
    let headers = response.headers();
    assert_eq!(headers["x-frame-options"], "DENY");
    assert_eq!(headers["x-xss-protection"], "1; mode=block");
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["referrer-policy"], "strict-origin-when-cross-origin");
    assert_eq!(
        headers["strict-transport-security"],
        "max-age=31536000; includeSubDomains; preload"
    );
}
