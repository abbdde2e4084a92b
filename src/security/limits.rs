//! Request body limits.
//!
//! # Responsibilities
//! - Enforce the maximum request body size
//!
//! # Design Decisions
//! - A declared Content-Length over the ceiling is rejected before the
//!   handler runs
//! - Bodies without a declared length are capped while being read
//! - Both paths answer 413 Payload Too Large with the JSON error body; a
//!   413 produced further in (extractor rejection) is rewritten to it
//! - Extractors use the same ceiling instead of axum's smaller default

use axum::{
    body::Body,
    extract::{DefaultBodyLimit, Request},
    http::{header::CONTENT_LENGTH, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Router,
};
use tower_http::limit::RequestBodyLimitLayer;

use crate::http::response::ApiError;

/// Maximum accepted request body: 10 MiB.
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Wrap `router` with the body ceiling.
pub fn with_body_limit<S>(router: Router<S>, limit: usize) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(DefaultBodyLimit::max(limit))
        .layer(RequestBodyLimitLayer::new(limit))
        .layer(middleware::from_fn(move |req: Request<Body>, next: Next| {
            reject_declared_oversize(limit, req, next)
        }))
}

async fn reject_declared_oversize(limit: usize, req: Request<Body>, next: Next) -> Response {
    let declared = req
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());

    match declared {
        Some(len) if len > limit as u64 => {
            tracing::warn!(
                content_length = len,
                limit,
                path = %req.uri().path(),
                "Rejecting oversized request body"
            );
            ApiError::PayloadTooLarge.into_response()
        }
        _ => {
            let response = next.run(req).await;
            if response.status() == StatusCode::PAYLOAD_TOO_LARGE {
                ApiError::PayloadTooLarge.into_response()
            } else {
                response
            }
        }
    }
}
