//! Timeout enforcement.
//!
//! # Responsibilities
//! - Cap the total time spent handling one request
//! - Cancel the downstream future when the deadline passes
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities; dropping the future is the cancellation
//! - Timed-out requests return 504 Gateway Timeout

use std::time::Duration;

use axum::{
    body::Body,
    extract::Request,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Router,
};

use crate::http::response::ApiError;

/// Default cap on request handling time.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Wrap `router` so that every request finishes within `limit`.
pub fn with_request_timeout<S>(router: Router<S>, limit: Duration) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(middleware::from_fn(move |req: Request<Body>, next: Next| {
        enforce_deadline(limit, req, next)
    }))
}

async fn enforce_deadline(limit: Duration, req: Request<Body>, next: Next) -> Response {
    let path = req.uri().path().to_string();

    match tokio::time::timeout(limit, next.run(req)).await {
        Ok(response) => response,
        Err(_) => {
            tracing::warn!(path = %path, timeout = ?limit, "Request timed out");
            ApiError::Timeout.into_response()
        }
    }
}
