//! Panic recovery.
//!
//! A panic in any stage below this one is caught and turned into a
//! 500 response. The panic payload is logged, never sent to the client.

use std::any::Any;

use axum::response::{IntoResponse, Response};
use tower_http::catch_panic::CatchPanicLayer;

use crate::http::response::ApiError;

type PanicHandler = fn(Box<dyn Any + Send + 'static>) -> Response;

/// Build the recovery stage.
pub fn recovery_layer() -> CatchPanicLayer<PanicHandler> {
    CatchPanicLayer::custom(handle_panic as PanicHandler)
}

fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };

    tracing::error!(panic = %detail, "Recovered from handler panic");
    ApiError::Internal.into_response()
}
