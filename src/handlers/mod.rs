//! Request handlers.
//!
//! Domain handlers are placeholders: each one is routed and receives its
//! typed path parameters, then answers 501 with the operation name.

pub mod budget_templates;
pub mod categories;
pub mod fallback;
pub mod health;
pub mod notifications;
pub mod transactions;
pub mod users;

use std::fmt::Debug;

use crate::http::response::ApiError;
use crate::http::server::AppState;

/// Log the dispatch and produce the 501 for `operation`.
fn not_implemented(state: &AppState, operation: &'static str, target: impl Debug) -> ApiError {
    tracing::debug!(
        operation,
        target = ?target,
        database = state.db.is_some(),
        "Operation not implemented"
    );
    ApiError::NotImplemented(operation)
}
