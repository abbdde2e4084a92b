//! Transaction handlers, scoped to a user.

use axum::extract::{Path, State};

use super::not_implemented;
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::routing::{UserPath, UserResourcePath};

pub async fn create_transaction(
    State(state): State<AppState>,
    Path(path): Path<UserPath>,
) -> ApiError {
    not_implemented(&state, "CreateTransaction", path)
}

pub async fn list_transactions_by_user_id(
    State(state): State<AppState>,
    Path(path): Path<UserPath>,
) -> ApiError {
    not_implemented(&state, "ListTransactionsByUserID", path)
}

pub async fn get_transaction_by_id(
    State(state): State<AppState>,
    Path(path): Path<UserResourcePath>,
) -> ApiError {
    not_implemented(&state, "GetTransactionByID", path)
}

pub async fn update_transaction(
    State(state): State<AppState>,
    Path(path): Path<UserResourcePath>,
) -> ApiError {
    not_implemented(&state, "UpdateTransaction", path)
}

pub async fn delete_transaction(
    State(state): State<AppState>,
    Path(path): Path<UserResourcePath>,
) -> ApiError {
    not_implemented(&state, "DeleteTransaction", path)
}
