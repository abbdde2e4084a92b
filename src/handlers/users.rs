//! User handlers.

use axum::extract::{Path, State};

use super::not_implemented;
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::routing::UserPath;

pub async fn create_user(State(state): State<AppState>) -> ApiError {
    not_implemented(&state, "CreateUser", ())
}

pub async fn get_user_by_id(State(state): State<AppState>, Path(path): Path<UserPath>) -> ApiError {
    not_implemented(&state, "GetUserByID", path)
}

pub async fn update_user(State(state): State<AppState>, Path(path): Path<UserPath>) -> ApiError {
    not_implemented(&state, "UpdateUser", path)
}

pub async fn delete_user(State(state): State<AppState>, Path(path): Path<UserPath>) -> ApiError {
    not_implemented(&state, "DeleteUser", path)
}
