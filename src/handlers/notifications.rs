//! Notification handlers, scoped to a user.

use axum::extract::{Path, State};

use super::not_implemented;
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::routing::{UserPath, UserResourcePath};

pub async fn create_notification(
    State(state): State<AppState>,
    Path(path): Path<UserPath>,
) -> ApiError {
    not_implemented(&state, "CreateNotification", path)
}

pub async fn list_notifications_by_user_id(
    State(state): State<AppState>,
    Path(path): Path<UserPath>,
) -> ApiError {
    not_implemented(&state, "ListNotificationsByUserID", path)
}

pub async fn get_notification_by_id(
    State(state): State<AppState>,
    Path(path): Path<UserResourcePath>,
) -> ApiError {
    not_implemented(&state, "GetNotificationByID", path)
}

pub async fn update_notification(
    State(state): State<AppState>,
    Path(path): Path<UserResourcePath>,
) -> ApiError {
    not_implemented(&state, "UpdateNotification", path)
}

pub async fn delete_notification(
    State(state): State<AppState>,
    Path(path): Path<UserResourcePath>,
) -> ApiError {
    not_implemented(&state, "DeleteNotification", path)
}
