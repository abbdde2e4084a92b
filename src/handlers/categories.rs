//! Category handlers, scoped to a user.

use axum::extract::{Path, State};

use super::not_implemented;
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::routing::{UserPath, UserResourcePath};

pub async fn create_category(
    State(state): State<AppState>,
    Path(path): Path<UserPath>,
) -> ApiError {
    not_implemented(&state, "CreateCategory", path)
}

pub async fn list_categories_by_user_id(
    State(state): State<AppState>,
    Path(path): Path<UserPath>,
) -> ApiError {
    not_implemented(&state, "ListCategoriesByUserID", path)
}

pub async fn get_category_by_id(
    State(state): State<AppState>,
    Path(path): Path<UserResourcePath>,
) -> ApiError {
    not_implemented(&state, "GetCategoryByID", path)
}

pub async fn update_category(
    State(state): State<AppState>,
    Path(path): Path<UserResourcePath>,
) -> ApiError {
    not_implemented(&state, "UpdateCategory", path)
}

pub async fn delete_category(
    State(state): State<AppState>,
    Path(path): Path<UserResourcePath>,
) -> ApiError {
    not_implemented(&state, "DeleteCategory", path)
}
