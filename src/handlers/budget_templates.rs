//! Budget template handlers, scoped to a user.

use axum::extract::{Path, State};

use super::not_implemented;
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::routing::{UserPath, UserResourcePath};

pub async fn create_budget_template(
    State(state): State<AppState>,
    Path(path): Path<UserPath>,
) -> ApiError {
    not_implemented(&state, "CreateBudgetTemplate", path)
}

pub async fn list_budget_templates_by_user_id(
    State(state): State<AppState>,
    Path(path): Path<UserPath>,
) -> ApiError {
    not_implemented(&state, "ListBudgetTemplatesByUserID", path)
}

pub async fn get_budget_template_by_id(
    State(state): State<AppState>,
    Path(path): Path<UserResourcePath>,
) -> ApiError {
    not_implemented(&state, "GetBudgetTemplateByID", path)
}

pub async fn update_budget_template(
    State(state): State<AppState>,
    Path(path): Path<UserResourcePath>,
) -> ApiError {
    not_implemented(&state, "UpdateBudgetTemplate", path)
}

pub async fn delete_budget_template(
    State(state): State<AppState>,
    Path(path): Path<UserResourcePath>,
) -> ApiError {
    not_implemented(&state, "DeleteBudgetTemplate", path)
}
