//! Profile and password-change handlers.

use std::sync::Arc;

use axum::{extract::State, Extension, Form, Json};

use crate::auth::{self, ChangePasswordError, ChangePasswordRequest};
use crate::db::{ProjectRepository, UserRepository};
use crate::session::Session;
use crate::web::dto::{ApiResponse, ChangePasswordForm, MessageResponse, ProfileResponse};
use crate::web::error::ApiError;
use crate::web::middleware::CurrentUser;

use super::AppState;

/// GET /profile - the current user's details and project count.
pub async fn profile(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<ApiResponse<ProfileResponse>>, ApiError> {
    let users = UserRepository::new(state.db.pool());
    let record = users
        .get_by_id(user.id)
        .await
        .map_err(ApiError::storage)?
        .ok_or_else(|| ApiError::not_found("User not found."))?;

    let projects = ProjectRepository::new(state.db.pool());
    let project_count = projects
        .count_by_owner(user.id)
        .await
        .map_err(ApiError::storage)?;

    Ok(Json(ApiResponse::new(ProfileResponse::new(
        &record,
        project_count,
    ))))
}

/// POST /profile/password - change the current user's password.
pub async fn change_password(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Extension(session): Extension<Session>,
    Form(form): Form<ChangePasswordForm>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    if !session.verify_csrf(&form.csrf_token) {
        return Err(ApiError::csrf_mismatch());
    }

    let users = UserRepository::new(state.db.pool());
    let record = users
        .get_by_id(user.id)
        .await
        .map_err(ApiError::storage)?
        .ok_or_else(|| ApiError::not_found("User not found."))?;

    let request = ChangePasswordRequest::new(
        &form.current_password,
        &form.new_password,
        &form.confirm_new_password,
    );

    auth::change_password(&users, &record, &request)
        .await
        .map_err(|e| match e {
            ChangePasswordError::Validation(errors) => ApiError::validation(errors),
            ChangePasswordError::Storage(detail) => ApiError::storage(detail),
        })?;

    Ok(Json(ApiResponse::new(MessageResponse::new(
        "Your password has been updated successfully!",
    ))))
}
