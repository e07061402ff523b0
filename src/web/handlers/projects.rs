//! Project CRUD handlers.
//!
//! Every mutation is authorized twice: the `CurrentUser` gate rejects
//! anonymous requests, and the repository binds the owner ID into the
//! WHERE clause so a non-owner's mutation touches zero rows. Ownership
//! mismatches are indistinguishable from missing projects.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
    Extension, Form, Json,
};
use serde_json::json;
use tracing::{error, info};

use crate::db::{NewProject, ProjectRepository};
use crate::projects::validate_project;
use crate::session::Session;
use crate::web::dto::{
    ApiResponse, DeleteParams, MessageResponse, ProjectForm, ProjectResponse,
};
use crate::web::error::ApiError;
use crate::web::middleware::CurrentUser;

use super::AppState;

/// Echo of a submitted project form for re-display after validation
/// failure.
fn echo_form(form: &ProjectForm) -> serde_json::Value {
    json!({
        "title": form.title.trim(),
        "short_description": form.short_description.trim(),
        "start_date": form.start_date.trim(),
        "end_date": form.end_date.trim(),
        "phase": form.phase.trim(),
    })
}

/// GET /my/projects - the current user's projects, most recent start
/// date first.
pub async fn my_projects(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<ApiResponse<Vec<ProjectResponse>>>, ApiError> {
    let repo = ProjectRepository::new(state.db.pool());
    let projects = repo
        .list_by_owner(user.id)
        .await
        .map_err(ApiError::storage)?;

    Ok(Json(ApiResponse::new(
        projects.into_iter().map(ProjectResponse::from).collect(),
    )))
}

/// POST /projects - add a new project owned by the current user.
pub async fn create_project(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Extension(session): Extension<Session>,
    Form(form): Form<ProjectForm>,
) -> Result<Json<ApiResponse<ProjectResponse>>, ApiError> {
    if !session.verify_csrf(&form.csrf_token) {
        return Err(ApiError::csrf_mismatch());
    }

    let input = validate_project(
        &form.title,
        &form.short_description,
        &form.start_date,
        &form.end_date,
        &form.phase,
    )
    .map_err(|errors| ApiError::validation(errors).with_input(echo_form(&form)))?;

    let repo = ProjectRepository::new(state.db.pool());
    let project = repo
        .create(&NewProject {
            owner_id: user.id,
            title: input.title,
            short_description: input.short_description,
            start_date: input.start_date,
            end_date: input.end_date,
            phase: input.phase,
        })
        .await
        .map_err(ApiError::storage)?;

    info!(project_id = project.id, owner_id = user.id, "Project added");

    Ok(Json(ApiResponse::new(ProjectResponse::from(project))))
}

/// GET /projects/:id/edit - fetch a project for editing.
///
/// Wrong ID and wrong owner are the same outcome.
pub async fn edit_project_form(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<ProjectResponse>>, ApiError> {
    let repo = ProjectRepository::new(state.db.pool());
    let project = repo
        .get_owned(id, user.id)
        .await
        .map_err(ApiError::storage)?
        .ok_or_else(|| ApiError::not_found("Project not found."))?;

    Ok(Json(ApiResponse::new(ProjectResponse::from(project))))
}

/// POST /projects/:id/edit - update a project.
pub async fn update_project(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Extension(session): Extension<Session>,
    Path(id): Path<i64>,
    Form(form): Form<ProjectForm>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    if !session.verify_csrf(&form.csrf_token) {
        return Err(ApiError::csrf_mismatch());
    }

    let input = validate_project(
        &form.title,
        &form.short_description,
        &form.start_date,
        &form.end_date,
        &form.phase,
    )
    .map_err(|errors| ApiError::validation(errors).with_input(echo_form(&form)))?;

    let repo = ProjectRepository::new(state.db.pool());
    let updated = repo
        .update_owned(
            id,
            &NewProject {
                owner_id: user.id,
                title: input.title,
                short_description: input.short_description,
                start_date: input.start_date,
                end_date: input.end_date,
                phase: input.phase,
            },
        )
        .await
        .map_err(ApiError::storage)?;

    if !updated {
        return Err(ApiError::not_found("Project not found."));
    }

    info!(project_id = id, owner_id = user.id, "Project updated");

    Ok(Json(ApiResponse::new(MessageResponse::new(
        "Project updated successfully!",
    ))))
}

/// GET /projects/delete?pid=&csrf= - delete a project via the
/// confirmation link.
///
/// The outcome is reported through redirect indicators on the
/// My Projects page. A missing token or mismatch aborts before any
/// persistence work.
pub async fn delete_project(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Extension(session): Extension<Session>,
    Query(params): Query<DeleteParams>,
) -> Result<Response, ApiError> {
    let Some(pid) = params.pid else {
        return Ok(Redirect::to("/my/projects?error=noproject").into_response());
    };

    if !session.verify_csrf(params.csrf.as_deref().unwrap_or("")) {
        return Err(ApiError::csrf_mismatch());
    }

    let repo = ProjectRepository::new(state.db.pool());
    let redirect = match repo.delete_owned(pid, user.id).await {
        Ok(true) => {
            info!(project_id = pid, owner_id = user.id, "Project deleted");
            Redirect::to("/my/projects?deleted=1")
        }
        // Wrong pid or not this user's project
        Ok(false) => Redirect::to("/my/projects?error=notfound"),
        Err(e) => {
            error!("Project delete failed: {e}");
            Redirect::to("/my/projects?error=db")
        }
    };

    Ok(redirect.into_response())
}
