//! Router configuration for the Web API.

use axum::{
    middleware,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{
    change_password, create_project, delete_project, edit_project_form, login, login_page, logout,
    my_projects, profile, register, search_projects, session_info, update_project, AppState,
};
use super::middleware::session_layer;

/// Create the main application router.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let routes = Router::new()
        .route("/", get(session_info))
        .route("/session", get(session_info))
        .route("/login", get(login_page).post(login))
        .route("/register", axum::routing::post(register))
        .route("/logout", get(logout))
        .route("/projects", get(search_projects).post(create_project))
        .route("/projects/delete", get(delete_project))
        .route(
            "/projects/:id/edit",
            get(edit_project_form).post(update_project),
        )
        .route("/my/projects", get(my_projects))
        .route("/profile", get(profile))
        .route("/profile/password", axum::routing::post(change_password));

    routes
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn_with_state(
                    app_state.clone(),
                    session_layer,
                )),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
