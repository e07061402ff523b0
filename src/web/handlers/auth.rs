//! Authentication handlers: register, login, logout, session state.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
    Extension, Form, Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::auth::{
    hash_password, validate_registration, RegistrationRequest, ValidationError,
};
use crate::db::{NewUser, UserRepository};
use crate::session::{Session, SessionUser};
use crate::web::dto::{
    ApiResponse, LoginForm, LoginPageResponse, MessageResponse, RegisterForm, SessionResponse,
};
use crate::web::error::ApiError;

use super::AppState;

/// GET / and GET /session - current session state.
///
/// Exposes the CSRF token the HTML layer would embed in its forms.
pub async fn session_info(
    Extension(session): Extension<Session>,
) -> Json<ApiResponse<SessionResponse>> {
    let response = SessionResponse {
        authenticated: session.is_authenticated(),
        username: session.user.as_ref().map(|u| u.username.clone()),
        firstname: session.user.as_ref().map(|u| u.firstname.clone()),
        csrf_token: session.csrf_token.clone(),
    };
    Json(ApiResponse::new(response))
}

/// Query string for the login page.
#[derive(Debug, Default, Deserialize)]
pub struct LoginPageParams {
    /// Set to "true" when arriving from a session expiry redirect.
    #[serde(default)]
    pub expired: Option<String>,
}

/// GET /login - login page state.
pub async fn login_page(
    Extension(session): Extension<Session>,
    Query(params): Query<LoginPageParams>,
) -> Json<ApiResponse<LoginPageResponse>> {
    let response = LoginPageResponse {
        expired: params.expired.as_deref() == Some("true"),
        csrf_token: session.csrf_token.clone(),
    };
    Json(ApiResponse::new(response))
}

/// POST /login - verify credentials and attach the user to the session.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    Form(form): Form<LoginForm>,
) -> Result<Response, ApiError> {
    // Logged-in users go straight to the home page
    if session.is_authenticated() {
        return Ok(Redirect::to("/").into_response());
    }

    if !session.verify_csrf(&form.csrf_token) {
        return Err(ApiError::csrf_mismatch());
    }

    let repo = UserRepository::new(state.db.pool());
    let user = crate::auth::login(
        &repo,
        &state.lockout,
        form.username.trim(),
        form.password.trim(),
    )
    .await?;

    state.sessions.attach_user(
        &session.id,
        SessionUser {
            id: user.id,
            username: user.username,
            firstname: user.firstname,
        },
    );

    Ok(Redirect::to("/").into_response())
}

/// POST /register - create a new account.
pub async fn register(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    Form(form): Form<RegisterForm>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    if !session.verify_csrf(&form.csrf_token) {
        return Err(ApiError::csrf_mismatch());
    }

    let request = RegistrationRequest::new(
        &form.firstname,
        &form.lastname,
        &form.email,
        &form.username,
        &form.password,
        &form.confirm_password,
    );

    // Echo sanitized input for form re-display; never the passwords
    let echo = json!({
        "firstname": request.firstname.as_str(),
        "lastname": request.lastname.as_str(),
        "email": request.email.as_str(),
        "username": request.username.as_str(),
    });

    validate_registration(&request)
        .map_err(|e| ApiError::validation(vec![e.to_string()]).with_input(echo.clone()))?;

    let repo = UserRepository::new(state.db.pool());
    if repo
        .username_or_email_exists(&request.username, &request.email)
        .await
        .map_err(ApiError::storage)?
    {
        return Err(
            ApiError::validation(vec![ValidationError::AlreadyExists.to_string()])
                .with_input(echo),
        );
    }

    let password_hash = hash_password(&request.password).map_err(ApiError::storage)?;

    let user = repo
        .create(&NewUser::new(
            &request.username,
            &request.email,
            &request.firstname,
            &request.lastname,
            password_hash,
        ))
        .await
        .map_err(ApiError::storage)?;

    info!(username = %user.username, user_id = user.id, "New user registered");

    Ok(Json(ApiResponse::new(MessageResponse::new(
        "Registration successful! You may now log in.",
    ))))
}

/// GET /logout - destroy the session and return to the login page.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    jar: axum_extra::extract::cookie::CookieJar,
) -> Response {
    state.sessions.destroy(&session.id);

    let jar = jar.remove(
        axum_extra::extract::cookie::Cookie::build(crate::web::middleware::SESSION_COOKIE)
            .path("/"),
    );
    (jar, Redirect::to("/login")).into_response()
}
