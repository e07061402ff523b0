//! Authentication gate for protected routes.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};

use crate::session::{Session, SessionUser};

/// Rejection that sends unauthenticated visitors to the login page.
#[derive(Debug)]
pub struct AuthRedirect;

impl IntoResponse for AuthRedirect {
    fn into_response(self) -> Response {
        Redirect::to("/login").into_response()
    }
}

/// Extractor for the authenticated user on protected routes.
///
/// Handlers that take `CurrentUser` never run for anonymous visitors;
/// the request is answered with a redirect to the login page instead.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub SessionUser);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AuthRedirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .and_then(|session| session.user.clone())
            .map(CurrentUser)
            .ok_or(AuthRedirect)
    }
}
