//! Session middleware.
//!
//! Every request passes through here first: the session named by the
//! cookie is loaded (or a fresh one created), inactivity is checked,
//! and the session is made available to handlers through request
//! extensions. Expired sessions are destroyed and the visitor is
//! redirected to the login page with an `expired` indicator.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::web::handlers::AppState;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "sid";

/// Routes where the inactivity timeout does not apply.
///
/// Login and registration must stay reachable after an expiry, and
/// neither refreshes the activity clock.
fn is_exempt(path: &str) -> bool {
    matches!(path, "/login" | "/register")
}

/// Load-or-create the session for this request.
pub async fn session_layer(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let cookie_value = jar.get(SESSION_COOKIE).map(|c| c.value().to_string());
    let loaded = state.sessions.load_or_create(cookie_value.as_deref());
    let exempt = is_exempt(request.uri().path());

    let mut session = loaded.session;

    if !exempt {
        if !loaded.is_new && state.sessions.is_expired(&session) {
            state.sessions.destroy(&session.id);
            let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
            return (jar, Redirect::to("/login?expired=true")).into_response();
        }
        state.sessions.touch(&mut session);
    }

    request.extensions_mut().insert(session.clone());
    let response = next.run(request).await;

    if loaded.is_new {
        let cookie = Cookie::build((SESSION_COOKIE, session.id))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax);
        (jar.add(cookie), response).into_response()
    } else {
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exempt_routes() {
        assert!(is_exempt("/login"));
        assert!(is_exempt("/register"));
        assert!(!is_exempt("/"));
        assert!(!is_exempt("/projects"));
        assert!(!is_exempt("/my/projects"));
        assert!(!is_exempt("/logout"));
    }
}
