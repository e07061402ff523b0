//! Shared helpers for Web API integration tests.

use axum_test::{TestServer, TestServerConfig};
use projtrack::config::SecurityConfig;
use projtrack::web::handlers::AppState;
use projtrack::web::router::create_router;
use projtrack::Database;
use serde_json::{json, Value};
use std::sync::Arc;

/// Create a test server over an in-memory database with default
/// security settings.
pub async fn create_test_server() -> TestServer {
    create_test_server_with_security(SecurityConfig::default()).await
}

/// Create a test server with specific lockout/timeout settings.
pub async fn create_test_server_with_security(security: SecurityConfig) -> TestServer {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");

    let app_state = Arc::new(AppState::new(db, &security));
    let router = create_router(app_state);

    let config = TestServerConfig {
        save_cookies: true,
        ..TestServerConfig::default()
    };

    TestServer::new_with_config(router, config).expect("Failed to create test server")
}

/// Fetch the current session's CSRF token.
pub async fn csrf_token(server: &TestServer) -> String {
    let response = server.get("/session").await;
    let body: Value = response.json();
    body["data"]["csrf_token"]
        .as_str()
        .expect("csrf_token missing")
        .to_string()
}

/// Register a user through the API.
pub async fn register_user(server: &TestServer, username: &str, email: &str, password: &str) {
    let token = csrf_token(server).await;
    let response = server
        .post("/register")
        .form(&json!({
            "csrf_token": token,
            "firstname": "Test",
            "lastname": "User",
            "email": email,
            "username": username,
            "password": password,
            "confirm_password": password,
        }))
        .await;
    response.assert_status_ok();
}

/// Log a user in through the API.
pub async fn login_user(server: &TestServer, username: &str, password: &str) {
    let token = csrf_token(server).await;
    let response = server
        .post("/login")
        .form(&json!({
            "csrf_token": token,
            "username": username,
            "password": password,
        }))
        .await;
    response.assert_status(axum::http::StatusCode::SEE_OTHER);
}

/// Log the current user out.
pub async fn logout_user(server: &TestServer) {
    let response = server.get("/logout").await;
    response.assert_status(axum::http::StatusCode::SEE_OTHER);
}

/// Create a project for the logged-in user and return its ID.
pub async fn create_project(server: &TestServer, title: &str, start_date: &str) -> i64 {
    let token = csrf_token(server).await;
    let response = server
        .post("/projects")
        .form(&json!({
            "csrf_token": token,
            "title": title,
            "short_description": "A test project",
            "start_date": start_date,
            "end_date": "",
            "phase": "design",
        }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    body["data"]["id"].as_i64().expect("project id missing")
}
