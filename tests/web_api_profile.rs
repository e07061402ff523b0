//! Web API profile tests.

mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::Value;

#[tokio::test]
async fn test_profile_shows_details_and_project_count() {
    let server = create_test_server().await;
    register_user(&server, "jolee", "jo@example.com", "P@ssw0rd!").await;
    login_user(&server, "jolee", "P@ssw0rd!").await;

    create_project(&server, "One", "2024-01-01").await;
    create_project(&server, "Two", "2024-02-01").await;

    let response = server.get("/profile").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["data"]["username"], "jolee");
    assert_eq!(body["data"]["full_name"], "Test User");
    assert_eq!(body["data"]["email"], "jo@example.com");
    assert_eq!(body["data"]["project_count"], 2);
    assert!(body["data"]["created_at"].as_str().is_some());
}

#[tokio::test]
async fn test_profile_requires_login() {
    let server = create_test_server().await;

    let response = server.get("/profile").await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location").to_str().unwrap(), "/login");
}

#[tokio::test]
async fn test_profile_never_exposes_password_hash() {
    let server = create_test_server().await;
    register_user(&server, "jolee", "jo@example.com", "P@ssw0rd!").await;
    login_user(&server, "jolee", "P@ssw0rd!").await;

    let body: Value = server.get("/profile").await.json();
    assert!(body["data"].get("password").is_none());

    let text = body.to_string();
    assert!(!text.contains("argon2"));
    assert!(!text.contains("P@ssw0rd!"));
}
