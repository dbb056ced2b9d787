//! Integration tests for the register/login/profile/logout flow.

mod helpers;

use http::StatusCode;

use helpers::{TestApp, token_field};

#[tokio::test]
async fn test_register_returns_user_and_tokens() {
    let app = TestApp::new();

    let body = app
        .register("Alice@Example.com", "alice", "password123")
        .await;

    // Email is normalized to lowercase and the hash never leaks.
    assert_eq!(body["user"]["email"], "alice@example.com");
    assert_eq!(body["user"]["username"], "alice");
    assert!(body["user"].get("password_hash").is_none());
    assert!(body["tokens"].get("access_token").is_some());
    assert!(body["tokens"].get("refresh_token").is_some());
}

#[tokio::test]
async fn test_register_duplicate_conflict() {
    let app = TestApp::new();
    app.register("a@test.com", "alice", "password123").await;

    let response = app
        .request(
            "POST",
            "/auth/register",
            Some(serde_json::json!({
                "email": "a@test.com",
                "username": "alice",
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_missing_fields_is_bad_request() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/auth/register",
            Some(serde_json::json!({
                "email": "",
                "username": "",
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_by_email_or_username() {
    let app = TestApp::new();
    app.register("a@test.com", "alice", "password123").await;

    app.login("alice", "password123").await;
    app.login("a@test.com", "password123").await;
}

#[tokio::test]
async fn test_login_failures_look_identical() {
    let app = TestApp::new();
    app.register("a@test.com", "alice", "password123").await;

    let wrong_password = app
        .request(
            "POST",
            "/auth/login",
            Some(serde_json::json!({
                "identifier": "alice",
                "password": "wrongpassword",
            })),
            None,
        )
        .await;
    let unknown_user = app
        .request(
            "POST",
            "/auth/login",
            Some(serde_json::json!({
                "identifier": "nobody",
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status, StatusCode::UNAUTHORIZED);
    // Same body for both, so the failure mode is not enumerable.
    assert_eq!(wrong_password.body, unknown_user.body);
}

#[tokio::test]
async fn test_profile_requires_valid_token() {
    let app = TestApp::new();
    let registered = app.register("a@test.com", "alice", "password123").await;
    let access = token_field(&registered, "access_token");

    let response = app.request("GET", "/api/profile", None, Some(access)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["username"], "alice");

    let response = app.request("GET", "/api/profile", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request("GET", "/api/profile", None, Some("not.a.token"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_revokes_access_session() {
    let app = TestApp::new();
    let registered = app.register("a@test.com", "alice", "password123").await;
    let access = token_field(&registered, "access_token").to_string();

    let response = app
        .request("POST", "/auth/logout", None, Some(&access))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    // Token should now be invalid
    let response = app
        .request("GET", "/api/profile", None, Some(&access))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_with_refresh_token_revokes_both() {
    let app = TestApp::new();
    let registered = app.register("a@test.com", "alice", "password123").await;
    let access = token_field(&registered, "access_token").to_string();
    let refresh = token_field(&registered, "refresh_token").to_string();

    let response = app
        .request(
            "POST",
            "/auth/logout",
            Some(serde_json::json!({ "refresh_token": refresh })),
            Some(&access),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request(
            "POST",
            "/auth/refresh",
            Some(serde_json::json!({ "refresh_token": refresh })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_ignores_garbage_refresh_token() {
    let app = TestApp::new();
    let registered = app.register("a@test.com", "alice", "password123").await;
    let access = token_field(&registered, "access_token").to_string();

    let response = app
        .request(
            "POST",
            "/auth/logout",
            Some(serde_json::json!({ "refresh_token": "garbage" })),
            Some(&access),
        )
        .await;

    // Lenient contract: the access session is still revoked.
    assert_eq!(response.status, StatusCode::OK);
    let response = app
        .request("GET", "/api/profile", None, Some(&access))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_requires_access_token() {
    let app = TestApp::new();

    let response = app.request("POST", "/auth/logout", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new();

    let response = app.request("GET", "/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["registry"], true);
}
