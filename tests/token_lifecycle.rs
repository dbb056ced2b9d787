//! Integration tests for refresh and introspection.

mod helpers;

use http::StatusCode;

use helpers::{TestApp, token_field};

#[tokio::test]
async fn test_refresh_mints_new_access_token() {
    let app = TestApp::new();
    let registered = app.register("a@test.com", "alice", "password123").await;
    let refresh = token_field(&registered, "refresh_token").to_string();

    let response = app
        .request(
            "POST",
            "/auth/refresh",
            Some(serde_json::json!({ "refresh_token": refresh })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let new_access = response.body["access_token"].as_str().unwrap().to_string();
    assert_ne!(new_access, token_field(&registered, "access_token"));

    // The minted token authenticates immediately.
    let response = app
        .request("GET", "/api/profile", None, Some(&new_access))
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_token_is_reusable() {
    let app = TestApp::new();
    let registered = app.register("a@test.com", "alice", "password123").await;
    let refresh = token_field(&registered, "refresh_token").to_string();
    let body = serde_json::json!({ "refresh_token": refresh });

    // No rotation: the same refresh token works repeatedly.
    let first = app
        .request("POST", "/auth/refresh", Some(body.clone()), None)
        .await;
    let second = app.request("POST", "/auth/refresh", Some(body), None).await;

    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(second.status, StatusCode::OK);
    assert_ne!(first.body["access_jti"], second.body["access_jti"]);
}

#[tokio::test]
async fn test_refresh_rejects_access_token() {
    let app = TestApp::new();
    let registered = app.register("a@test.com", "alice", "password123").await;
    let access = token_field(&registered, "access_token").to_string();

    let response = app
        .request(
            "POST",
            "/auth/refresh",
            Some(serde_json::json!({ "refresh_token": access })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_rejects_garbage() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/auth/refresh",
            Some(serde_json::json!({ "refresh_token": "garbage" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_introspect_active_access_token() {
    let app = TestApp::new();
    let registered = app.register("a@test.com", "alice", "password123").await;
    let access = token_field(&registered, "access_token").to_string();

    let response = app
        .request(
            "POST",
            "/auth/introspect",
            Some(serde_json::json!({ "token": access })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["decoded"]["username"], "alice");
    assert_eq!(response.body["decoded"]["type"], "access");
    assert_eq!(response.body["is_expired"], false);
    assert_eq!(response.body["registry_state"]["allowlist"], true);
    assert_eq!(response.body["registry_state"]["blacklist"], false);
}

#[tokio::test]
async fn test_introspect_revoked_token_shows_blacklist() {
    let app = TestApp::new();
    let registered = app.register("a@test.com", "alice", "password123").await;
    let access = token_field(&registered, "access_token").to_string();

    app.request("POST", "/auth/logout", None, Some(&access))
        .await;

    let response = app
        .request(
            "POST",
            "/auth/introspect",
            Some(serde_json::json!({ "token": access })),
            None,
        )
        .await;

    // Introspection reports state rather than rejecting the token.
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["registry_state"]["allowlist"], false);
    assert_eq!(response.body["registry_state"]["blacklist"], true);
}

#[tokio::test]
async fn test_introspect_refresh_token() {
    let app = TestApp::new();
    let registered = app.register("a@test.com", "alice", "password123").await;
    let refresh = token_field(&registered, "refresh_token").to_string();

    let response = app
        .request(
            "POST",
            "/auth/introspect",
            Some(serde_json::json!({ "token": refresh })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["decoded"]["type"], "refresh");
    // Refresh claims carry no username.
    assert!(response.body["decoded"].get("username").is_none());
    assert_eq!(response.body["registry_state"]["allowlist"], true);
}

#[tokio::test]
async fn test_logout_moves_jti_from_allowlist_to_blacklist() {
    use librauth_core::traits::registry::RegistryProvider;
    use librauth_registry::keys;
    use uuid::Uuid;

    let app = TestApp::new();
    let registered = app.register("a@test.com", "alice", "password123").await;
    let access = token_field(&registered, "access_token").to_string();
    let jti: Uuid = registered["tokens"]["access_jti"]
        .as_str()
        .unwrap()
        .parse()
        .unwrap();

    assert!(
        app.registry
            .exists(&keys::access_session(&jti))
            .await
            .unwrap()
    );

    app.request("POST", "/auth/logout", None, Some(&access))
        .await;

    assert!(
        !app.registry
            .exists(&keys::access_session(&jti))
            .await
            .unwrap()
    );
    assert!(
        app.registry
            .exists(&keys::access_blacklist(&jti))
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn test_introspect_garbage_is_bad_request() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/auth/introspect",
            Some(serde_json::json!({ "token": "not.a.token" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
