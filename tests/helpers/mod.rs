//! Shared test helpers for integration tests.
//!
//! The app under test runs entirely in memory: the Session Registry is the
//! memory provider and the Credential Store is a HashMap-backed double, so
//! no Redis or MariaDB is needed.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use chrono::Utc;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use librauth_auth::credentials::{CredentialStore, NewUser};
use librauth_core::config::AppConfig;
use librauth_core::error::AppError;
use librauth_core::result::AppResult;
use librauth_entity::User;
use librauth_registry::RegistryManager;
use librauth_registry::memory::MemoryRegistryProvider;

/// HashMap-backed Credential Store double.
#[derive(Debug, Default)]
struct MemoryCredentialStore {
    users: Mutex<HashMap<i64, User>>,
    next_id: AtomicI64,
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_identifier(&self, identifier: &str) -> AppResult<Option<User>> {
        let identifier = identifier.to_lowercase();
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| {
                u.email.to_lowercase() == identifier || u.username.to_lowercase() == identifier
            })
            .cloned())
    }

    async fn create(&self, user: NewUser) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();
        if users
            .values()
            .any(|u| u.email == user.email || u.username == user.username)
        {
            return Err(AppError::conflict("Email or username already exists"));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let stored = User {
            id,
            email: user.email,
            username: user.username,
            password_hash: user.password_hash,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        users.insert(id, stored.clone());
        Ok(stored)
    }
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Session Registry handle for direct assertions
    pub registry: Arc<RegistryManager>,
}

impl TestApp {
    /// Create a new test application over in-memory stores.
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = "integration-test-secret".to_string();

        let registry = Arc::new(RegistryManager::from_provider(Arc::new(
            MemoryRegistryProvider::new(),
        )));
        let users: Arc<dyn CredentialStore> = Arc::new(MemoryCredentialStore::default());

        let router = librauth_api::build_app(Arc::new(config), Arc::clone(&registry), users);

        Self { router, registry }
    }

    /// Register a user and return the parsed response body.
    pub async fn register(&self, email: &str, username: &str, password: &str) -> Value {
        let response = self
            .request(
                "POST",
                "/auth/register",
                Some(serde_json::json!({
                    "email": email,
                    "username": username,
                    "password": password,
                })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Registration failed: {:?}",
            response.body
        );
        response.body
    }

    /// Login and return the full token grant body.
    pub async fn login(&self, identifier: &str, password: &str) -> Value {
        let response = self
            .request(
                "POST",
                "/auth/login",
                Some(serde_json::json!({
                    "identifier": identifier,
                    "password": password,
                })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );
        response.body
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder().method(method).uri(path);

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = match body {
            Some(body) => req
                .header("Content-Type", "application/json")
                .body(Body::from(
                    serde_json::to_string(&body).expect("Failed to serialize body"),
                )),
            None => req.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

/// Pulls a token string out of a register/login response body.
pub fn token_field<'a>(body: &'a Value, field: &str) -> &'a str {
    body.get("tokens")
        .and_then(|t| t.get(field))
        .and_then(|v| v.as_str())
        .unwrap_or_else(|| panic!("No {field} in response: {body:?}"))
}
