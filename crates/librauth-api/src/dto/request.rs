//! Request payloads.

use serde::{Deserialize, Serialize};

/// Payload for `POST /auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Email address (stored lowercase).
    pub email: String,
    /// Display username.
    pub username: String,
    /// Plain-text password, hashed server-side.
    pub password: String,
}

/// Payload for `POST /auth/login`.
///
/// `identifier` accepts either the email or the username.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Email or username.
    pub identifier: String,
    /// Plain-text password.
    pub password: String,
}

/// Payload for `POST /auth/refresh`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// Refresh token previously issued at login or registration.
    pub refresh_token: String,
}

/// Payload for `POST /auth/logout`.
///
/// The body is optional; when present, the refresh token is revoked
/// alongside the access session from the Authorization header.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogoutRequest {
    /// Refresh token to revoke, if the client still holds one.
    pub refresh_token: Option<String>,
}

/// Payload for `POST /auth/introspect`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntrospectRequest {
    /// Token to inspect (access or refresh).
    pub token: String,
}
