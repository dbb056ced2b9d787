//! Response payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use librauth_auth::jwt::claims::Claims;
use librauth_auth::jwt::validator::{Introspection, RegistryState};
use librauth_auth::service::TokenGrant;
use librauth_entity::User;

/// Public view of a user record. Never exposes the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            created_at: user.created_at,
        }
    }
}

/// Token pair returned on register and login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenGrantResponse {
    pub access_token: String,
    pub access_jti: Uuid,
    pub access_expires_at: DateTime<Utc>,
    pub refresh_token: String,
    pub refresh_jti: Uuid,
    pub refresh_expires_at: DateTime<Utc>,
}

impl From<TokenGrant> for TokenGrantResponse {
    fn from(grant: TokenGrant) -> Self {
        Self {
            access_token: grant.access.token,
            access_jti: grant.access.jti,
            access_expires_at: grant.access.expires_at,
            refresh_token: grant.refresh.token,
            refresh_jti: grant.refresh.jti,
            refresh_expires_at: grant.refresh.expires_at,
        }
    }
}

/// Response for register and login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub message: String,
    pub user: UserResponse,
    pub tokens: TokenGrantResponse,
}

/// Response for `POST /auth/refresh`: a fresh access token only.
///
/// The refresh token is not rotated, so it is not echoed back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
    pub access_jti: Uuid,
    pub access_expires_at: DateTime<Utc>,
}

/// Plain confirmation message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Diagnostic report for `POST /auth/introspect`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntrospectResponse {
    /// Decoded claims. The signature was verified; expiry was not enforced.
    pub decoded: Claims,
    pub expires_at: DateTime<Utc>,
    pub is_expired: bool,
    /// Allowlist/blacklist membership of the jti.
    pub registry_state: RegistryState,
}

impl From<Introspection> for IntrospectResponse {
    fn from(report: Introspection) -> Self {
        Self {
            decoded: report.claims,
            expires_at: report.expires_at,
            is_expired: report.is_expired,
            registry_state: report.registry_state,
        }
    }
}

/// Response for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"ok"` when all backing stores respond, `"degraded"` otherwise.
    pub status: String,
    /// Whether the Session Registry answered its ping.
    pub registry: bool,
}
