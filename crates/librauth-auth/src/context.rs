//! Per-request identity context.

use uuid::Uuid;

use librauth_core::error::AppError;
use librauth_core::result::AppResult;

use crate::jwt::Claims;

/// Authenticated identity attached to a request after access-token
/// validation. Replaces ad-hoc per-request globals.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Authenticated user ID.
    pub user_id: i64,
    /// Authenticated username.
    pub username: String,
    /// jti of the access token that authenticated this request, kept for
    /// logout/revocation.
    pub access_jti: Uuid,
}

impl RequestContext {
    /// Builds a context from validated access-token claims.
    pub fn from_claims(claims: &Claims) -> AppResult<Self> {
        let username = claims
            .username
            .clone()
            .ok_or_else(|| AppError::malformed_token("Access token is missing username"))?;

        Ok(Self {
            user_id: claims.user_id()?,
            username,
            access_jti: claims.jti,
        })
    }
}
