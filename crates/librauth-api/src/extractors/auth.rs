//! `AuthUser` extractor — pulls the access token from the Authorization
//! header, validates it against the Session Registry, and injects context.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use librauth_auth::context::RequestContext;
use librauth_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Extract Bearer token from Authorization header
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::malformed_token("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::malformed_token("Invalid Authorization header format"))?;

        // Signature, expiry, type, and allowlist/blacklist checks
        let claims = state.validator.validate_access(token).await?;

        let ctx = RequestContext::from_claims(&claims)?;
        Ok(AuthUser(ctx))
    }
}
