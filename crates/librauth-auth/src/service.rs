//! Authentication flows: register, login, refresh, logout.

use std::sync::Arc;

use librauth_core::error::AppError;
use librauth_core::result::AppResult;
use librauth_entity::User;
use uuid::Uuid;

use crate::credentials::{CredentialStore, NewUser};
use crate::jwt::issuer::{IssuedToken, TokenIssuer};
use crate::jwt::validator::TokenValidator;
use crate::password::PasswordHasher;
use crate::session::SessionRevoker;

/// An access/refresh token pair minted for a user.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TokenGrant {
    /// Short-lived access token.
    pub access: IssuedToken,
    /// Long-lived refresh token.
    pub refresh: IssuedToken,
}

/// Result of a successful register or login.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// The authenticated user record.
    pub user: User,
    /// Freshly minted token pair.
    pub tokens: TokenGrant,
}

/// Coordinates the Credential Store, hasher, and token core.
#[derive(Debug, Clone)]
pub struct AuthService {
    /// Credential Store handle.
    users: Arc<dyn CredentialStore>,
    /// Argon2id password hasher.
    hasher: PasswordHasher,
    /// Token issuer.
    issuer: Arc<TokenIssuer>,
    /// Token validator.
    validator: Arc<TokenValidator>,
    /// Session revoker.
    revoker: Arc<SessionRevoker>,
}

impl AuthService {
    /// Creates a new auth service from its collaborators.
    pub fn new(
        users: Arc<dyn CredentialStore>,
        hasher: PasswordHasher,
        issuer: Arc<TokenIssuer>,
        validator: Arc<TokenValidator>,
        revoker: Arc<SessionRevoker>,
    ) -> Self {
        Self {
            users,
            hasher,
            issuer,
            validator,
            revoker,
        }
    }

    /// Registers a new user and issues an initial token pair.
    pub async fn register(
        &self,
        email: &str,
        username: &str,
        password: &str,
    ) -> AppResult<AuthenticatedUser> {
        let email = email.trim().to_lowercase();
        let username = username.trim();
        if email.is_empty() || username.is_empty() || password.is_empty() {
            return Err(AppError::validation(
                "email, username, and password are required",
            ));
        }

        let password_hash = self.hasher.hash_password(password)?;
        let user = self
            .users
            .create(NewUser {
                email,
                username: username.to_string(),
                password_hash,
            })
            .await?;

        tracing::info!(user_id = user.id, username = %user.username, "Registered user");
        let tokens = self.grant(&user).await?;
        Ok(AuthenticatedUser { user, tokens })
    }

    /// Authenticates by email or username and issues a token pair.
    ///
    /// Unknown user and wrong password produce the same error so callers
    /// cannot tell them apart.
    pub async fn login(&self, identifier: &str, password: &str) -> AppResult<AuthenticatedUser> {
        let identifier = identifier.trim();
        if identifier.is_empty() || password.is_empty() {
            return Err(AppError::validation(
                "email/username and password are required",
            ));
        }

        let Some(user) = self.users.find_by_identifier(identifier).await? else {
            return Err(AppError::invalid_credentials());
        };
        if !self.hasher.verify_password(password, &user.password_hash)? {
            return Err(AppError::invalid_credentials());
        }

        tracing::info!(user_id = user.id, username = %user.username, "Login succeeded");
        let tokens = self.grant(&user).await?;
        Ok(AuthenticatedUser { user, tokens })
    }

    /// Mints a new access token from a valid refresh token.
    ///
    /// The refresh token is deliberately not rotated: presenting it again
    /// keeps working until it expires or is revoked.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<IssuedToken> {
        let claims = self.validator.validate_refresh(refresh_token).await?;
        let user_id = claims.user_id()?;

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User no longer exists"))?;

        tracing::info!(user_id, "Minted access token from refresh token");
        self.issuer.issue_access(user.id, &user.username).await
    }

    /// Revokes the presented access session and, if a refresh token
    /// accompanies it, the refresh session too.
    ///
    /// A refresh token that fails to decode is ignored, matching the
    /// lenient logout contract: the access session is still revoked.
    pub async fn logout(&self, access_jti: &Uuid, refresh_token: Option<&str>) -> AppResult<()> {
        self.revoker.revoke_access(access_jti).await?;

        if let Some(token) = refresh_token
            && let Some(refresh_jti) = self.validator.refresh_jti_for_revocation(token)
        {
            self.revoker.revoke_refresh(&refresh_jti).await?;
        }
        Ok(())
    }

    async fn grant(&self, user: &User) -> AppResult<TokenGrant> {
        let access = self.issuer.issue_access(user.id, &user.username).await?;
        let refresh = self.issuer.issue_refresh(user.id).await?;
        Ok(TokenGrant { access, refresh })
    }
}
