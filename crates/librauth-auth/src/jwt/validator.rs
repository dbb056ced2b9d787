//! Token validation, introspection, and registry cross-checking.
//!
//! Signature validity alone is never sufficient: a token is accepted only
//! if its jti is active in the allowlist and absent from the blacklist.
//! That registry check is what makes server-side revocation of an
//! otherwise-still-valid token possible.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use uuid::Uuid;

use librauth_core::config::auth::AuthConfig;
use librauth_core::error::AppError;
use librauth_core::result::AppResult;
use librauth_core::traits::registry::RegistryProvider;
use librauth_registry::{RegistryManager, keys};

use super::claims::{Claims, TokenType};

/// Registry-side state of a token, as reported by introspection.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RegistryState {
    /// Whether the jti is present in its allowlist.
    pub allowlist: bool,
    /// Whether the jti is present in its blacklist.
    pub blacklist: bool,
}

/// Read-only diagnostic view of a token.
///
/// Deliberately more permissive than validation: expired tokens still
/// decode. Never use this for authorization decisions.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Introspection {
    /// Decoded claims (signature-verified, expiry ignored).
    pub claims: Claims,
    /// Expiration as a UTC timestamp.
    pub expires_at: DateTime<Utc>,
    /// Whether `exp` is in the past.
    pub is_expired: bool,
    /// Allowlist/blacklist membership of the jti.
    pub registry_state: RegistryState,
}

/// Validates tokens and cross-checks them against the Session Registry.
#[derive(Clone)]
pub struct TokenValidator {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration for the normal path.
    validation: Validation,
    /// Validation configuration with expiry checking disabled, for
    /// introspection and revocation of expired refresh tokens.
    validation_ignore_exp: Validation,
    /// Session Registry handle for allowlist/blacklist lookups.
    registry: Arc<RegistryManager>,
}

impl std::fmt::Debug for TokenValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenValidator")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig, registry: Arc<RegistryManager>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // 5 seconds leeway for clock skew

        let mut validation_ignore_exp = Validation::new(Algorithm::HS256);
        validation_ignore_exp.validate_exp = false;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            validation_ignore_exp,
            registry,
        }
    }

    /// Decodes and validates an access token string.
    ///
    /// Checks:
    /// 1. Signature validity
    /// 2. Expiration
    /// 3. Token type is access
    /// 4. jti blacklisted or missing from the allowlist → revoked
    pub async fn validate_access(&self, token: &str) -> AppResult<Claims> {
        let claims = self.decode_token(token)?;

        if claims.token_type != TokenType::Access {
            return Err(AppError::wrong_token_type(
                "Invalid token type: expected access token",
            ));
        }

        if self
            .registry
            .exists(&keys::access_blacklist(&claims.jti))
            .await?
        {
            return Err(AppError::revoked("Access token has been revoked"));
        }
        if !self
            .registry
            .exists(&keys::access_session(&claims.jti))
            .await?
        {
            return Err(AppError::revoked("Access token is not an active session"));
        }

        Ok(claims)
    }

    /// Decodes and validates a refresh token string against the refresh
    /// allowlist/blacklist.
    pub async fn validate_refresh(&self, token: &str) -> AppResult<Claims> {
        let claims = self.decode_token(token)?;

        if claims.token_type != TokenType::Refresh {
            return Err(AppError::wrong_token_type(
                "Invalid token type: expected refresh token",
            ));
        }

        if self
            .registry
            .exists(&keys::refresh_blacklist(&claims.jti))
            .await?
        {
            return Err(AppError::revoked("Refresh token has been revoked"));
        }
        if !self
            .registry
            .exists(&keys::refresh_session(&claims.jti))
            .await?
        {
            return Err(AppError::revoked("Refresh token is not an active session"));
        }

        Ok(claims)
    }

    /// Decodes a token for diagnostics without rejecting expired input.
    ///
    /// The signature is still verified. Expiry is computed separately and
    /// reported alongside the registry state of the jti.
    pub async fn introspect(&self, token: &str) -> AppResult<Introspection> {
        let claims = self.decode_token_ignore_exp(token)?;

        let (allow_key, bl_key) = match claims.token_type {
            TokenType::Access => (
                keys::access_session(&claims.jti),
                keys::access_blacklist(&claims.jti),
            ),
            TokenType::Refresh => (
                keys::refresh_session(&claims.jti),
                keys::refresh_blacklist(&claims.jti),
            ),
        };

        let allowlist = self.registry.exists(&allow_key).await?;
        let blacklist = self.registry.exists(&bl_key).await?;

        Ok(Introspection {
            expires_at: claims.expires_at(),
            is_expired: claims.is_expired(),
            registry_state: RegistryState {
                allowlist,
                blacklist,
            },
            claims,
        })
    }

    /// Extracts the jti of a refresh token for revocation purposes.
    ///
    /// Expiry is ignored so an expired refresh token can still be revoked
    /// on logout. Returns `None` for anything that does not decode as a
    /// refresh token; logout treats that as "nothing to revoke".
    pub fn refresh_jti_for_revocation(&self, token: &str) -> Option<Uuid> {
        match self.decode_token_ignore_exp(token) {
            Ok(claims) if claims.token_type == TokenType::Refresh => Some(claims.jti),
            Ok(_) => None,
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring undecodable refresh token on logout");
                None
            }
        }
    }

    /// Internal decode with full validation, without type checking.
    fn decode_token(&self, token: &str) -> AppResult<Claims> {
        Self::map_decode(decode::<Claims>(token, &self.decoding_key, &self.validation))
    }

    /// Internal decode that skips expiry validation.
    fn decode_token_ignore_exp(&self, token: &str) -> AppResult<Claims> {
        Self::map_decode(decode::<Claims>(
            token,
            &self.decoding_key,
            &self.validation_ignore_exp,
        ))
    }

    fn map_decode(
        result: jsonwebtoken::errors::Result<jsonwebtoken::TokenData<Claims>>,
    ) -> AppResult<Claims> {
        result.map(|data| data.claims).map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                AppError::expired("Token has expired")
            }
            jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                AppError::invalid_signature("Invalid token signature")
            }
            jsonwebtoken::errors::ErrorKind::InvalidToken => {
                AppError::malformed_token("Invalid token format")
            }
            _ => AppError::malformed_token(format!("Token validation failed: {e}")),
        })
    }
}
