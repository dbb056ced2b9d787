//! Token creation with allowlist registration.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use librauth_core::config::auth::AuthConfig;
use librauth_core::error::AppError;
use librauth_core::result::AppResult;
use librauth_core::traits::registry::RegistryProvider;
use librauth_registry::{RegistryManager, keys};

use super::claims::{Claims, TokenType};

/// Result of a successful token issuance.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct IssuedToken {
    /// The signed token string.
    pub token: String,
    /// Token ID registered in the Session Registry.
    pub jti: Uuid,
    /// Expiration timestamp.
    pub expires_at: DateTime<Utc>,
}

/// Creates signed access and refresh tokens and registers them in the
/// Session Registry with a TTL matching their expiry.
#[derive(Clone)]
pub struct TokenIssuer {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Access token TTL in minutes.
    access_ttl_minutes: i64,
    /// Refresh token TTL in days.
    refresh_ttl_days: i64,
    /// Session Registry handle.
    registry: Arc<RegistryManager>,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("access_ttl_minutes", &self.access_ttl_minutes)
            .field("refresh_ttl_days", &self.refresh_ttl_days)
            .finish()
    }
}

impl TokenIssuer {
    /// Creates a new issuer from auth configuration.
    pub fn new(config: &AuthConfig, registry: Arc<RegistryManager>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            access_ttl_minutes: config.access_ttl_minutes as i64,
            refresh_ttl_days: config.refresh_ttl_days as i64,
            registry,
        }
    }

    /// Issues a new access token for the given user and registers its jti
    /// in the access allowlist.
    pub async fn issue_access(&self, user_id: i64, username: &str) -> AppResult<IssuedToken> {
        let now = Utc::now();
        let exp = now + chrono::Duration::minutes(self.access_ttl_minutes);
        let jti = Uuid::new_v4();

        let claims = Claims {
            sub: user_id.to_string(),
            username: Some(username.to_string()),
            token_type: TokenType::Access,
            jti,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))?;

        let user_id_str = user_id.to_string();
        self.registry
            .set_hash(
                &keys::access_session(&jti),
                &[("user_id", user_id_str.as_str()), ("username", username)],
                Duration::from_secs(claims.remaining_ttl_seconds().max(1)),
            )
            .await?;

        tracing::debug!(user_id, %jti, "Issued access token");
        Ok(IssuedToken {
            token,
            jti,
            expires_at: exp,
        })
    }

    /// Issues a new refresh token for the given user and registers its jti
    /// in the refresh allowlist.
    pub async fn issue_refresh(&self, user_id: i64) -> AppResult<IssuedToken> {
        let now = Utc::now();
        let exp = now + chrono::Duration::days(self.refresh_ttl_days);
        let jti = Uuid::new_v4();

        let claims = Claims {
            sub: user_id.to_string(),
            username: None,
            token_type: TokenType::Refresh,
            jti,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode refresh token: {e}")))?;

        self.registry
            .set(
                &keys::refresh_session(&jti),
                "1",
                Duration::from_secs(claims.remaining_ttl_seconds().max(1)),
            )
            .await?;

        tracing::debug!(user_id, %jti, "Issued refresh token");
        Ok(IssuedToken {
            token,
            jti,
            expires_at: exp,
        })
    }
}
