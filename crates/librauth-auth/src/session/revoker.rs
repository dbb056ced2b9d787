//! Session revocation: moves jtis from allowlist to blacklist.

use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use librauth_core::result::AppResult;
use librauth_core::traits::registry::RegistryProvider;
use librauth_registry::{RegistryManager, keys};

/// Minimum blacklist TTL for access jtis that are near-expired or absent.
const ACCESS_BLACKLIST_FLOOR: Duration = Duration::from_secs(60);
/// Minimum blacklist TTL for refresh jtis.
const REFRESH_BLACKLIST_FLOOR: Duration = Duration::from_secs(300);

/// Invalidates access/refresh token pairs in the Session Registry.
///
/// Revocation is idempotent: revoking an already-revoked or unknown jti
/// is a no-op success.
#[derive(Debug, Clone)]
pub struct SessionRevoker {
    /// Session Registry handle.
    registry: Arc<RegistryManager>,
}

impl SessionRevoker {
    /// Creates a new revoker.
    pub fn new(registry: Arc<RegistryManager>) -> Self {
        Self { registry }
    }

    /// Revokes an access jti and, if supplied, the paired refresh jti.
    pub async fn revoke(&self, access_jti: &Uuid, refresh_jti: Option<&Uuid>) -> AppResult<()> {
        self.revoke_access(access_jti).await?;
        if let Some(jti) = refresh_jti {
            self.revoke_refresh(jti).await?;
        }
        Ok(())
    }

    /// Revokes a single access jti.
    pub async fn revoke_access(&self, jti: &Uuid) -> AppResult<()> {
        self.blacklist_then_delete(
            &keys::access_session(jti),
            &keys::access_blacklist(jti),
            ACCESS_BLACKLIST_FLOOR,
        )
        .await?;
        tracing::info!(%jti, "Revoked access token");
        Ok(())
    }

    /// Revokes a single refresh jti.
    pub async fn revoke_refresh(&self, jti: &Uuid) -> AppResult<()> {
        self.blacklist_then_delete(
            &keys::refresh_session(jti),
            &keys::refresh_blacklist(jti),
            REFRESH_BLACKLIST_FLOOR,
        )
        .await?;
        tracing::info!(%jti, "Revoked refresh token");
        Ok(())
    }

    /// Blacklist-then-delete ordering: the blacklist entry lands before the
    /// allowlist entry disappears, so a concurrent validator observes either
    /// "blacklisted" or "absent from allowlist" — both reject.
    ///
    /// The blacklist TTL covers the remaining allowlist lifetime, with a
    /// floor for entries that are near-expired or already gone.
    async fn blacklist_then_delete(
        &self,
        allow_key: &str,
        bl_key: &str,
        floor: Duration,
    ) -> AppResult<()> {
        let remaining = self
            .registry
            .ttl(allow_key)
            .await?
            .unwrap_or(Duration::ZERO);
        let ttl = remaining.max(floor);

        self.registry.set(bl_key, "1", ttl).await?;
        self.registry.delete(allow_key).await?;
        Ok(())
    }
}
