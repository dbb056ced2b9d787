//! Registry key builders for all librauth entries.
//!
//! Centralising key construction prevents typos and makes it easy to find
//! every key the service uses. The layout is part of the external contract:
//! allowlist entries under `access:session:` / `refresh:session:`, blacklist
//! entries under `bl:access:` / `bl:refresh:`, all keyed by jti.

use uuid::Uuid;

/// Allowlist entry for an active access session (hash: user_id, username).
pub fn access_session(jti: &Uuid) -> String {
    format!("access:session:{jti}")
}

/// Allowlist entry for an active refresh session (flag).
pub fn refresh_session(jti: &Uuid) -> String {
    format!("refresh:session:{jti}")
}

/// Blacklist entry for a revoked access token.
pub fn access_blacklist(jti: &Uuid) -> String {
    format!("bl:access:{jti}")
}

/// Blacklist entry for a revoked refresh token.
pub fn refresh_blacklist(jti: &Uuid) -> String {
    format!("bl:refresh:{jti}")
}
