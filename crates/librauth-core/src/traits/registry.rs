//! Session Registry trait for pluggable key-value backends.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;

use crate::result::AppResult;

/// Trait for Session Registry backends (Redis or in-memory).
///
/// The registry holds the token allowlists and blacklists, keyed by token
/// identifier with automatic expiry. Plain string values are used for flag
/// entries; hash values carry the access-session identity fields.
///
/// Every operation is a network round-trip on the Redis backend; callers
/// must treat failures as `RegistryUnavailable`, never as "token invalid".
#[async_trait]
pub trait RegistryProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Get a string value by key. Returns `None` if the key does not exist
    /// or has expired.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Set a string value with a TTL.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()>;

    /// Set a hash value (field/value pairs) with a TTL on the whole key.
    async fn set_hash(&self, key: &str, fields: &[(&str, &str)], ttl: Duration) -> AppResult<()>;

    /// Get all fields of a hash value. Returns `None` if the key is absent.
    async fn get_hash(&self, key: &str) -> AppResult<Option<HashMap<String, String>>>;

    /// Delete a key. Deleting an absent key is a no-op.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Check whether a key exists.
    async fn exists(&self, key: &str) -> AppResult<bool>;

    /// Remaining time-to-live of a key. Returns `None` if the key is absent
    /// or carries no expiry.
    async fn ttl(&self, key: &str) -> AppResult<Option<Duration>>;

    /// Set the TTL on an existing key. Returns `false` if the key is absent.
    async fn expire(&self, key: &str, ttl: Duration) -> AppResult<bool>;

    /// Check that the registry backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
