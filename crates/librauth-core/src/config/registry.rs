//! Session Registry configuration.

use serde::{Deserialize, Serialize};

/// Top-level Session Registry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Registry provider type: `"redis"` or `"memory"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Redis-specific registry configuration.
    #[serde(default)]
    pub redis: RedisRegistryConfig,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            redis: RedisRegistryConfig::default(),
        }
    }
}

/// Redis registry backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisRegistryConfig {
    /// Redis connection URL.
    #[serde(default = "default_redis_url")]
    pub url: String,
    /// Key prefix applied to every registry key. Empty by default so the
    /// wire layout is exactly `access:session:{jti}` etc.
    #[serde(default)]
    pub key_prefix: String,
    /// Bounded timeout for each Redis command, in seconds. On timeout the
    /// operation fails as registry-unavailable instead of hanging.
    #[serde(default = "default_command_timeout")]
    pub command_timeout_seconds: u64,
}

impl Default for RedisRegistryConfig {
    fn default() -> Self {
        Self {
            url: default_redis_url(),
            key_prefix: String::new(),
            command_timeout_seconds: default_command_timeout(),
        }
    }
}

fn default_provider() -> String {
    "memory".to_string()
}

fn default_redis_url() -> String {
    "redis://127.0.0.1:6379/0".to_string()
}

fn default_command_timeout() -> u64 {
    3
}
