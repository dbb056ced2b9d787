//! Registry manager that dispatches to the configured provider.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use librauth_core::config::registry::RegistryConfig;
use librauth_core::error::AppError;
use librauth_core::result::AppResult;
use librauth_core::traits::registry::RegistryProvider;

/// Session Registry manager that wraps the configured provider.
///
/// The provider is selected at construction time based on configuration.
#[derive(Debug, Clone)]
pub struct RegistryManager {
    /// The inner registry provider.
    inner: Arc<dyn RegistryProvider>,
}

impl RegistryManager {
    /// Create a new registry manager from configuration.
    pub async fn new(config: &RegistryConfig) -> AppResult<Self> {
        let inner: Arc<dyn RegistryProvider> = match config.provider.as_str() {
            #[cfg(feature = "redis-backend")]
            "redis" => {
                info!("Initializing Redis registry provider");
                let client = crate::redis::RedisClient::connect(&config.redis).await?;
                let provider = crate::redis::RedisRegistryProvider::new(
                    client,
                    config.redis.command_timeout_seconds,
                );
                Arc::new(provider)
            }
            #[cfg(feature = "memory")]
            "memory" => {
                info!("Initializing in-memory registry provider");
                Arc::new(crate::memory::MemoryRegistryProvider::new())
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown registry provider: '{other}'. Supported: memory, redis"
                )));
            }
        };

        Ok(Self { inner })
    }

    /// Create a registry manager from an existing provider (for testing).
    pub fn from_provider(provider: Arc<dyn RegistryProvider>) -> Self {
        Self { inner: provider }
    }
}

#[async_trait]
impl RegistryProvider for RegistryManager {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        self.inner.set(key, value, ttl).await
    }

    async fn set_hash(&self, key: &str, fields: &[(&str, &str)], ttl: Duration) -> AppResult<()> {
        self.inner.set_hash(key, fields, ttl).await
    }

    async fn get_hash(&self, key: &str) -> AppResult<Option<HashMap<String, String>>> {
        self.inner.get_hash(key).await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.inner.delete(key).await
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        self.inner.exists(key).await
    }

    async fn ttl(&self, key: &str) -> AppResult<Option<Duration>> {
        self.inner.ttl(key).await
    }

    async fn expire(&self, key: &str, ttl: Duration) -> AppResult<bool> {
        self.inner.expire(key, ttl).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }
}
