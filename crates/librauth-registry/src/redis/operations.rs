//! Redis registry provider implementation.
//!
//! Every command runs under a bounded timeout; timeouts and connection
//! failures both surface as `RegistryUnavailable` so callers can tell a
//! store outage apart from an invalid token.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use tokio::time::timeout;

use librauth_core::error::{AppError, ErrorKind};
use librauth_core::result::AppResult;
use librauth_core::traits::registry::RegistryProvider;

use super::client::RedisClient;

/// Redis-backed Session Registry provider.
#[derive(Debug, Clone)]
pub struct RedisRegistryProvider {
    /// Redis client.
    client: RedisClient,
    /// Bounded timeout applied to every command.
    command_timeout: Duration,
}

impl RedisRegistryProvider {
    /// Create a new Redis registry provider.
    pub fn new(client: RedisClient, command_timeout_seconds: u64) -> Self {
        Self {
            client,
            command_timeout: Duration::from_secs(command_timeout_seconds),
        }
    }

    /// Map a Redis error to an AppError.
    fn map_err(e: redis::RedisError) -> AppError {
        AppError::with_source(
            ErrorKind::RegistryUnavailable,
            format!("Redis command failed: {e}"),
            e,
        )
    }

    fn timed_out() -> AppError {
        AppError::registry_unavailable("Redis command timed out")
    }
}

#[async_trait]
impl RegistryProvider for RedisRegistryProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        timeout(self.command_timeout, conn.get::<_, Option<String>>(&full_key))
            .await
            .map_err(|_| Self::timed_out())?
            .map_err(Self::map_err)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        timeout(
            self.command_timeout,
            conn.set_ex::<_, _, ()>(&full_key, value, ttl.as_secs()),
        )
        .await
        .map_err(|_| Self::timed_out())?
        .map_err(Self::map_err)
    }

    async fn set_hash(&self, key: &str, fields: &[(&str, &str)], ttl: Duration) -> AppResult<()> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();

        // HSET + EXPIRE in one transaction so the entry never lingers
        // without a TTL.
        let mut pipe = redis::pipe();
        pipe.atomic()
            .hset_multiple(&full_key, fields)
            .ignore()
            .expire(&full_key, ttl.as_secs() as i64)
            .ignore();

        timeout(self.command_timeout, pipe.query_async::<()>(&mut conn))
            .await
            .map_err(|_| Self::timed_out())?
            .map_err(Self::map_err)
    }

    async fn get_hash(&self, key: &str) -> AppResult<Option<HashMap<String, String>>> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        let map: HashMap<String, String> =
            timeout(self.command_timeout, conn.hgetall(&full_key))
                .await
                .map_err(|_| Self::timed_out())?
                .map_err(Self::map_err)?;

        // Redis reports a missing hash as an empty map.
        if map.is_empty() { Ok(None) } else { Ok(Some(map)) }
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        timeout(self.command_timeout, conn.del::<_, ()>(&full_key))
            .await
            .map_err(|_| Self::timed_out())?
            .map_err(Self::map_err)
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        timeout(self.command_timeout, conn.exists::<_, bool>(&full_key))
            .await
            .map_err(|_| Self::timed_out())?
            .map_err(Self::map_err)
    }

    async fn ttl(&self, key: &str) -> AppResult<Option<Duration>> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        let remaining: i64 = timeout(self.command_timeout, conn.ttl(&full_key))
            .await
            .map_err(|_| Self::timed_out())?
            .map_err(Self::map_err)?;

        // -2 = key absent, -1 = key without expiry.
        if remaining >= 0 {
            Ok(Some(Duration::from_secs(remaining as u64)))
        } else {
            Ok(None)
        }
    }

    async fn expire(&self, key: &str, ttl: Duration) -> AppResult<bool> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        timeout(
            self.command_timeout,
            conn.expire::<_, bool>(&full_key, ttl.as_secs() as i64),
        )
        .await
        .map_err(|_| Self::timed_out())?
        .map_err(Self::map_err)
    }

    async fn health_check(&self) -> AppResult<bool> {
        let mut conn = self.client.conn_mut();
        let pong: String = timeout(
            self.command_timeout,
            redis::cmd("PING").query_async(&mut conn),
        )
        .await
        .map_err(|_| Self::timed_out())?
        .map_err(Self::map_err)?;
        Ok(pong == "PONG")
    }
}
