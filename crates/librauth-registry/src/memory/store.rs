//! In-memory registry implementation with per-entry expiry.
//!
//! Backed by dashmap rather than a real cache crate because the revocation
//! path needs to read the remaining TTL of individual entries, which the
//! usual in-process caches do not expose. Expired entries are dropped
//! lazily on access.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;

use librauth_core::result::AppResult;
use librauth_core::traits::registry::RegistryProvider;

/// A stored registry value: flag/string entries or identity hashes.
#[derive(Debug, Clone)]
enum StoredValue {
    Text(String),
    Hash(HashMap<String, String>),
}

#[derive(Debug, Clone)]
struct Entry {
    value: StoredValue,
    expires_at: Instant,
}

impl Entry {
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }

    fn remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }
}

/// In-memory Session Registry provider.
#[derive(Debug, Clone, Default)]
pub struct MemoryRegistryProvider {
    entries: Arc<DashMap<String, Entry>>,
}

impl MemoryRegistryProvider {
    /// Create a new empty in-memory registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a live entry, dropping it if expired.
    fn live_entry(&self, key: &str) -> Option<Entry> {
        let entry = self.entries.get(key)?.clone();
        if entry.is_expired() {
            drop(self.entries.remove(key));
            return None;
        }
        Some(entry)
    }
}

#[async_trait]
impl RegistryProvider for MemoryRegistryProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.live_entry(key).and_then(|e| match e.value {
            StoredValue::Text(s) => Some(s),
            StoredValue::Hash(_) => None,
        }))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        self.entries.insert(
            key.to_string(),
            Entry {
                value: StoredValue::Text(value.to_string()),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    async fn set_hash(&self, key: &str, fields: &[(&str, &str)], ttl: Duration) -> AppResult<()> {
        let map = fields
            .iter()
            .map(|(f, v)| (f.to_string(), v.to_string()))
            .collect();
        self.entries.insert(
            key.to_string(),
            Entry {
                value: StoredValue::Hash(map),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    async fn get_hash(&self, key: &str) -> AppResult<Option<HashMap<String, String>>> {
        Ok(self.live_entry(key).and_then(|e| match e.value {
            StoredValue::Hash(m) => Some(m),
            StoredValue::Text(_) => None,
        }))
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.entries.remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(self.live_entry(key).is_some())
    }

    async fn ttl(&self, key: &str) -> AppResult<Option<Duration>> {
        Ok(self.live_entry(key).map(|e| e.remaining()))
    }

    async fn expire(&self, key: &str, ttl: Duration) -> AppResult<bool> {
        match self.entries.get_mut(key) {
            Some(mut entry) if !entry.is_expired() => {
                entry.expires_at = Instant::now() + ttl;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get() {
        let provider = MemoryRegistryProvider::new();
        provider
            .set("key1", "value1", Duration::from_secs(60))
            .await
            .unwrap();
        let val = provider.get("key1").await.unwrap();
        assert_eq!(val, Some("value1".to_string()));
    }

    #[tokio::test]
    async fn test_delete() {
        let provider = MemoryRegistryProvider::new();
        provider
            .set("key2", "value2", Duration::from_secs(60))
            .await
            .unwrap();
        provider.delete("key2").await.unwrap();
        assert_eq!(provider.get("key2").await.unwrap(), None);
        assert!(!provider.exists("key2").await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_absent_is_noop() {
        let provider = MemoryRegistryProvider::new();
        provider.delete("missing").await.unwrap();
    }

    #[tokio::test]
    async fn test_expired_entry_is_gone() {
        let provider = MemoryRegistryProvider::new();
        provider
            .set("short", "v", Duration::from_millis(10))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(provider.get("short").await.unwrap(), None);
        assert!(!provider.exists("short").await.unwrap());
        assert_eq!(provider.ttl("short").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_hash_round_trip() {
        let provider = MemoryRegistryProvider::new();
        provider
            .set_hash(
                "session",
                &[("user_id", "42"), ("username", "alice")],
                Duration::from_secs(60),
            )
            .await
            .unwrap();

        let map = provider.get_hash("session").await.unwrap().unwrap();
        assert_eq!(map.get("user_id").map(String::as_str), Some("42"));
        assert_eq!(map.get("username").map(String::as_str), Some("alice"));
        assert!(provider.exists("session").await.unwrap());
    }

    #[tokio::test]
    async fn test_ttl_reports_remaining() {
        let provider = MemoryRegistryProvider::new();
        provider
            .set("timed", "v", Duration::from_secs(120))
            .await
            .unwrap();
        let remaining = provider.ttl("timed").await.unwrap().unwrap();
        assert!(remaining <= Duration::from_secs(120));
        assert!(remaining > Duration::from_secs(100));
    }

    #[tokio::test]
    async fn test_expire_updates_ttl() {
        let provider = MemoryRegistryProvider::new();
        provider
            .set("bump", "v", Duration::from_secs(10))
            .await
            .unwrap();
        assert!(provider.expire("bump", Duration::from_secs(300)).await.unwrap());
        let remaining = provider.ttl("bump").await.unwrap().unwrap();
        assert!(remaining > Duration::from_secs(200));

        assert!(!provider.expire("absent", Duration::from_secs(5)).await.unwrap());
    }
}
