//! Server-side key-value cache handed to every request.
//!
//! Resolvers may store computed strings here; nothing in the API applies a
//! caching policy on its own. Backed by `moka` with a capacity bound, a
//! default TTL, and optional per-entry TTLs.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;

use crate::config::CacheConfig;

/// Key-value cache with string values.
#[async_trait]
pub trait KeyValueCache: Send + Sync {
    /// Look up a key.
    async fn get(&self, key: &str) -> Option<String>;

    /// Store a value, optionally expiring sooner than the default TTL.
    async fn set(&self, key: &str, value: String, ttl: Option<Duration>);

    /// Remove a key.
    async fn delete(&self, key: &str);
}

/// Shared cache handle.
pub type SharedCache = Arc<dyn KeyValueCache>;

#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    ttl: Option<Duration>,
}

struct EntryTtl;

impl Expiry<String, CacheEntry> for EntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CacheEntry,
        _created_at: Instant,
    ) -> Option<Duration> {
        value.ttl
    }
}

/// `moka`-backed cache.
#[derive(Clone)]
pub struct MokaCache {
    inner: Cache<String, CacheEntry>,
}

impl MokaCache {
    /// Create a cache from configuration.
    #[must_use]
    pub fn new(config: CacheConfig) -> Self {
        let inner = Cache::builder()
            .max_capacity(config.capacity)
            .time_to_live(config.ttl)
            .expire_after(EntryTtl)
            .build();

        Self { inner }
    }

    /// Wrap in a shareable trait object.
    #[must_use]
    pub fn shared(self) -> SharedCache {
        Arc::new(self)
    }
}

#[async_trait]
impl KeyValueCache for MokaCache {
    async fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key).await.map(|entry| entry.value)
    }

    async fn set(&self, key: &str, value: String, ttl: Option<Duration>) {
        self.inner
            .insert(key.to_owned(), CacheEntry { value, ttl })
            .await;
    }

    async fn delete(&self, key: &str) {
        self.inner.invalidate(key).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache() -> MokaCache {
        MokaCache::new(CacheConfig::default())
    }

    #[tokio::test]
    async fn test_set_get_delete() {
        let cache = cache();
        assert_eq!(cache.get("k").await, None);

        cache.set("k", "v".to_owned(), None).await;
        assert_eq!(cache.get("k").await.as_deref(), Some("v"));

        cache.set("k", "w".to_owned(), None).await;
        assert_eq!(cache.get("k").await.as_deref(), Some("w"));

        cache.delete("k").await;
        assert_eq!(cache.get("k").await, None);
    }

    #[tokio::test]
    async fn test_per_entry_ttl_expires() {
        let cache = cache();
        cache
            .set("short", "v".to_owned(), Some(Duration::from_millis(20)))
            .await;
        cache.set("long", "v".to_owned(), None).await;

        tokio::time::sleep(Duration::from_millis(60)).await;

        assert_eq!(cache.get("short").await, None);
        assert_eq!(cache.get("long").await.as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn test_shared_handle() {
        let shared = cache().shared();
        shared.set("a", "1".to_owned(), None).await;
        assert_eq!(shared.get("a").await.as_deref(), Some("1"));
    }
}
