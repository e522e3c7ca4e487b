//! Namespaced, time-boxed access to the cache store.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use super::backend::CacheStore;
use super::redis_rest::RedisRestConfig;

pub const DEFAULT_NAMESPACE: &str = "ai-hub:cache";
pub const DEFAULT_TTL_SECS: u64 = 60 * 60 * 24;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,
    pub namespace: String,
    pub ttl_secs: u64,
    /// Capacity of the in-process store.
    pub max_entries: usize,
    /// Use a Redis REST database instead of the in-process store.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redis: Option<RedisRestConfig>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            namespace: DEFAULT_NAMESPACE.to_string(),
            ttl_secs: DEFAULT_TTL_SECS,
            max_entries: 1024,
            redis: None,
        }
    }
}

impl CacheConfig {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl_secs = ttl.as_secs();
        self
    }
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub sets: u64,
    pub deletes: u64,
    pub errors: u64,
}

impl CacheStats {
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

#[derive(Default)]
struct AtomicStats {
    hits: AtomicU64,
    misses: AtomicU64,
    sets: AtomicU64,
    deletes: AtomicU64,
    errors: AtomicU64,
}

impl AtomicStats {
    fn to_stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            sets: self.sets.load(Ordering::Relaxed),
            deletes: self.deletes.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
        }
    }
}

/// Read-through / write-through wrapper around a [`CacheStore`].
///
/// Store failures never escape: reads degrade to a miss and writes to a
/// no-op, both with a warning. Keys are used as given; there is no hashing
/// and no collision handling.
pub struct CacheGateway {
    config: CacheConfig,
    store: Arc<dyn CacheStore>,
    stats: AtomicStats,
}

impl CacheGateway {
    pub fn new(config: CacheConfig, store: Arc<dyn CacheStore>) -> Self {
        Self {
            config,
            store,
            stats: AtomicStats::default(),
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    pub fn default_ttl(&self) -> Duration {
        self.config.ttl()
    }

    /// Fully-qualified store key: `<namespace>:<key>`.
    pub fn qualify(&self, key: &str) -> String {
        if self.config.namespace.is_empty() {
            key.to_string()
        } else {
            format!("{}:{}", self.config.namespace, key)
        }
    }

    /// Cached text for `key`, or `None` on a miss or store failure.
    ///
    /// An empty stored value counts as a miss.
    pub async fn lookup(&self, key: &str) -> Option<String> {
        if !self.config.enabled {
            return None;
        }
        let qualified = self.qualify(key);
        match self.store.get(&qualified).await {
            Ok(Some(value)) if !value.is_empty() => {
                self.stats.hits.fetch_add(1, Ordering::Relaxed);
                debug!(cache_key = qualified.as_str(), store = self.store.name(), "cache hit");
                Some(value)
            }
            Ok(_) => {
                self.stats.misses.fetch_add(1, Ordering::Relaxed);
                debug!(cache_key = qualified.as_str(), store = self.store.name(), "cache miss");
                None
            }
            Err(e) => {
                self.stats.errors.fetch_add(1, Ordering::Relaxed);
                warn!(
                    cache_key = qualified.as_str(),
                    store = self.store.name(),
                    error = %e,
                    "cache read failed, treating as miss"
                );
                None
            }
        }
    }

    /// Write `value` under `key` with `ttl`. Returns whether the write landed.
    pub async fn store(&self, key: &str, value: &str, ttl: Duration) -> bool {
        if !self.config.enabled {
            return false;
        }
        let qualified = self.qualify(key);
        match self.store.set(&qualified, value, ttl).await {
            Ok(()) => {
                self.stats.sets.fetch_add(1, Ordering::Relaxed);
                debug!(
                    cache_key = qualified.as_str(),
                    ttl_secs = ttl.as_secs(),
                    "cache write"
                );
                true
            }
            Err(e) => {
                self.stats.errors.fetch_add(1, Ordering::Relaxed);
                warn!(
                    cache_key = qualified.as_str(),
                    store = self.store.name(),
                    error = %e,
                    "cache write failed, continuing without cache"
                );
                false
            }
        }
    }

    /// Drop the entry for `key`. Returns whether something was removed.
    pub async fn invalidate(&self, key: &str) -> bool {
        if !self.config.enabled {
            return false;
        }
        let qualified = self.qualify(key);
        match self.store.delete(&qualified).await {
            Ok(removed) => {
                if removed {
                    self.stats.deletes.fetch_add(1, Ordering::Relaxed);
                }
                removed
            }
            Err(e) => {
                self.stats.errors.fetch_add(1, Ordering::Relaxed);
                warn!(cache_key = qualified.as_str(), error = %e, "cache delete failed");
                false
            }
        }
    }

    pub fn stats(&self) -> CacheStats {
        self.stats.to_stats()
    }

    pub fn store_name(&self) -> &'static str {
        self.store.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::{Error, ErrorContext, Result};
    use async_trait::async_trait;

    struct BrokenStore;

    #[async_trait]
    impl CacheStore for BrokenStore {
        async fn get(&self, _: &str) -> Result<Option<String>> {
            Err(Error::cache_with_context("down", ErrorContext::new()))
        }
        async fn set(&self, _: &str, _: &str, _: Duration) -> Result<()> {
            Err(Error::cache_with_context("down", ErrorContext::new()))
        }
        async fn delete(&self, _: &str) -> Result<bool> {
            Err(Error::cache_with_context("down", ErrorContext::new()))
        }
        fn name(&self) -> &'static str {
            "broken"
        }
    }

    #[tokio::test]
    async fn test_keys_are_namespaced() {
        let store = Arc::new(MemoryCache::new(16));
        let gateway = CacheGateway::new(CacheConfig::default(), store.clone());

        assert!(gateway.store("prompt-1", "text", Duration::from_secs(60)).await);
        assert_eq!(
            store.get("ai-hub:cache:prompt-1").await.unwrap().as_deref(),
            Some("text")
        );
        assert_eq!(gateway.lookup("prompt-1").await.as_deref(), Some("text"));
        assert_eq!(gateway.lookup("prompt-2").await, None);

        let stats = gateway.stats();
        assert_eq!((stats.hits, stats.misses, stats.sets), (1, 1, 1));
        assert_eq!(stats.hit_ratio(), 0.5);
    }

    #[tokio::test]
    async fn test_empty_value_is_a_miss() {
        let store = Arc::new(MemoryCache::new(16));
        store
            .set("ai-hub:cache:k", "", Duration::from_secs(60))
            .await
            .unwrap();
        let gateway = CacheGateway::new(CacheConfig::default(), store);
        assert_eq!(gateway.lookup("k").await, None);
    }

    #[tokio::test]
    async fn test_store_failures_degrade() {
        let gateway = CacheGateway::new(CacheConfig::default(), Arc::new(BrokenStore));
        assert_eq!(gateway.lookup("k").await, None);
        assert!(!gateway.store("k", "v", Duration::from_secs(1)).await);
        assert!(!gateway.invalidate("k").await);
        assert_eq!(gateway.stats().errors, 3);
    }

    #[tokio::test]
    async fn test_disabled_gateway_never_touches_store() {
        let gateway = CacheGateway::new(
            CacheConfig::default().with_enabled(false),
            Arc::new(BrokenStore),
        );
        assert_eq!(gateway.lookup("k").await, None);
        assert!(!gateway.store("k", "v", Duration::from_secs(1)).await);
        assert_eq!(gateway.stats(), CacheStats::default());
    }

    #[tokio::test]
    async fn test_invalidate() {
        let gateway = CacheGateway::new(
            CacheConfig::default().with_namespace("test"),
            Arc::new(MemoryCache::new(4)),
        );
        gateway.store("k", "v", Duration::from_secs(60)).await;
        assert_eq!(gateway.qualify("k"), "test:k");
        assert!(gateway.invalidate("k").await);
        assert_eq!(gateway.lookup("k").await, None);
    }
}
