use std::sync::Arc;
use tracing::info;

use super::core::AiHub;
use crate::cache::{CacheGateway, CacheStore, MemoryCache, RedisRestStore};
use crate::catalog::ModelCatalog;
use crate::config::HubConfig;
use crate::dispatch::{Dispatcher, HttpDispatcher};
use crate::Result;

/// Builder for [`AiHub`].
///
/// Anything not supplied comes from the config: the built-in catalog, a
/// Redis REST store when `cache.redis` is set (in-process LRU otherwise), and
/// HTTP dispatch over the configured endpoints.
pub struct AiHubBuilder {
    config: HubConfig,
    catalog: Option<Arc<ModelCatalog>>,
    cache_store: Option<Arc<dyn CacheStore>>,
    dispatcher: Option<Arc<dyn Dispatcher>>,
}

impl AiHubBuilder {
    pub fn new() -> Self {
        Self {
            config: HubConfig::default(),
            catalog: None,
            cache_store: None,
            dispatcher: None,
        }
    }

    pub fn config(mut self, config: HubConfig) -> Self {
        self.config = config;
        self
    }

    /// Share a catalog (and its availability flags) with other components.
    pub fn catalog(mut self, catalog: Arc<ModelCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn cache_store(mut self, store: Arc<dyn CacheStore>) -> Self {
        self.cache_store = Some(store);
        self
    }

    /// Replace HTTP dispatch, e.g. with an in-process fake in tests.
    pub fn dispatcher(mut self, dispatcher: Arc<dyn Dispatcher>) -> Self {
        self.dispatcher = Some(dispatcher);
        self
    }

    pub fn build(self) -> Result<AiHub> {
        let config = self.config;
        config.validate()?;

        let store: Arc<dyn CacheStore> = match (self.cache_store, &config.cache.redis) {
            (Some(store), _) => store,
            (None, Some(redis)) => Arc::new(RedisRestStore::new(redis, config.http.timeout())?),
            (None, None) => Arc::new(MemoryCache::new(config.cache.max_entries)),
        };
        let dispatcher: Arc<dyn Dispatcher> = match self.dispatcher {
            Some(d) => d,
            None => Arc::new(HttpDispatcher::from_config(&config)?),
        };
        let catalog = self
            .catalog
            .unwrap_or_else(|| Arc::new(ModelCatalog::builtin()));
        let fallbacks = config.fallback_targets()?;

        info!(
            models = catalog.snapshot().len(),
            cache_store = store.name(),
            cache_enabled = config.cache.enabled,
            fallback = config.fallback.join(",").as_str(),
            "ai-hub ready"
        );

        Ok(AiHub::new(
            catalog,
            CacheGateway::new(config.cache.clone(), store),
            dispatcher,
            fallbacks,
        ))
    }
}

impl Default for AiHubBuilder {
    fn default() -> Self {
        Self::new()
    }
}
