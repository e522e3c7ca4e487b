use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use super::request::{GenerationRequest, GenerationResult};
use crate::cache::CacheGateway;
use crate::catalog::{ModelCatalog, ModelDescriptor, Provider};
use crate::dispatch::{DispatchTarget, Dispatcher};
use crate::routing::{select_model, SelectionPreferences};
use crate::{Error, ErrorContext, Result};

/// Resilient generation entry point.
///
/// `generate` is a fixed sequence: cache lookup, model selection, primary
/// dispatch, then at most one fallback dispatch. Calls are independent;
/// concurrent misses on the same cache key each dispatch upstream.
pub struct AiHub {
    catalog: Arc<ModelCatalog>,
    cache: CacheGateway,
    dispatcher: Arc<dyn Dispatcher>,
    fallbacks: Vec<DispatchTarget>,
}

impl AiHub {
    pub(crate) fn new(
        catalog: Arc<ModelCatalog>,
        cache: CacheGateway,
        dispatcher: Arc<dyn Dispatcher>,
        fallbacks: Vec<DispatchTarget>,
    ) -> Self {
        Self {
            catalog,
            cache,
            dispatcher,
            fallbacks,
        }
    }

    pub fn builder() -> super::AiHubBuilder {
        super::AiHubBuilder::new()
    }

    pub fn catalog(&self) -> &Arc<ModelCatalog> {
        &self.catalog
    }

    pub fn cache(&self) -> &CacheGateway {
        &self.cache
    }

    /// Catalog entries, optionally restricted to one capability.
    pub fn list_models(&self, capability: Option<&str>) -> Vec<ModelDescriptor> {
        self.catalog.list_by_capability(capability)
    }

    pub fn set_availability(&self, id: &str, available: bool) -> bool {
        self.catalog.set_availability(id, available)
    }

    /// The model `generate` would dispatch to right now.
    pub fn select_model(&self, preferences: &SelectionPreferences) -> ModelDescriptor {
        select_model(&self.catalog.snapshot(), preferences).clone()
    }

    /// The single fallback target used when `primary` fails.
    pub fn fallback_for(&self, primary: Provider) -> &DispatchTarget {
        // The builder guarantees at least one fallback.
        self.fallbacks
            .iter()
            .find(|t| t.provider != primary)
            .unwrap_or(&self.fallbacks[0])
    }

    pub async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        if request.prompt.is_empty() {
            return Err(Error::invalid_request_with_context(
                "Prompt is required",
                ErrorContext::new()
                    .with_field_path("request.prompt")
                    .with_source("hub"),
            ));
        }

        let request_id = Uuid::new_v4().to_string();
        let span = info_span!("generate", request_id = request_id.as_str());
        self.generate_inner(request).instrument(span).await
    }

    async fn generate_inner(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        let cache_key = request.effective_cache_key();
        if let Some(key) = cache_key {
            if let Some(text) = self.cache.lookup(key).await {
                info!(cache_key = key, "served from cache");
                return Ok(GenerationResult::cached(text));
            }
        }

        let primary = self.select_model(&request.preferences);
        let target = DispatchTarget::from_descriptor(&primary);
        let system = request.system.as_deref();

        let start = Instant::now();
        let primary_err = match self.dispatcher.dispatch(&target, &request.prompt, system).await {
            Ok(text) => {
                info!(
                    model = target.id.as_str(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    "generation succeeded"
                );
                if let Some(key) = cache_key {
                    if !text.is_empty() {
                        self.cache.store(key, &text, self.cache.default_ttl()).await;
                    }
                }
                return Ok(GenerationResult::generated(text, &target.id, false));
            }
            Err(e) => e,
        };

        let fallback = self.fallback_for(target.provider);
        warn!(
            model = target.id.as_str(),
            provider = target.provider.as_str(),
            http_status = primary_err.status(),
            error = %primary_err,
            fallback = fallback.id.as_str(),
            "primary model failed, trying fallback"
        );

        let start = Instant::now();
        match self.dispatcher.dispatch(fallback, &request.prompt, system).await {
            Ok(text) => {
                info!(
                    model = fallback.id.as_str(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    "fallback generation succeeded"
                );
                // Fallback output is never cached.
                Ok(GenerationResult::generated(text, &fallback.id, true))
            }
            Err(fallback_err) => {
                warn!(
                    model = fallback.id.as_str(),
                    http_status = fallback_err.status(),
                    error = %fallback_err,
                    "fallback model also failed"
                );
                debug!(primary = %primary_err, "giving up");
                Err(Error::AllProvidersFailed {
                    primary: Box::new(primary_err),
                    fallback: Box::new(fallback_err),
                })
            }
        }
    }
}
