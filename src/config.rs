//! Hub configuration: YAML file and/or environment knobs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::path::Path;

use crate::cache::{CacheConfig, RedisRestConfig};
use crate::catalog::Provider;
use crate::dispatch::DispatchTarget;
use crate::transport::HttpConfig;
use crate::{Error, ErrorContext, Result};

pub const DEFAULT_CHAT_PATH: &str = "/chat/completions";

/// Where and how to reach one provider's chat-completions endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEndpoint {
    pub base_url: String,
    #[serde(default = "default_chat_path")]
    pub path: String,
    /// Env var holding the bearer token; defaults to `<PROVIDER>_API_KEY`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
    /// Inline token, bypassing keyring and env lookup.
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
}

fn default_chat_path() -> String {
    DEFAULT_CHAT_PATH.to_string()
}

impl ProviderEndpoint {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            path: default_chat_path(),
            api_key_env: None,
            api_key: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_api_key_env(mut self, var: impl Into<String>) -> Self {
        self.api_key_env = Some(var.into());
        self
    }

    /// Built-in OpenAI-compatible endpoint, if the provider has one.
    pub fn builtin(provider: Provider) -> Option<Self> {
        let base = match provider {
            Provider::Groq => "https://api.groq.com/openai/v1",
            Provider::Xai => "https://api.x.ai/v1",
            Provider::Openai => "https://api.openai.com/v1",
            Provider::Anthropic => "https://api.anthropic.com/v1",
            Provider::Mistral => "https://api.mistral.ai/v1",
            Provider::Cohere => "https://api.cohere.ai/compatibility/v1",
            // Needs a project and region; must be configured explicitly.
            Provider::Vertex => return None,
        };
        Some(Self::new(base))
    }
}

fn default_fallback() -> Vec<String> {
    vec!["xai/grok-1".to_string(), "groq/llama3-70b".to_string()]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HubConfig {
    pub cache: CacheConfig,
    pub http: HttpConfig,
    /// Per-provider overrides of the built-in endpoint table.
    pub providers: BTreeMap<Provider, ProviderEndpoint>,
    /// Fallback model ids in priority order. One of them is tried when the
    /// primary dispatch fails: the first whose provider differs from the
    /// primary's.
    pub fallback: Vec<String>,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default(),
            http: HttpConfig::default(),
            providers: BTreeMap::new(),
            fallback: default_fallback(),
        }
    }
}

impl HubConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: HubConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::configuration_with_context(
                format!("Failed to read config: {}", e),
                ErrorContext::new()
                    .with_details(path.display().to_string())
                    .with_source("config"),
            )
        })?;
        Self::from_yaml_str(&content)
    }

    /// Defaults overridden by environment variables.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Apply `AI_HUB_*`, `AI_PROXY_URL`, `REDIS_URL` / `KV_REST_API_TOKEN`.
    pub fn apply_env(&mut self) -> Result<()> {
        if let Some(v) = env_parsed::<u64>("AI_HUB_CACHE_TTL_SECS")? {
            self.cache.ttl_secs = v;
        }
        if let Ok(ns) = env::var("AI_HUB_CACHE_NAMESPACE") {
            self.cache.namespace = ns;
        }
        if let Ok(v) = env::var("AI_HUB_CACHE_ENABLED") {
            self.cache.enabled = !matches!(v.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no" | "off");
        }
        if let Some(redis) = RedisRestConfig::from_env() {
            self.cache.redis = Some(redis);
        }
        if let Some(v) = env_parsed::<u64>("AI_HUB_HTTP_TIMEOUT_SECS")? {
            self.http.timeout_secs = v;
        }
        if let Ok(proxy) = env::var("AI_PROXY_URL") {
            self.http.proxy_url = Some(proxy);
        }
        if let Ok(list) = env::var("AI_HUB_FALLBACK") {
            self.fallback = list
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }
        self.validate()
    }

    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_provider(mut self, provider: Provider, endpoint: ProviderEndpoint) -> Self {
        self.providers.insert(provider, endpoint);
        self
    }

    pub fn with_fallback<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fallback = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Configured endpoint, else the built-in one.
    pub fn endpoint(&self, provider: Provider) -> Option<ProviderEndpoint> {
        self.providers
            .get(&provider)
            .cloned()
            .or_else(|| ProviderEndpoint::builtin(provider))
    }

    pub fn fallback_targets(&self) -> Result<Vec<DispatchTarget>> {
        self.fallback.iter().map(|id| DispatchTarget::parse(id)).collect()
    }

    pub fn validate(&self) -> Result<()> {
        if self.fallback.is_empty() {
            return Err(Error::configuration_with_context(
                "at least one fallback model is required",
                ErrorContext::new()
                    .with_field_path("fallback")
                    .with_source("config"),
            ));
        }
        self.fallback_targets()?;

        for (provider, endpoint) in &self.providers {
            url::Url::parse(&endpoint.base_url).map_err(|e| {
                Error::configuration_with_context(
                    format!("invalid base_url: {}", e),
                    ErrorContext::new()
                        .with_field_path(format!("providers.{}.base_url", provider))
                        .with_details(endpoint.base_url.clone())
                        .with_source("config"),
                )
            })?;
        }
        Ok(())
    }
}

fn env_parsed<T: std::str::FromStr>(name: &str) -> Result<Option<T>> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse::<T>().map(Some).map_err(|_| {
            Error::configuration_with_context(
                format!("{} is not a valid number", name),
                ErrorContext::new().with_details(raw).with_source("config"),
            )
        }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = HubConfig::default();
        assert_eq!(cfg.cache.ttl_secs, 86_400);
        assert_eq!(cfg.cache.namespace, "ai-hub:cache");
        assert_eq!(cfg.http.timeout_secs, 30);
        assert_eq!(cfg.fallback, vec!["xai/grok-1", "groq/llama3-70b"]);
        assert!(cfg.validate().is_ok());
        assert!(cfg.endpoint(Provider::Vertex).is_none());
        assert_eq!(
            cfg.endpoint(Provider::Groq).unwrap().base_url,
            "https://api.groq.com/openai/v1"
        );
    }

    #[test]
    fn test_yaml_overrides() {
        let yaml = r#"
cache:
  ttl_secs: 60
  namespace: "tasks"
http:
  timeout_secs: 5
providers:
  groq:
    base_url: "http://localhost:9999/v1"
  vertex:
    base_url: "https://us-central1-aiplatform.googleapis.com/v1/projects/p/locations/us-central1/endpoints/openapi"
    api_key_env: "VERTEX_TOKEN"
fallback: ["groq/llama3-70b"]
"#;
        let cfg = HubConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(cfg.cache.ttl_secs, 60);
        assert_eq!(cfg.cache.namespace, "tasks");
        assert!(cfg.cache.enabled);
        assert_eq!(cfg.http.timeout_secs, 5);
        let groq = cfg.endpoint(Provider::Groq).unwrap();
        assert_eq!(groq.base_url, "http://localhost:9999/v1");
        assert_eq!(groq.path, "/chat/completions");
        assert_eq!(
            cfg.endpoint(Provider::Vertex).unwrap().api_key_env.as_deref(),
            Some("VERTEX_TOKEN")
        );
        // Untouched providers keep the built-in table.
        assert_eq!(
            cfg.endpoint(Provider::Xai).unwrap().base_url,
            "https://api.x.ai/v1"
        );
        assert_eq!(cfg.fallback_targets().unwrap()[0].id, "groq/llama3-70b");
    }

    #[test]
    fn test_invalid_configs_are_rejected() {
        assert!(HubConfig::from_yaml_str("fallback: []").is_err());
        assert!(HubConfig::from_yaml_str("fallback: [\"grok-1\"]").is_err());
        assert!(HubConfig::from_yaml_str("fallback: [\"bedrock/titan\"]").is_err());
        assert!(HubConfig::from_yaml_str(
            "providers:\n  groq:\n    base_url: \"not a url\"\n"
        )
        .is_err());
    }
}
