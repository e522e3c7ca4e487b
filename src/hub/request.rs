//! Request and result types for [`super::AiHub::generate`].

use serde::{Deserialize, Serialize};

use crate::routing::SelectionPreferences;

/// `model_used` value for results served from the cache.
pub const CACHED_MODEL_MARKER: &str = "cached";

fn default_use_cache() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub preferences: SelectionPreferences,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_key: Option<String>,
    #[serde(default = "default_use_cache")]
    pub use_cache: bool,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, preferences: SelectionPreferences) -> Self {
        Self {
            prompt: prompt.into(),
            system: None,
            preferences,
            cache_key: None,
            use_cache: true,
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_cache_key(mut self, key: impl Into<String>) -> Self {
        self.cache_key = Some(key.into());
        self
    }

    pub fn with_use_cache(mut self, use_cache: bool) -> Self {
        self.use_cache = use_cache;
        self
    }

    /// The cache key, if caching applies to this request.
    pub fn effective_cache_key(&self) -> Option<&str> {
        if self.use_cache {
            self.cache_key.as_deref()
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub text: String,
    /// Catalog id of the model that answered, a fallback id, or `"cached"`.
    pub model_used: String,
    pub from_cache: bool,
    #[serde(default)]
    pub used_fallback: bool,
}

impl GenerationResult {
    pub(crate) fn cached(text: String) -> Self {
        Self {
            text,
            model_used: CACHED_MODEL_MARKER.to_string(),
            from_cache: true,
            used_fallback: false,
        }
    }

    pub(crate) fn generated(text: String, model_used: &str, used_fallback: bool) -> Self {
        Self {
            text,
            model_used: model_used.to_string(),
            from_cache: false,
            used_fallback,
        }
    }
}
