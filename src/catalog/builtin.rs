//! Built-in model table.

use once_cell::sync::Lazy;

use super::model::{ModelDescriptor, Provider};
use super::registry::CatalogSnapshot;

/// Returned when no catalog entry supports the requested capability.
pub const DEFAULT_MODEL_ID: &str = "groq/llama3-8b";

static BUILTIN_MODELS: Lazy<Vec<ModelDescriptor>> = Lazy::new(|| {
    vec![
        ModelDescriptor::new("groq/llama3-70b", Provider::Groq, "Llama 3 70B")
            .with_capabilities(["text-generation", "chat", "embeddings"])
            .with_cost_per_1k_tokens(0.0007)
            .with_context_window(8192),
        ModelDescriptor::new("groq/llama3-8b", Provider::Groq, "Llama 3 8B")
            .with_capabilities(["text-generation", "chat", "embeddings"])
            .with_cost_per_1k_tokens(0.0002)
            .with_context_window(8192),
        ModelDescriptor::new("xai/grok-1", Provider::Xai, "Grok-1")
            .with_capabilities(["text-generation", "chat", "code"])
            .with_cost_per_1k_tokens(0.0005)
            .with_context_window(8192),
        ModelDescriptor::new("openai/gpt-4o", Provider::Openai, "GPT-4o")
            .with_capabilities(["text-generation", "chat", "vision", "code"])
            .with_cost_per_1k_tokens(0.005)
            .with_context_window(128_000)
            .with_availability(false),
        ModelDescriptor::new("anthropic/claude-3-opus", Provider::Anthropic, "Claude 3 Opus")
            .with_capabilities(["text-generation", "chat", "vision"])
            .with_cost_per_1k_tokens(0.015)
            .with_context_window(200_000)
            .with_availability(false),
        ModelDescriptor::new("mistral/mistral-large", Provider::Mistral, "Mistral Large")
            .with_capabilities(["text-generation", "chat", "code"])
            .with_cost_per_1k_tokens(0.002)
            .with_context_window(32_768)
            .with_availability(false),
        ModelDescriptor::new("cohere/command-r", Provider::Cohere, "Command R")
            .with_capabilities(["text-generation", "chat"])
            .with_cost_per_1k_tokens(0.001)
            .with_context_window(128_000)
            .with_availability(false),
    ]
});

/// The built-in descriptors, in catalog order.
pub fn builtin_models() -> Vec<ModelDescriptor> {
    BUILTIN_MODELS.clone()
}

pub(crate) fn builtin_snapshot() -> CatalogSnapshot {
    match CatalogSnapshot::new(builtin_models(), DEFAULT_MODEL_ID) {
        Ok(snapshot) => snapshot,
        // The static table is checked by `test_builtin_table_is_valid`.
        Err(e) => unreachable!("built-in catalog is invalid: {e}"),
    }
}
