//! Model descriptors and provider identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Error, ErrorContext, Result};

/// Generation backends the hub knows how to reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Groq,
    Xai,
    Openai,
    Anthropic,
    Mistral,
    Cohere,
    Vertex,
}

impl Provider {
    pub const ALL: [Provider; 7] = [
        Provider::Groq,
        Provider::Xai,
        Provider::Openai,
        Provider::Anthropic,
        Provider::Mistral,
        Provider::Cohere,
        Provider::Vertex,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Groq => "groq",
            Provider::Xai => "xai",
            Provider::Openai => "openai",
            Provider::Anthropic => "anthropic",
            Provider::Mistral => "mistral",
            Provider::Cohere => "cohere",
            Provider::Vertex => "vertex",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Provider::ALL
            .iter()
            .copied()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                Error::configuration_with_context(
                    format!("unknown provider '{}'", s),
                    ErrorContext::new().with_source("catalog"),
                )
            })
    }
}

/// Catalog entry for one backend model.
///
/// Everything except `is_available` is fixed once the catalog is built;
/// availability is flipped through [`super::ModelCatalog::set_availability`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    /// `<provider>/<modelName>`, unique within a catalog.
    pub id: String,
    pub provider: Provider,
    /// Display name for user interface.
    pub name: String,
    pub capabilities: Vec<String>,
    pub cost_per_1k_tokens: f64,
    /// Context window in tokens.
    pub context_window: u32,
    pub is_available: bool,
}

impl ModelDescriptor {
    pub fn new(id: impl Into<String>, provider: Provider, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            provider,
            name: name.into(),
            capabilities: Vec::new(),
            cost_per_1k_tokens: 0.0,
            context_window: 4096,
            is_available: true,
        }
    }

    pub fn with_capabilities<I, S>(mut self, capabilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for cap in capabilities {
            let cap = cap.into();
            if !self.capabilities.contains(&cap) {
                self.capabilities.push(cap);
            }
        }
        self
    }

    pub fn with_cost_per_1k_tokens(mut self, cost: f64) -> Self {
        self.cost_per_1k_tokens = cost;
        self
    }

    pub fn with_context_window(mut self, tokens: u32) -> Self {
        self.context_window = tokens;
        self
    }

    pub fn with_availability(mut self, available: bool) -> Self {
        self.is_available = available;
        self
    }

    pub fn supports(&self, capability: &str) -> bool {
        self.capabilities.iter().any(|c| c == capability)
    }

    /// Backend-native model name: the id's suffix after the provider prefix.
    pub fn model_name(&self) -> &str {
        self.id
            .split_once('/')
            .map(|(_, name)| name)
            .unwrap_or(&self.id)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        let ctx = || {
            ErrorContext::new()
                .with_field_path(format!("catalog.{}", self.id))
                .with_source("catalog")
        };
        match self.id.split_once('/') {
            Some((prefix, name)) if prefix == self.provider.as_str() && !name.is_empty() => {}
            _ => {
                return Err(Error::configuration_with_context(
                    format!(
                        "model id '{}' must have the form '{}/<modelName>'",
                        self.id, self.provider
                    ),
                    ctx(),
                ))
            }
        }
        if !self.cost_per_1k_tokens.is_finite() || self.cost_per_1k_tokens < 0.0 {
            return Err(Error::configuration_with_context(
                "cost_per_1k_tokens must be a non-negative number",
                ctx().with_details(self.cost_per_1k_tokens.to_string()),
            ));
        }
        if self.context_window == 0 {
            return Err(Error::configuration_with_context(
                "context_window must be positive",
                ctx(),
            ));
        }
        Ok(())
    }
}
