//! Caller-supplied selection preferences.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::catalog::Provider;
use crate::{Error, ErrorContext, Result};

/// Ranking applied to the candidates that survive filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackStrategy {
    /// Cheapest first.
    #[default]
    Cost,
    /// Largest context window first.
    Context,
    /// Keep catalog order.
    Availability,
}

impl FallbackStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            FallbackStrategy::Cost => "cost",
            FallbackStrategy::Context => "context",
            FallbackStrategy::Availability => "availability",
        }
    }
}

impl fmt::Display for FallbackStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FallbackStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cost" => Ok(FallbackStrategy::Cost),
            "context" => Ok(FallbackStrategy::Context),
            "availability" => Ok(FallbackStrategy::Availability),
            other => Err(Error::invalid_request_with_context(
                format!("unknown fallback strategy '{}'", other),
                ErrorContext::new()
                    .with_field_path("preferences.fallback_strategy")
                    .with_source("routing"),
            )),
        }
    }
}

/// What the caller wants from the selected model.
///
/// Every bound is advisory: a filter that would leave no candidates is
/// skipped instead of failing the selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionPreferences {
    pub capability: String,
    /// Inclusive cost ceiling. `Some(0.0)` is a real bound that keeps only
    /// free models; use `None` for no bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_cost_per_1k_tokens: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_context_window: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub preferred_providers: Vec<Provider>,
    #[serde(default)]
    pub fallback_strategy: FallbackStrategy,
}

impl SelectionPreferences {
    pub fn new(capability: impl Into<String>) -> Self {
        Self {
            capability: capability.into(),
            max_cost_per_1k_tokens: None,
            min_context_window: None,
            preferred_providers: Vec::new(),
            fallback_strategy: FallbackStrategy::default(),
        }
    }

    pub fn with_max_cost(mut self, max_cost_per_1k_tokens: f64) -> Self {
        self.max_cost_per_1k_tokens = Some(max_cost_per_1k_tokens);
        self
    }

    pub fn with_min_context_window(mut self, tokens: u32) -> Self {
        self.min_context_window = Some(tokens);
        self
    }

    /// Append providers in priority order; duplicates are ignored.
    pub fn with_preferred_providers<I>(mut self, providers: I) -> Self
    where
        I: IntoIterator<Item = Provider>,
    {
        for p in providers {
            if !self.preferred_providers.contains(&p) {
                self.preferred_providers.push(p);
            }
        }
        self
    }

    pub fn with_strategy(mut self, strategy: FallbackStrategy) -> Self {
        self.fallback_strategy = strategy;
        self
    }
}
