//! 调度适配器：对单个后端发起一次聊天补全请求并规范化结果。
//!
//! # Dispatch Adapter
//!
//! Uniform, single-attempt access to each backend's chat-completions
//! endpoint. Request body `{model, messages}`; the first choice's content
//! comes back verbatim. Non-2xx statuses, network errors and missing choice
//! data all become a [`DispatchError`] naming the provider.
//!
//! Retry and fallback belong to the orchestrator ([`crate::hub`]).

mod error;
mod http;
mod wire;

pub use error::DispatchError;
pub use http::HttpDispatcher;
pub use wire::{extract_text, ChatCompletionRequest};

use async_trait::async_trait;

use crate::catalog::{ModelDescriptor, Provider};
use crate::{Error, ErrorContext, Result};

/// Backend model to call: provider plus provider-native model name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchTarget {
    /// Catalog-style id, `<provider>/<model>`.
    pub id: String,
    pub provider: Provider,
    pub model: String,
}

impl DispatchTarget {
    pub fn from_descriptor(model: &ModelDescriptor) -> Self {
        Self {
            id: model.id.clone(),
            provider: model.provider,
            model: model.model_name().to_string(),
        }
    }

    /// Parse a `<provider>/<model>` id.
    pub fn parse(id: &str) -> Result<Self> {
        let invalid = || {
            Error::configuration_with_context(
                format!("model id '{}' must have the form '<provider>/<model>'", id),
                ErrorContext::new().with_source("dispatch"),
            )
        };
        let (provider, model) = id.split_once('/').ok_or_else(invalid)?;
        if model.is_empty() {
            return Err(invalid());
        }
        Ok(Self {
            id: id.to_string(),
            provider: provider.parse()?,
            model: model.to_string(),
        })
    }
}

/// Performs exactly one generation call per invocation.
#[async_trait]
pub trait Dispatcher: Send + Sync {
    async fn dispatch(
        &self,
        target: &DispatchTarget,
        prompt: &str,
        system: Option<&str>,
    ) -> std::result::Result<String, DispatchError>;
}
