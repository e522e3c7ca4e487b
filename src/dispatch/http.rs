//! HTTP dispatcher: one reqwest transport per configured provider.

use async_trait::async_trait;
use std::collections::HashMap;
use tracing::{debug, info};

use super::wire::{extract_text, ChatCompletionRequest};
use super::{DispatchError, DispatchTarget, Dispatcher};
use crate::catalog::Provider;
use crate::config::HubConfig;
use crate::transport::HttpTransport;
use crate::types::Message;
use crate::Result;

pub struct HttpDispatcher {
    transports: HashMap<Provider, HttpTransport>,
}

impl HttpDispatcher {
    /// Build transports for every provider with a configured or built-in
    /// endpoint. Missing credentials are not an error here; the backend's
    /// rejection surfaces as a dispatch failure.
    pub fn from_config(config: &HubConfig) -> Result<Self> {
        let client = config.http.build_client()?;
        let mut transports = HashMap::new();
        for provider in Provider::ALL {
            let Some(endpoint) = config.endpoint(provider) else {
                continue;
            };
            let api_key = endpoint.api_key.clone().or_else(|| {
                HttpTransport::resolve_api_key(provider, endpoint.api_key_env.as_deref())
            });
            let transport = HttpTransport::new(
                client.clone(),
                provider,
                &endpoint.base_url,
                &endpoint.path,
                api_key,
            );
            debug!(
                provider = provider.as_str(),
                url = transport.url(),
                has_credentials = transport.has_credentials(),
                "registered provider transport"
            );
            transports.insert(provider, transport);
        }
        Ok(Self { transports })
    }

    pub fn providers(&self) -> Vec<Provider> {
        let mut providers: Vec<_> = self.transports.keys().copied().collect();
        providers.sort();
        providers
    }
}

#[async_trait]
impl Dispatcher for HttpDispatcher {
    async fn dispatch(
        &self,
        target: &DispatchTarget,
        prompt: &str,
        system: Option<&str>,
    ) -> std::result::Result<String, DispatchError> {
        let provider = target.provider;
        let transport = self
            .transports
            .get(&provider)
            .ok_or(DispatchError::Unconfigured { provider })?;

        let body = serde_json::to_value(ChatCompletionRequest {
            model: &target.model,
            messages: Message::conversation(prompt, system),
        })
        .map_err(|e| DispatchError::Malformed {
            provider,
            detail: format!("failed to encode request: {}", e),
        })?;

        let reply = transport
            .post_json(&body)
            .await
            .map_err(|source| DispatchError::Network { provider, source })?;

        if !reply.is_success() {
            info!(
                provider = provider.as_str(),
                model = target.id.as_str(),
                http_status = reply.status,
                duration_ms = reply.duration.as_millis() as u64,
                "chat completion request failed"
            );
            return Err(DispatchError::Status {
                provider,
                status: reply.status,
                body: reply.body,
            });
        }

        extract_text(&reply.body).map_err(|detail| DispatchError::Malformed { provider, detail })
    }
}
