use keyring::Entry;
use reqwest::Proxy;
use std::env;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::catalog::Provider;
use crate::Result;

/// Settings shared by every outbound HTTP client.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_url: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            proxy_url: None,
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    /// Build the pooled reqwest client used by all provider transports.
    pub fn build_client(&self) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout())
            .pool_max_idle_per_host(32)
            .pool_idle_timeout(Some(Duration::from_secs(90)));

        if let Some(proxy_url) = &self.proxy_url {
            if let Ok(proxy) = Proxy::all(proxy_url) {
                builder = builder.proxy(proxy);
            }
        }

        builder
            .build()
            .map_err(|e| crate::Error::Transport(TransportError::Other(e.to_string())))
    }
}

/// Raw HTTP outcome: the caller decides what a status means.
#[derive(Debug, Clone)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
    pub duration: Duration,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One provider's chat-completions endpoint.
pub struct HttpTransport {
    client: reqwest::Client,
    provider: Provider,
    url: String,
    api_key: Option<String>,
}

impl HttpTransport {
    pub fn new(
        client: reqwest::Client,
        provider: Provider,
        base_url: &str,
        path: &str,
        api_key: Option<String>,
    ) -> Self {
        let url = format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Self {
            client,
            provider,
            url,
            api_key,
        }
    }

    /// Credential lookup: OS keyring (service `ai-hub`), then the env var.
    pub fn resolve_api_key(provider: Provider, env_var: Option<&str>) -> Option<String> {
        // 1. Try Keyring
        if let Ok(entry) = Entry::new("ai-hub", provider.as_str()) {
            if let Ok(key) = entry.get_password() {
                return Some(key);
            }
        }

        // 2. Try Environment Variable (PROVIDER_API_KEY)
        let default_var = format!("{}_API_KEY", provider.as_str().to_uppercase());
        env::var(env_var.unwrap_or(&default_var))
            .ok()
            .filter(|k| !k.is_empty())
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }

    /// POST a JSON body and collect the full reply. Exactly one attempt.
    pub async fn post_json(
        &self,
        body: &serde_json::Value,
    ) -> std::result::Result<HttpReply, TransportError> {
        let start = Instant::now();
        let mut req = self.client.post(&self.url).json(body);

        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }

        let resp = req.send().await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        let duration = start.elapsed();
        debug!(
            provider = self.provider.as_str(),
            http_status = status,
            duration_ms = duration.as_millis() as u64,
            "chat completion reply"
        );
        Ok(HttpReply {
            status,
            body,
            duration,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Other(String),
}
