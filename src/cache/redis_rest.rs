//! Redis over HTTP (Upstash REST command protocol).
//!
//! Each command is a JSON array POSTed to the database URL with a bearer
//! token; replies are `{"result": ...}` or `{"error": "..."}`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

use super::backend::CacheStore;
use crate::{Error, ErrorContext, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedisRestConfig {
    pub url: String,
    pub token: String,
}

impl RedisRestConfig {
    /// Reads `REDIS_URL` and `KV_REST_API_TOKEN`; `None` when the URL is unset.
    pub fn from_env() -> Option<Self> {
        let url = std::env::var("REDIS_URL").ok().filter(|s| !s.is_empty())?;
        let token = std::env::var("KV_REST_API_TOKEN").unwrap_or_default();
        Some(Self { url, token })
    }
}

#[derive(Debug, Deserialize)]
struct Reply {
    #[serde(default)]
    result: Value,
    #[serde(default)]
    error: Option<String>,
}

pub struct RedisRestStore {
    client: reqwest::Client,
    url: url::Url,
    token: String,
}

impl RedisRestStore {
    pub fn new(config: &RedisRestConfig, timeout: Duration) -> Result<Self> {
        let url = url::Url::parse(&config.url).map_err(|e| {
            Error::configuration_with_context(
                format!("invalid redis url: {}", e),
                ErrorContext::new()
                    .with_field_path("cache.redis.url")
                    .with_source("redis_rest_store"),
            )
        })?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| crate::Error::Transport(crate::transport::TransportError::Other(e.to_string())))?;
        Ok(Self {
            client,
            url,
            token: config.token.clone(),
        })
    }

    fn unavailable(msg: impl Into<String>, command: &str) -> Error {
        Error::cache_with_context(
            msg,
            ErrorContext::new()
                .with_details(format!("command: {}", command))
                .with_source("redis_rest_store"),
        )
    }

    async fn command(&self, args: Value) -> Result<Value> {
        let name = args
            .get(0)
            .and_then(|v| v.as_str())
            .unwrap_or("?")
            .to_string();

        let mut req = self.client.post(self.url.clone()).json(&args);
        if !self.token.is_empty() {
            req = req.bearer_auth(&self.token);
        }
        let resp = req
            .send()
            .await
            .map_err(|e| Self::unavailable(format!("request failed: {}", e), &name))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| Self::unavailable(format!("failed to read reply: {}", e), &name))?;
        let reply: Reply = serde_json::from_str(&body).map_err(|_| {
            Self::unavailable(format!("HTTP {}: unparseable reply", status.as_u16()), &name)
        })?;

        if let Some(err) = reply.error {
            return Err(Self::unavailable(err, &name));
        }
        if !status.is_success() {
            return Err(Self::unavailable(format!("HTTP {}", status.as_u16()), &name));
        }
        debug!(command = name.as_str(), "redis command ok");
        Ok(reply.result)
    }
}

#[async_trait]
impl CacheStore for RedisRestStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        match self.command(json!(["GET", key])).await? {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(s)),
            // Values are opaque; hand back whatever was stored as text.
            other => Ok(Some(other.to_string())),
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let secs = ttl.as_secs().max(1);
        self.command(json!(["SET", key, value, "EX", secs])).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let removed = self.command(json!(["DEL", key])).await?;
        Ok(removed.as_u64().unwrap_or(0) > 0)
    }

    fn name(&self) -> &'static str {
        "redis_rest"
    }
}
