//! HTTP dispatch against a mock chat-completions server.

use ai_hub::cache::MemoryCache;
use ai_hub::dispatch::HttpDispatcher;
use ai_hub::{
    AiHub, DispatchError, DispatchTarget, Dispatcher, GenerationRequest, HubConfig, Provider,
    ProviderEndpoint, SelectionPreferences,
};
use mockito::{Matcher, Server};
use serde_json::json;
use std::sync::Arc;

fn completion(text: &str) -> String {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{"index": 0, "message": {"role": "assistant", "content": text}, "finish_reason": "stop"}]
    })
    .to_string()
}

fn config_for(base_url: &str) -> HubConfig {
    HubConfig::default()
        .with_provider(
            Provider::Groq,
            ProviderEndpoint::new(format!("{}/groq", base_url)).with_api_key("groq-key"),
        )
        .with_provider(
            Provider::Xai,
            ProviderEndpoint::new(format!("{}/xai", base_url)).with_api_key("xai-key"),
        )
}

#[tokio::test]
async fn test_successful_dispatch_sends_messages_and_bearer() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/groq/chat/completions")
        .match_header("authorization", "Bearer groq-key")
        .match_body(Matcher::Json(json!({
            "model": "llama3-70b",
            "messages": [
                {"role": "system", "content": "You are terse."},
                {"role": "user", "content": "Hi"}
            ]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion(" Hello!\n"))
        .expect(1)
        .create_async()
        .await;

    let dispatcher = HttpDispatcher::from_config(&config_for(&server.url())).unwrap();
    let target = DispatchTarget::parse("groq/llama3-70b").unwrap();
    let text = dispatcher
        .dispatch(&target, "Hi", Some("You are terse."))
        .await
        .unwrap();

    assert_eq!(text, " Hello!\n");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_non_2xx_is_a_status_failure() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/groq/chat/completions")
        .with_status(429)
        .with_body(r#"{"error":{"message":"rate limited"}}"#)
        .create_async()
        .await;

    let dispatcher = HttpDispatcher::from_config(&config_for(&server.url())).unwrap();
    let target = DispatchTarget::parse("groq/llama3-8b").unwrap();
    let err = dispatcher.dispatch(&target, "Hi", None).await.unwrap_err();

    assert_eq!(err.provider(), Provider::Groq);
    assert_eq!(err.status(), Some(429));
    assert!(matches!(err, DispatchError::Status { ref body, .. } if body.contains("rate limited")));
}

#[tokio::test]
async fn test_missing_choices_is_malformed() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/xai/chat/completions")
        .with_status(200)
        .with_body(r#"{"choices":[]}"#)
        .create_async()
        .await;

    let dispatcher = HttpDispatcher::from_config(&config_for(&server.url())).unwrap();
    let target = DispatchTarget::parse("xai/grok-1").unwrap();
    let err = dispatcher.dispatch(&target, "Hi", None).await.unwrap_err();
    assert!(matches!(err, DispatchError::Malformed { provider: Provider::Xai, .. }));
}

#[tokio::test]
async fn test_connection_refused_is_a_network_failure() {
    let config = HubConfig::default().with_provider(
        Provider::Groq,
        ProviderEndpoint::new("http://127.0.0.1:9").with_api_key("k"),
    );
    let dispatcher = HttpDispatcher::from_config(&config).unwrap();
    let target = DispatchTarget::parse("groq/llama3-8b").unwrap();
    let err = dispatcher.dispatch(&target, "Hi", None).await.unwrap_err();
    assert!(matches!(err, DispatchError::Network { provider: Provider::Groq, .. }));
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_provider_without_endpoint_is_unconfigured() {
    let dispatcher = HttpDispatcher::from_config(&HubConfig::default()).unwrap();
    assert!(!dispatcher.providers().contains(&Provider::Vertex));

    let target = DispatchTarget::parse("vertex/gemini-pro").unwrap();
    let err = dispatcher.dispatch(&target, "Hi", None).await.unwrap_err();
    assert!(matches!(err, DispatchError::Unconfigured { provider: Provider::Vertex }));
}

#[tokio::test]
async fn test_hub_falls_back_over_http() {
    let mut server = Server::new_async().await;
    let primary = server
        .mock("POST", "/groq/chat/completions")
        .with_status(503)
        .with_body("upstream unavailable")
        .expect(1)
        .create_async()
        .await;
    let fallback = server
        .mock("POST", "/xai/chat/completions")
        .match_header("authorization", "Bearer xai-key")
        .match_body(Matcher::PartialJson(json!({"model": "grok-1"})))
        .with_status(200)
        .with_body(completion("OK"))
        .expect(1)
        .create_async()
        .await;

    let hub = AiHub::builder()
        .config(config_for(&server.url()))
        .cache_store(Arc::new(MemoryCache::new(8)))
        .build()
        .unwrap();

    let request = GenerationRequest::new("Ping", SelectionPreferences::new("chat"))
        .with_cache_key("ping");
    let result = hub.generate(&request).await.unwrap();

    assert_eq!(result.text, "OK");
    assert_eq!(result.model_used, "xai/grok-1");
    assert!(result.used_fallback);
    assert!(!result.from_cache);
    assert_eq!(hub.cache().lookup("ping").await, None);

    primary.assert_async().await;
    fallback.assert_async().await;
}
