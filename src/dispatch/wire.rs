//! Chat-completions request/response bodies.

use serde::{Deserialize, Serialize};

use crate::types::Message;

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<Message>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// First choice's content, untouched. `Err` carries a human-readable reason.
pub fn extract_text(body: &str) -> Result<String, String> {
    let parsed: ChatCompletionResponse =
        serde_json::from_str(body).map_err(|e| format!("invalid JSON: {}", e))?;
    let first = parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| "response has no choices".to_string())?;
    first
        .message
        .and_then(|m| m.content)
        .ok_or_else(|| "first choice has no message content".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_first_choice_verbatim() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"  Hi!\n"}},{"message":{"content":"second"}}]}"#;
        assert_eq!(extract_text(body).unwrap(), "  Hi!\n");
    }

    #[test]
    fn test_rejects_missing_choice_data() {
        assert!(extract_text("not json").is_err());
        assert!(extract_text(r#"{"choices":[]}"#).is_err());
        assert!(extract_text(r#"{"id":"x"}"#).is_err());
        assert!(extract_text(r#"{"choices":[{"finish_reason":"stop"}]}"#).is_err());
        assert!(extract_text(r#"{"choices":[{"message":{"content":null}}]}"#).is_err());
    }

    #[test]
    fn test_request_shape() {
        let req = ChatCompletionRequest {
            model: "grok-1",
            messages: Message::conversation("hello", None),
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            serde_json::json!({
                "model": "grok-1",
                "messages": [{"role": "user", "content": "hello"}]
            })
        );
    }
}
