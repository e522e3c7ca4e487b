//! Chat message format shared by all chat-completion backends.

use serde::{Deserialize, Serialize};

/// One entry of a chat-completion `messages` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: text.into(),
        }
    }

    /// Optional system instruction first, then the user prompt.
    pub fn conversation(prompt: &str, system: Option<&str>) -> Vec<Message> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = system {
            messages.push(Message::system(system));
        }
        messages.push(Message::user(prompt));
        messages
    }
}

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_conversation_order() {
        let msgs = Message::conversation("hi", Some("be terse"));
        assert_eq!(
            serde_json::to_value(&msgs).unwrap(),
            json!([
                {"role": "system", "content": "be terse"},
                {"role": "user", "content": "hi"}
            ])
        );
        assert_eq!(Message::conversation("hi", None), vec![Message::user("hi")]);
        assert_eq!(Message::assistant("ok").role, MessageRole::Assistant);
    }
}
