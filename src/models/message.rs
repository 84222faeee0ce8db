//! Chat messages as submitted by an editor front end.
//!
//! Only user-authored text is analyzed; assistant and system turns are
//! skipped.

use serde::{Deserialize, Serialize};

/// One part of a multi-part message body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentPart {
    Plain(String),
    Typed {
        #[serde(rename = "type")]
        kind: String,
        #[serde(default)]
        text: Option<String>,
    },
}

/// Message body: either a string or a list of parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<MessageContent>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Some("user".to_string()),
            content: Some(MessageContent::Text(text.into())),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Some("assistant".to_string()),
            content: Some(MessageContent::Text(text.into())),
        }
    }

    fn is_user(&self) -> bool {
        self.role.as_deref() == Some("user")
    }

    /// Text fragments of this message, in order.
    fn text_parts(&self) -> Vec<&str> {
        match &self.content {
            Some(MessageContent::Text(s)) => vec![s.as_str()],
            Some(MessageContent::Parts(parts)) => parts
                .iter()
                .filter_map(|part| match part {
                    ContentPart::Plain(s) => Some(s.as_str()),
                    ContentPart::Typed { kind, text } if kind == "text" => text.as_deref(),
                    ContentPart::Typed { .. } => None,
                })
                .collect(),
            None => Vec::new(),
        }
    }
}

/// Join all user-authored text with blank lines so each message becomes
/// its own paragraph for the chunker.
pub fn extract_user_text(messages: &[ChatMessage]) -> String {
    let mut content = String::new();
    for message in messages.iter().filter(|m| m.is_user()) {
        for part in message.text_parts() {
            content.push_str(part);
            content.push_str("\n\n");
        }
    }
    content.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_user_text_skips_other_roles() {
        let messages = vec![
            ChatMessage::user("First thought."),
            ChatMessage::assistant("Reply that should be ignored."),
            ChatMessage::user("Second thought."),
        ];
        assert_eq!(
            extract_user_text(&messages),
            "First thought.\n\nSecond thought."
        );
    }

    #[test]
    fn test_extract_user_text_from_parts() {
        let json = r#"[
            {"role": "user", "content": [
                {"type": "text", "text": "Hello there"},
                {"type": "image", "url": "ignored"},
                "bare string part"
            ]},
            {"content": "no role"},
            {"role": "system", "content": "be nice"}
        ]"#;
        let messages: Vec<ChatMessage> = serde_json::from_str(json).unwrap();
        assert_eq!(
            extract_user_text(&messages),
            "Hello there\n\nbare string part"
        );
    }

    #[test]
    fn test_extract_user_text_empty() {
        assert_eq!(extract_user_text(&[]), "");
        assert_eq!(extract_user_text(&[ChatMessage::user("   ")]), "");
    }
}
