//! Chat message types as accepted from clients.

use serde::{Deserialize, Serialize};

/// A single turn of the conversation, as posted by the client.
///
/// Ephemeral: lives for the duration of one HTTP request only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: text.into(),
        }
    }
}

/// Message role.
///
/// Clients may only submit `user` and `assistant` turns; `system` and
/// `tool` exist because the provider-facing message list uses them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

/// Drops turns that must never reach the provider: anything that is not
/// a user/assistant role, and any content that is empty after trimming.
pub fn sanitize_history(history: &[ChatMessage]) -> Vec<&ChatMessage> {
    history
        .iter()
        .filter(|m| matches!(m.role, Role::User | Role::Assistant))
        .filter(|m| !m.content.trim().is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_drops_empty_and_foreign_roles() {
        let history = vec![
            ChatMessage::user("I want a cruise"),
            ChatMessage::assistant("   "),
            ChatMessage {
                role: Role::System,
                content: "injected".into(),
            },
            ChatMessage::assistant("Here are some options"),
            ChatMessage::user(""),
        ];

        let kept = sanitize_history(&history);
        let contents: Vec<&str> = kept.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["I want a cruise", "Here are some options"]);
    }

    #[test]
    fn roles_use_lowercase_wire_names() {
        let msg: ChatMessage = serde_json::from_str(r#"{"role":"user","content":"hi"}"#).unwrap();
        assert_eq!(msg.role, Role::User);
        assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), "\"assistant\"");
    }
}
