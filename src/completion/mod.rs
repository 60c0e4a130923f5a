//! Completion provider client.
//!
//! Wraps an OpenAI-compatible chat-completions endpoint in two call
//! shapes: a non-streaming, tool-eligible request and a streaming
//! follow-up. The client only classifies provider responses into error
//! variants; retry and failover policy live in [`crate::chat`].

pub mod client;
mod sse;

pub use client::{AssistantTurn, CompletionClient, CredentialId};

use serde::Serialize;

use crate::types::message::{ChatMessage, Role};
use crate::types::tool::ToolCall;

/// One message of the provider-facing conversation.
///
/// Unlike [`ChatMessage`], this covers the full wire surface: system
/// instructions, assistant turns that carry tool calls, and tool-result
/// turns keyed by the call id.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderMessage {
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCallEcho>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl ProviderMessage {
    pub fn system(text: impl Into<String>) -> Self {
        Self::plain(Role::System, text)
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::plain(Role::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::plain(Role::Assistant, text)
    }

    fn plain(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            content: Some(text.into()),
            tool_calls: None,
            tool_call_id: None,
        }
    }

    /// The assistant turn that requested a tool call, echoed back into
    /// the history ahead of its result.
    pub fn assistant_tool_call(call: &ToolCall) -> Self {
        Self {
            role: Role::Assistant,
            content: None,
            tool_calls: Some(vec![ToolCallEcho::from(call)]),
            tool_call_id: None,
        }
    }

    /// A tool-result turn carrying the serialized payload for `call_id`.
    pub fn tool_result(call_id: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            role: Role::Tool,
            content: Some(payload.into()),
            tool_calls: None,
            tool_call_id: Some(call_id.into()),
        }
    }
}

impl From<&ChatMessage> for ProviderMessage {
    fn from(msg: &ChatMessage) -> Self {
        Self::plain(msg.role, msg.content.clone())
    }
}

/// Wire encoding of a tool call inside an assistant message.
#[derive(Debug, Clone, Serialize)]
pub struct ToolCallEcho {
    pub id: String,
    #[serde(rename = "type")]
    pub call_type: String,
    pub function: FunctionCallEcho,
}

#[derive(Debug, Clone, Serialize)]
pub struct FunctionCallEcho {
    pub name: String,
    pub arguments: String,
}

impl From<&ToolCall> for ToolCallEcho {
    fn from(call: &ToolCall) -> Self {
        Self {
            id: call.id.clone(),
            call_type: "function".to_string(),
            function: FunctionCallEcho {
                name: call.name.clone(),
                arguments: call.arguments.clone(),
            },
        }
    }
}
