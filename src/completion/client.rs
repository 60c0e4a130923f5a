//! The completion client: request building, credential selection and
//! provider error classification.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::completion::{sse, ProviderMessage};
use crate::config::{ProviderConfig, SamplingParams};
use crate::types::tool::{ToolCall, ToolDefinition};
use crate::{BoxStream, Error, Result};

/// Which of the two pre-configured API credentials to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialId {
    Primary,
    Secondary,
}

impl fmt::Display for CredentialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialId::Primary => f.write_str("primary"),
            CredentialId::Secondary => f.write_str("secondary"),
        }
    }
}

/// The non-streaming result: one assistant turn, possibly carrying tool
/// calls instead of (or alongside) text.
#[derive(Debug, Clone)]
pub struct AssistantTurn {
    pub content: Option<String>,
    pub tool_calls: Vec<ToolCall>,
}

/// Client for an OpenAI-compatible chat-completions endpoint.
///
/// Holds no per-request state; credentials are immutable configuration
/// shared across concurrent requests.
pub struct CompletionClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    primary_api_key: String,
    secondary_api_key: Option<String>,
    sampling: SamplingParams,
}

impl CompletionClient {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(Error::Transport)?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            primary_api_key: config.primary_api_key.clone(),
            secondary_api_key: config.secondary_api_key.clone(),
            sampling: config.sampling,
        })
    }

    /// Whether a secondary credential is configured at all.
    pub fn has_secondary(&self) -> bool {
        self.secondary_api_key.is_some()
    }

    fn api_key(&self, credential: CredentialId) -> Result<&str> {
        match credential {
            CredentialId::Primary => Ok(&self.primary_api_key),
            CredentialId::Secondary => self.secondary_api_key.as_deref().ok_or_else(|| {
                Error::Configuration("secondary credential requested but not configured".into())
            }),
        }
    }

    /// Tool-eligible, non-streaming completion.
    pub async fn complete(
        &self,
        credential: CredentialId,
        request_id: &str,
        messages: &[ProviderMessage],
        tools: Option<&[ToolDefinition]>,
    ) -> Result<AssistantTurn> {
        let body = CompletionBody {
            model: &self.model,
            messages,
            temperature: self.sampling.temperature,
            max_tokens: Some(self.sampling.max_tokens),
            frequency_penalty: self.sampling.frequency_penalty,
            presence_penalty: self.sampling.presence_penalty,
            stream: false,
            tools,
        };

        let response = self.post(credential, request_id, &body).await?;
        let response = classify_status(response).await?;
        let parsed: CompletionResponse = response.json().await.map_err(Error::Transport)?;
        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::MalformedResponse("response contained no choices".into()))?;

        Ok(AssistantTurn {
            content: choice.message.content,
            tool_calls: choice
                .message
                .tool_calls
                .into_iter()
                .map(|tc| ToolCall {
                    id: tc.id,
                    name: tc.function.name,
                    arguments: tc.function.arguments,
                })
                .collect(),
        })
    }

    /// Streaming completion; yields text deltas in provider emission order.
    ///
    /// Errors before the first delta propagate from this call; errors
    /// after that surface as items of the returned stream.
    pub async fn stream(
        &self,
        credential: CredentialId,
        request_id: &str,
        messages: &[ProviderMessage],
    ) -> Result<BoxStream<'static, String>> {
        let body = CompletionBody {
            model: &self.model,
            messages,
            temperature: self.sampling.temperature,
            max_tokens: None,
            frequency_penalty: self.sampling.frequency_penalty,
            presence_penalty: self.sampling.presence_penalty,
            stream: true,
            tools: None,
        };

        let response = self.post(credential, request_id, &body).await?;
        let response = classify_status(response).await?;
        Ok(sse::content_deltas(response.bytes_stream()))
    }

    async fn post(
        &self,
        credential: CredentialId,
        request_id: &str,
        body: &CompletionBody<'_>,
    ) -> Result<reqwest::Response> {
        let url = format!("{}/chat/completions", self.base_url);
        self.http
            .post(&url)
            .bearer_auth(self.api_key(credential)?)
            .header("accept", "text/event-stream")
            // Correlation id; providers may ignore it, but it links our
            // logs to theirs when they don't.
            .header("x-request-id", request_id)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)
    }
}

/// Maps non-success statuses onto the error taxonomy. 429 is the one
/// class the orchestrator may recover from.
async fn classify_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        let retry_after_secs = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());
        return Err(Error::RateLimited { retry_after_secs });
    }

    let message = response.text().await.unwrap_or_default();
    Err(Error::Remote {
        status: status.as_u16(),
        message: truncate(&message, 512),
    })
}

fn truncate(text: &str, max: usize) -> String {
    if text.len() <= max {
        text.to_string()
    } else {
        let mut end = max;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &text[..end])
    }
}

#[derive(Serialize)]
struct CompletionBody<'a> {
    model: &'a str,
    messages: &'a [ProviderMessage],
    temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    frequency_penalty: f64,
    presence_penalty: f64,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<&'a [ToolDefinition]>,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: WireAssistantMessage,
}

#[derive(Deserialize)]
struct WireAssistantMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Vec<WireToolCall>,
}

#[derive(Deserialize)]
struct WireToolCall {
    id: String,
    function: WireFunctionCall,
}

#[derive(Deserialize)]
struct WireFunctionCall {
    name: String,
    arguments: String,
}
