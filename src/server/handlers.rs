//! Request handlers: validation, orchestration hand-off, SSE response
//! assembly and the error-to-HTTP mapping.

use axum::{
    body::Body,
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
};
use bytes::Bytes;
use futures::StreamExt;
use serde::Serialize;
use serde_json::Value;
use std::convert::Infallible;
use std::sync::Arc;

use crate::server::AppState;
use crate::types::message::ChatMessage;
use crate::{stream, Error, Result};

pub async fn health() -> Json<Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// `POST /api/chat`, the conversational search endpoint.
///
/// Success is an SSE stream; every failure is a JSON `{error}` body so
/// the client never has to guess which shape it received.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Response> {
    let Json(body) =
        body.map_err(|e| Error::Validation(format!("request body must be JSON: {e}")))?;
    let messages = parse_messages(&body)?;

    let reply = state.orchestrator.respond(&messages).await?;
    let frames = stream::into_events(reply)
        .map(|event| Ok::<Bytes, Infallible>(Bytes::from(event.sse_frame())));

    let mut response = Response::new(Body::from_stream(frames));
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/event-stream"),
    );
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
    Ok(response)
}

/// Validates the `messages` field before any provider call is attempted.
fn parse_messages(body: &Value) -> Result<Vec<ChatMessage>> {
    let Some(messages) = body.get("messages") else {
        return Err(Error::Validation("messages is required".into()));
    };
    let Some(array) = messages.as_array() else {
        return Err(Error::Validation("messages must be an array".into()));
    };
    if array.is_empty() {
        return Err(Error::Validation("messages must not be empty".into()));
    }
    serde_json::from_value(messages.clone())
        .map_err(|e| Error::Validation(format!("invalid message: {e}")))
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Error::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Error::ToolArguments(reason) => {
                tracing::warn!(reason = %reason, "unusable tool call");
                (
                    StatusCode::BAD_REQUEST,
                    "The assistant had trouble formatting its search request. Please try again."
                        .to_string(),
                )
            }
            Error::RateLimited { .. } => (
                StatusCode::TOO_MANY_REQUESTS,
                "All AI capacity is currently used. Please wait 60 seconds.".to_string(),
            ),
            other => {
                tracing::error!(error = %other, "chat exchange failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "The assistant is unavailable right now. Please try again.".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_messages_is_rejected() {
        let err = parse_messages(&serde_json::json!({})).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn non_array_messages_is_rejected() {
        let err = parse_messages(&serde_json::json!({ "messages": "hello" })).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn empty_messages_is_rejected() {
        let err = parse_messages(&serde_json::json!({ "messages": [] })).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn well_formed_messages_parse() {
        let messages = parse_messages(&serde_json::json!({
            "messages": [{ "role": "user", "content": "hi" }]
        }))
        .unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].content, "hi");
    }

    #[tokio::test]
    async fn rate_limit_maps_to_429_with_the_capacity_message() {
        let response = Error::RateLimited {
            retry_after_secs: None,
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body["error"],
            "All AI capacity is currently used. Please wait 60 seconds."
        );
    }

    #[tokio::test]
    async fn tool_argument_failures_map_to_400_without_leaking_details() {
        let response = Error::ToolArguments("delta: {broken".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        let message = body["error"].as_str().unwrap();
        assert!(message.contains("trouble formatting"));
        assert!(!message.contains("broken"));
    }

    #[tokio::test]
    async fn everything_else_maps_to_500() {
        let response = Error::Remote {
            status: 503,
            message: "upstream".into(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
