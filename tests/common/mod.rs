//! Shared helpers for the integration tests: a router wired to a mock
//! completion provider and a small fixed catalog.

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

use voyage_assistant::catalog::{CruiseSummary, InMemoryCatalog};
use voyage_assistant::chat::ChatOrchestrator;
use voyage_assistant::completion::CompletionClient;
use voyage_assistant::config::{ProviderConfig, SamplingParams};
use voyage_assistant::server::{routes, AppState};

pub const PRIMARY_KEY: &str = "primary-key";
pub const SECONDARY_KEY: &str = "secondary-key";

pub fn provider_config(base_url: &str, with_secondary: bool) -> ProviderConfig {
    ProviderConfig {
        base_url: base_url.to_string(),
        model: "test-model".to_string(),
        primary_api_key: PRIMARY_KEY.to_string(),
        secondary_api_key: with_secondary.then(|| SECONDARY_KEY.to_string()),
        timeout: Duration::from_secs(5),
        sampling: SamplingParams::default(),
    }
}

pub fn sample_cruises() -> Vec<CruiseSummary> {
    vec![
        CruiseSummary {
            id: 1,
            name: "Caribbean Dream".into(),
            route: "Miami - Cozumel - Grand Cayman".into(),
            description: "A relaxed island-hopping escape.".into(),
            tags: vec!["family".into(), "beach".into()],
            price: 649,
            duration: "4 Nights".into(),
        },
        CruiseSummary {
            id: 2,
            name: "Luxury Riviera".into(),
            route: "Barcelona - Nice - Rome".into(),
            description: "Five-star dining along the Mediterranean.".into(),
            tags: vec!["luxury".into()],
            price: 1890,
            duration: "7 Nights".into(),
        },
        CruiseSummary {
            id: 3,
            name: "Baja Sunsets".into(),
            route: "Los Angeles - Cabo San Lucas".into(),
            description: "A budget-friendly Pacific loop.".into(),
            tags: vec!["budget".into(), "beach".into()],
            price: 389,
            duration: "4 Nights".into(),
        },
    ]
}

pub fn router(base_url: &str, with_secondary: bool) -> Router {
    let completions = CompletionClient::new(&provider_config(base_url, with_secondary))
        .expect("client builds");
    let catalog = InMemoryCatalog::new(sample_cruises());
    let orchestrator = ChatOrchestrator::new(Arc::new(completions), Arc::new(catalog));
    routes::create_router(Arc::new(AppState { orchestrator }))
}

pub async fn post_chat(router: Router, body: Value) -> (StatusCode, Response<Body>) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds");
    let response = router.oneshot(request).await.expect("router responds");
    (response.status(), response)
}

pub async fn read_body(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    String::from_utf8(bytes.to_vec()).expect("body is UTF-8")
}

/// Splits an SSE body into its decoded JSON frame payloads.
pub fn frames(body: &str) -> Vec<Value> {
    body.split("\n\n")
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .map(|chunk| {
            let payload = chunk
                .strip_prefix("data: ")
                .unwrap_or_else(|| panic!("frame without data prefix: {chunk}"));
            serde_json::from_str(payload)
                .unwrap_or_else(|e| panic!("frame payload is not JSON ({e}): {payload}"))
        })
        .collect()
}
