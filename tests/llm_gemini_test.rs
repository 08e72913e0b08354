// ABOUTME: Integration tests for the Gemini provider against a local mock server
// ABOUTME: Verifies request shape, response parsing, and error code mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Pantry Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use smart_pantry::errors::ErrorCode;
use smart_pantry::llm::{ChatMessage, ChatRequest, GeminiProvider, LlmProvider};
use tokio::net::TcpListener;

/// (`model:method` path segment, query parameters, JSON body) per call
type RequestLog = Arc<Mutex<Vec<(String, HashMap<String, String>, Value)>>>;

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    body: Value,
    seen: RequestLog,
}

async fn generate(
    State(state): State<MockState>,
    Path(model_method): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.seen.lock().unwrap().push((model_method, query, body));
    (state.status, Json(state.body.clone()))
}

async fn list_models(Query(query): Query<HashMap<String, String>>) -> StatusCode {
    if query.get("key").map(String::as_str) == Some("test-key") {
        StatusCode::OK
    } else {
        StatusCode::FORBIDDEN
    }
}

/// Start a mock Gemini endpoint; returns its base URL and the request log
async fn start_mock(
    status: StatusCode,
    body: Value,
) -> (String, RequestLog) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let state = MockState {
        status,
        body,
        seen: seen.clone(),
    };
    let app = Router::new()
        .route("/v1beta/models/:model_method", post(generate))
        .route("/v1beta/models", get(list_models))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}/v1beta"), seen)
}

fn provider(base_url: &str) -> GeminiProvider {
    GeminiProvider::new("test-key")
        .with_base_url(base_url)
        .with_default_model("gemini-test")
        .with_timeout(Duration::from_secs(5))
}

fn request() -> ChatRequest {
    ChatRequest::new(vec![
        ChatMessage::system("You are a cook."),
        ChatMessage::user("Eggs and spinach?"),
    ])
}

#[tokio::test]
async fn test_complete_success() {
    let (base_url, seen) = start_mock(
        StatusCode::OK,
        json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "Spinach "}, {"text": "omelette"}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 3, "totalTokenCount": 15}
        }),
    )
    .await;

    let response = provider(&base_url).complete(&request()).await.unwrap();
    assert_eq!(response.content, "Spinach omelette");
    assert_eq!(response.model, "gemini-test");
    assert_eq!(response.finish_reason.as_deref(), Some("STOP"));
    assert_eq!(response.usage.unwrap().total_tokens, 15);

    let calls = seen.lock().unwrap();
    let (model_method, query, body) = &calls[0];
    assert_eq!(model_method, "gemini-test:generateContent");
    assert_eq!(query.get("key").map(String::as_str), Some("test-key"));
    assert_eq!(body["system_instruction"]["parts"][0]["text"], "You are a cook.");
    assert_eq!(body["contents"][0]["role"], "user");
    assert_eq!(body["contents"][0]["parts"][0]["text"], "Eggs and spinach?");
}

#[tokio::test]
async fn test_request_model_overrides_default() {
    let (base_url, seen) = start_mock(
        StatusCode::OK,
        json!({"candidates": [{"content": {"parts": [{"text": "ok"}]}}]}),
    )
    .await;

    let request = request().with_model("gemini-1.5-pro").with_temperature(0.4);
    provider(&base_url).complete(&request).await.unwrap();

    let calls = seen.lock().unwrap();
    assert_eq!(calls[0].0, "gemini-1.5-pro:generateContent");
    assert!(calls[0].2.get("generation_config").is_some());
}

#[tokio::test]
async fn test_rate_limited() {
    let (base_url, _) = start_mock(
        StatusCode::TOO_MANY_REQUESTS,
        json!({"error": {"code": 429, "message": "Quota exceeded. Please retry in 2.5s.", "status": "RESOURCE_EXHAUSTED"}}),
    )
    .await;

    let error = provider(&base_url).complete(&request()).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::ExternalRateLimited);
    assert!(error.message.contains("3 seconds"));
}

#[tokio::test]
async fn test_server_error_carries_message() {
    let (base_url, _) = start_mock(
        StatusCode::BAD_REQUEST,
        json!({"error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}}),
    )
    .await;

    let error = provider(&base_url).complete(&request()).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::ExternalServiceError);
    assert!(error.message.contains("API key not valid"));
}

#[tokio::test]
async fn test_no_candidates() {
    let (base_url, _) = start_mock(StatusCode::OK, json!({"candidates": []})).await;

    let error = provider(&base_url).complete(&request()).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::ExternalServiceError);
}

#[tokio::test]
async fn test_candidate_without_text_is_empty() {
    let (base_url, _) = start_mock(
        StatusCode::OK,
        json!({"candidates": [{"finishReason": "SAFETY"}]}),
    )
    .await;

    let response = provider(&base_url).complete(&request()).await.unwrap();
    assert!(response.content.is_empty());
}

#[tokio::test]
async fn test_unreachable_endpoint() {
    // Bind then drop to get a port with nothing listening
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let error = provider(&format!("http://{addr}/v1beta"))
        .complete(&request())
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ExternalServiceUnavailable);
    assert!(!error.message.contains("test-key"));
}

#[tokio::test]
async fn test_health_check() {
    let (base_url, _) = start_mock(StatusCode::OK, json!({})).await;

    assert!(provider(&base_url).health_check().await.unwrap());
    let wrong_key = GeminiProvider::new("bad-key").with_base_url(base_url);
    assert!(!wrong_key.health_check().await.unwrap());
}
