// ABOUTME: Request tracing helpers for correlation and structured logging
// ABOUTME: Builds per-request spans carrying method, path, and the propagated request id
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Pantry Contributors

use crate::constants::http::REQUEST_ID_HEADER;
use axum::http::{HeaderMap, Request};
use tracing::Span;

/// Read the request id header, if present
#[must_use]
pub fn request_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

/// Create a tracing span for HTTP requests
pub fn create_request_span(method: &str, path: &str) -> Span {
    tracing::info_span!(
        "http_request",
        method = %method,
        path = %path,
        request_id = tracing::field::Empty,
    )
}

/// `TraceLayer::make_span_with` hook: span with the request id already recorded
pub fn make_request_span<B>(request: &Request<B>) -> Span {
    let span = create_request_span(request.method().as_str(), request.uri().path());
    if let Some(id) = request_id(request.headers()) {
        span.record("request_id", id.as_str());
    }
    span
}
