// ABOUTME: CORS middleware configuration for HTTP API endpoints
// ABOUTME: Allows the configured frontend origins with credentials and the CSRF header
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Pantry Contributors

use crate::config::environment::CorsConfig;
use crate::constants::http::CSRF_HEADER_NAME;
use http::{header, header::HeaderName, HeaderValue, Method};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Preflight cache lifetime
const CORS_MAX_AGE: Duration = Duration::from_secs(3600);

/// Configure CORS for the web client
///
/// Origins come from `CORS_ALLOWED_ORIGINS` plus `FRONTEND_URL`. Explicit
/// origins get `Access-Control-Allow-Credentials: true` so the auth and CSRF
/// cookies travel with requests. `*` allows any origin but without
/// credentials, which browsers refuse to combine with a wildcard.
///
/// ```bash
/// export CORS_ALLOWED_ORIGINS="https://pantry.example.com,http://localhost:3000"
/// ```
#[must_use]
pub fn setup_cors(config: &CorsConfig) -> CorsLayer {
    let csrf_header = HeaderName::from_static(CSRF_HEADER_NAME);

    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::ORIGIN,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::AUTHORIZATION,
            csrf_header.clone(),
        ])
        .expose_headers([csrf_header])
        .max_age(CORS_MAX_AGE);

    if config.allows_any_origin() {
        return layer.allow_origin(AllowOrigin::any());
    }

    let origins: Vec<HeaderValue> = config
        .origins()
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    if origins.is_empty() {
        tracing::warn!("No valid CORS origins configured; cross-origin requests will be refused");
    }

    layer
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
}
