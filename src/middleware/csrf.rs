// ABOUTME: CSRF validation middleware for state-changing HTTP requests
// ABOUTME: Enforces the double-submit check between the X-CSRF-Token header and the _csrf cookie
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Pantry Contributors

//! CSRF validation middleware
//!
//! Safe methods pass through. Every other request must carry the token issued
//! by `GET /csrf` both in the `X-CSRF-Token` header and in the `_csrf` cookie.

use crate::constants::http::{CSRF_COOKIE_NAME, CSRF_HEADER_NAME};
use crate::errors::AppError;
use crate::logging::AppLogger;
use crate::middleware::tracing::request_id;
use crate::resources::ServerResources;
use crate::security::cookies::get_cookie_value;
use axum::extract::{Request, State};
use axum::http::Method;
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;

/// Paths never subject to CSRF checks
const CSRF_EXEMPT_PATHS: &[&str] = &["/health", "/ready", "/csrf"];

/// Check if request requires CSRF validation
#[must_use]
pub fn requires_csrf_validation(method: &Method, path: &str) -> bool {
    !matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
        && !CSRF_EXEMPT_PATHS.contains(&path)
}

/// `axum::middleware::from_fn_with_state` handler enforcing CSRF tokens
///
/// # Errors
///
/// Returns `CsrfInvalid` (403) when the double-submit check fails
pub async fn csrf_protection(
    State(resources): State<Arc<ServerResources>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !resources.config.security.csrf_enabled
        || !requires_csrf_validation(request.method(), request.uri().path())
    {
        return Ok(next.run(request).await);
    }

    let headers = request.headers();
    let header_token = headers
        .get(CSRF_HEADER_NAME)
        .and_then(|h| h.to_str().ok())
        .map(str::to_owned);
    let cookie_token = get_cookie_value(headers, CSRF_COOKIE_NAME);

    if let Err(e) = resources
        .csrf_manager
        .validate_double_submit(header_token.as_deref(), cookie_token.as_deref())
        .await
    {
        AppLogger::log_security_event(
            "csrf_rejected",
            "medium",
            &format!("{} {}: {}", request.method(), request.uri().path(), e.message),
            None,
        );
        return Err(match request_id(headers) {
            Some(id) => e.with_request_id(id),
            None => e,
        });
    }

    tracing::debug!(
        method = %request.method(),
        path = %request.uri().path(),
        "CSRF token validated successfully"
    );

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_methods_skip_validation() {
        assert!(!requires_csrf_validation(&Method::GET, "/api/food-items"));
        assert!(!requires_csrf_validation(&Method::HEAD, "/api/food-items"));
        assert!(!requires_csrf_validation(&Method::OPTIONS, "/login"));
    }

    #[test]
    fn test_state_changing_methods_require_validation() {
        assert!(requires_csrf_validation(&Method::POST, "/login"));
        assert!(requires_csrf_validation(&Method::PUT, "/api/food-items/1"));
        assert!(requires_csrf_validation(&Method::DELETE, "/api/food-items/1"));
    }

    #[test]
    fn test_exempt_paths() {
        assert!(!requires_csrf_validation(&Method::POST, "/health"));
    }
}
