// ABOUTME: HTTP middleware for authentication, CSRF validation, CORS, and request tracing
// ABOUTME: Shared request-processing building blocks used by route handlers and the router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Pantry Contributors

/// Bearer/cookie authentication
pub mod auth;
/// Cross-origin resource sharing
pub mod cors;
/// Double-submit CSRF enforcement
pub mod csrf;
/// Request spans and request ids
pub mod tracing;

pub use auth::{authenticate_request, AuthenticatedUser};
pub use cors::setup_cors;
pub use csrf::csrf_protection;
pub use self::tracing::{create_request_span, make_request_span};
