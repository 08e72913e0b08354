// ABOUTME: Security module for cookies, CSRF tokens, and response headers
// ABOUTME: Groups browser-facing protections used by the HTTP layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Pantry Contributors

/// Auth and CSRF cookie helpers
pub mod cookies;

/// Double-submit CSRF token issuance and validation
pub mod csrf;

/// Security response headers
pub mod headers;
