// ABOUTME: Security response headers applied to every HTTP response
// ABOUTME: Builds tower-http SetResponseHeader layers for XSS, sniffing, framing, and HSTS
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Pantry Contributors

use axum::http::{header, HeaderName, HeaderValue};
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;

/// `X-XSS-Protection` value
pub const XSS_PROTECTION: &str = "1; mode=block";
/// `X-Content-Type-Options` value
pub const CONTENT_TYPE_OPTIONS: &str = "nosniff";
/// `X-Frame-Options` value
pub const FRAME_OPTIONS: &str = "SAMEORIGIN";
/// `Strict-Transport-Security` value
pub const HSTS: &str = "max-age=31536000; includeSubDomains; preload";

/// Header name/value pairs to set, HSTS included only when enabled
#[must_use]
pub fn security_headers(hsts_enabled: bool) -> Vec<(HeaderName, HeaderValue)> {
    let mut headers = vec![
        (
            header::X_XSS_PROTECTION,
            HeaderValue::from_static(XSS_PROTECTION),
        ),
        (
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static(CONTENT_TYPE_OPTIONS),
        ),
        (
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static(FRAME_OPTIONS),
        ),
    ];

    if hsts_enabled {
        headers.push((
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static(HSTS),
        ));
    }

    headers
}

/// Wrap `router` so every response carries the security headers
#[must_use]
pub fn apply_security_headers<S>(router: Router<S>, hsts_enabled: bool) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    security_headers(hsts_enabled)
        .into_iter()
        .fold(router, |router, (name, value)| {
            router.layer(SetResponseHeaderLayer::overriding(name, value))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsts_only_when_enabled() {
        assert_eq!(security_headers(false).len(), 3);

        let with_hsts = security_headers(true);
        assert!(with_hsts
            .iter()
            .any(|(name, value)| name == &header::STRICT_TRANSPORT_SECURITY && value == HSTS));
    }
}
