// ABOUTME: Request authentication from Bearer headers or the auth cookie
// ABOUTME: Validates access tokens and yields the authenticated user's id and email
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Pantry Contributors

use crate::auth::AuthManager;
use crate::constants::http::AUTH_COOKIE_NAME;
use crate::errors::{AppError, AppResult};
use crate::resources::ServerResources;
use crate::security::cookies::get_cookie_value;
use axum::http::{header, HeaderMap};
use serde::{Deserialize, Serialize};

/// Identity established for a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// User id from the token
    pub user_id: i64,
    /// Email from the token
    pub email: String,
}

/// Where the token was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMethod {
    /// `Authorization: Bearer <token>`
    BearerHeader,
    /// `token` cookie
    Cookie,
}

impl AuthMethod {
    /// Label recorded on spans
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BearerHeader => "JWT_BEARER",
            Self::Cookie => "JWT_COOKIE",
        }
    }
}

/// Pull the access token from the request, header first
#[must_use]
pub fn extract_token(headers: &HeaderMap) -> Option<(String, AuthMethod)> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| (token.to_owned(), AuthMethod::BearerHeader));

    bearer.or_else(|| {
        get_cookie_value(headers, AUTH_COOKIE_NAME).map(|token| (token, AuthMethod::Cookie))
    })
}

/// Validate an access token and build the caller identity
///
/// # Errors
///
/// Returns `AuthExpired` or `AuthInvalid` when validation fails
pub fn authenticate_token(auth_manager: &AuthManager, token: &str) -> AppResult<AuthenticatedUser> {
    let claims = auth_manager.validate_access_token(token)?;
    Ok(AuthenticatedUser {
        user_id: claims.user_id,
        email: claims.email,
    })
}

/// Authenticate a request using the Bearer header, falling back to the cookie
///
/// # Errors
///
/// Returns `AuthRequired` if no token is present, otherwise the validation error
#[tracing::instrument(
    skip(headers, resources),
    fields(
        auth_method = tracing::field::Empty,
        user_id = tracing::field::Empty,
        success = tracing::field::Empty,
    )
)]
pub fn authenticate_request(
    headers: &HeaderMap,
    resources: &ServerResources,
) -> AppResult<AuthenticatedUser> {
    let Some((token, method)) = extract_token(headers) else {
        tracing::debug!("Authentication failed: no bearer header or auth cookie");
        return Err(AppError::auth_required());
    };

    let span = tracing::Span::current();
    span.record("auth_method", method.as_str());

    match authenticate_token(&resources.auth_manager, &token) {
        Ok(user) => {
            span.record("user_id", user.user_id).record("success", true);
            Ok(user)
        }
        Err(e) => {
            span.record("success", false);
            tracing::warn!("{} authentication failed: {}", method.as_str(), e);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_extract_token_prefers_bearer_header() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer header-token"));
        headers.insert(header::COOKIE, HeaderValue::from_static("token=cookie-token"));

        assert_eq!(
            extract_token(&headers),
            Some(("header-token".to_owned(), AuthMethod::BearerHeader))
        );
    }

    #[test]
    fn test_extract_token_falls_back_to_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        headers.insert(header::COOKIE, HeaderValue::from_static("token=cookie-token"));

        assert_eq!(
            extract_token(&headers),
            Some(("cookie-token".to_owned(), AuthMethod::Cookie))
        );
    }

    #[test]
    fn test_extract_token_none() {
        assert_eq!(extract_token(&HeaderMap::new()), None);
    }
}
