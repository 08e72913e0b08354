// ABOUTME: Token DTOs for JWT issuance and refresh
// ABOUTME: Wire format uses camelCase field names expected by the web client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Pantry Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::auth::BEARER_TOKEN_TYPE;

/// Distinguishes access tokens from refresh tokens inside the claims
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Short-lived token for API calls
    Access,
    /// Long-lived token exchanged for a new pair
    Refresh,
}

impl TokenType {
    /// Lowercase name as stored in the claims
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::Refresh => "refresh",
        }
    }
}

/// Freshly issued access and refresh tokens
#[derive(Debug, Clone)]
pub struct TokenPair {
    /// Signed access token
    pub access_token: String,
    /// Signed refresh token
    pub refresh_token: String,
    /// Access token expiry
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiry
    pub refresh_expires_at: DateTime<Utc>,
}

/// Token payload returned by login and refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    /// Signed access token
    pub access_token: String,
    /// Always `Bearer`
    pub token_type: String,
    /// Seconds until the access token expires
    pub expires_in: i64,
    /// Refresh token, when one was issued
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub refresh_token: Option<String>,
    /// Access token expiry
    pub expires_at: DateTime<Utc>,
}

impl TokenResponse {
    /// Build the response for `pair`, measuring `expiresIn` from `now`
    #[must_use]
    pub fn from_pair(pair: &TokenPair, now: DateTime<Utc>) -> Self {
        Self {
            access_token: pair.access_token.clone(),
            token_type: BEARER_TOKEN_TYPE.to_owned(),
            expires_in: (pair.access_expires_at - now).num_seconds().max(0),
            refresh_token: Some(pair.refresh_token.clone()),
            expires_at: pair.access_expires_at,
        }
    }
}

/// Body of `POST /refresh-token`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    /// Refresh token previously issued at login
    #[serde(default)]
    pub refresh_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_token_response_is_camel_case() {
        let now = Utc::now();
        let pair = TokenPair {
            access_token: "access".to_owned(),
            refresh_token: "refresh".to_owned(),
            access_expires_at: now + Duration::hours(12),
            refresh_expires_at: now + Duration::days(7),
        };

        let json = serde_json::to_value(TokenResponse::from_pair(&pair, now)).unwrap();
        assert_eq!(json["accessToken"], "access");
        assert_eq!(json["tokenType"], "Bearer");
        assert_eq!(json["expiresIn"], 12 * 3600);
        assert_eq!(json["refreshToken"], "refresh");
        assert!(json.get("expiresAt").is_some());
    }

    #[test]
    fn test_token_type_serialization() {
        assert_eq!(serde_json::to_value(TokenType::Refresh).unwrap(), "refresh");
        assert_eq!(TokenType::Access.as_str(), "access");
    }
}
