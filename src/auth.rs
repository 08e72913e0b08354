// ABOUTME: JWT-based user authentication with access and refresh tokens
// ABOUTME: Handles HS256 token generation, detailed validation, and token-type enforcement
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Pantry Contributors

//! # Authentication
//!
//! Users authenticate with an access token (short-lived) and exchange a
//! refresh token (long-lived) for a new pair. Both are HS256 JWTs signed with
//! the server secret; the `token_type` claim keeps one from being used in
//! place of the other.

use crate::errors::{AppError, ErrorCode};
use crate::models::{TokenPair, TokenType, User};
use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Convert a duration to a human-readable format
fn humanize_duration(duration: Duration) -> String {
    let total_secs = duration.num_seconds().abs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;

    if hours > 0 {
        format!("{hours} hours")
    } else if minutes > 0 {
        format!("{minutes} minutes")
    } else {
        format!("{total_secs} seconds")
    }
}

/// `JWT` validation error with detailed information
#[derive(Debug, Clone)]
pub enum JwtValidationError {
    /// Token has expired
    TokenExpired {
        /// When the token expired
        expired_at: DateTime<Utc>,
        /// Current time for reference
        current_time: DateTime<Utc>,
    },
    /// Token signature is invalid or the token is the wrong type
    TokenInvalid {
        /// Reason for invalidity
        reason: String,
    },
    /// Token is malformed (not proper `JWT` format)
    TokenMalformed {
        /// Details about malformation
        details: String,
    },
}

impl std::fmt::Display for JwtValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TokenExpired {
                expired_at,
                current_time,
            } => write!(
                f,
                "JWT token expired {} ago at {}",
                humanize_duration(current_time.signed_duration_since(*expired_at)),
                expired_at.format("%Y-%m-%d %H:%M:%S UTC")
            ),
            Self::TokenInvalid { reason } => {
                write!(f, "JWT token is invalid: {reason}")
            }
            Self::TokenMalformed { details } => {
                write!(f, "JWT token is malformed: {details}")
            }
        }
    }
}

impl std::error::Error for JwtValidationError {}

impl From<JwtValidationError> for AppError {
    fn from(error: JwtValidationError) -> Self {
        match &error {
            JwtValidationError::TokenExpired { .. } => {
                Self::new(ErrorCode::AuthExpired, error.to_string())
            }
            JwtValidationError::TokenInvalid { .. } | JwtValidationError::TokenMalformed { .. } => {
                Self::new(ErrorCode::AuthInvalid, error.to_string())
            }
        }
    }
}

/// JWT claims carried by both token types
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// User id as a string (standard `sub` claim)
    pub sub: String,
    /// User id
    pub user_id: i64,
    /// User email
    pub email: String,
    /// `access` or `refresh`
    pub token_type: TokenType,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expiry (unix seconds)
    pub exp: i64,
    /// Unique token id
    pub jti: String,
}

/// Issues and validates HS256 tokens
#[derive(Clone)]
pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_expiry_hours: i64,
    refresh_token_expiry_days: i64,
}

impl std::fmt::Debug for AuthManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthManager")
            .field("secret", &"[REDACTED]")
            .field("access_token_expiry_hours", &self.access_token_expiry_hours)
            .field("refresh_token_expiry_days", &self.refresh_token_expiry_days)
            .finish()
    }
}

impl AuthManager {
    /// Create a manager signing with `secret`
    #[must_use]
    pub fn new(secret: &[u8], access_token_expiry_hours: i64, refresh_token_expiry_days: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            access_token_expiry_hours,
            refresh_token_expiry_days,
        }
    }

    /// Access token lifetime
    #[must_use]
    pub const fn access_token_expiry_hours(&self) -> i64 {
        self.access_token_expiry_hours
    }

    fn issue(&self, user: &User, token_type: TokenType, lifetime: Duration) -> Result<(String, DateTime<Utc>)> {
        let now = Utc::now();
        let expires_at = now + lifetime;

        let claims = Claims {
            sub: user.id.to_string(),
            user_id: user.id,
            email: user.email.clone(),
            token_type,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        Ok((token, expires_at))
    }

    /// Generate an access token for `user`
    ///
    /// # Errors
    ///
    /// Returns an error if signing fails
    pub fn generate_access_token(&self, user: &User) -> Result<String> {
        self.issue(
            user,
            TokenType::Access,
            Duration::hours(self.access_token_expiry_hours),
        )
        .map(|(token, _)| token)
    }

    /// Generate a refresh token for `user`
    ///
    /// # Errors
    ///
    /// Returns an error if signing fails
    pub fn generate_refresh_token(&self, user: &User) -> Result<String> {
        self.issue(
            user,
            TokenType::Refresh,
            Duration::days(self.refresh_token_expiry_days),
        )
        .map(|(token, _)| token)
    }

    /// Generate an access token and a refresh token together
    ///
    /// # Errors
    ///
    /// Returns an error if signing fails
    pub fn generate_token_pair(&self, user: &User) -> Result<TokenPair> {
        let (access_token, access_expires_at) = self.issue(
            user,
            TokenType::Access,
            Duration::hours(self.access_token_expiry_hours),
        )?;
        let (refresh_token, refresh_expires_at) = self.issue(
            user,
            TokenType::Refresh,
            Duration::days(self.refresh_token_expiry_days),
        )?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            access_expires_at,
            refresh_expires_at,
        })
    }

    /// Validate signature and expiry, returning the claims
    ///
    /// # Errors
    ///
    /// Returns a [`JwtValidationError`] if the token is malformed, its
    /// signature does not verify, or it has expired
    pub fn validate_token_detailed(&self, token: &str) -> Result<Claims, JwtValidationError> {
        let claims = self.decode_token_claims(token)?;
        Self::check_token_expiry(&claims, Utc::now())?;

        tracing::debug!("JWT token validation successful for user: {}", claims.sub);
        Ok(claims)
    }

    /// Validate a token that must be an access token
    ///
    /// # Errors
    ///
    /// Same as [`Self::validate_token_detailed`], plus `TokenInvalid` for
    /// refresh tokens
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, JwtValidationError> {
        Self::require_type(self.validate_token_detailed(token)?, TokenType::Access)
    }

    /// Validate a token that must be a refresh token
    ///
    /// # Errors
    ///
    /// Same as [`Self::validate_token_detailed`], plus `TokenInvalid` for
    /// access tokens
    pub fn validate_refresh_token(&self, token: &str) -> Result<Claims, JwtValidationError> {
        Self::require_type(self.validate_token_detailed(token)?, TokenType::Refresh)
    }

    fn require_type(claims: Claims, expected: TokenType) -> Result<Claims, JwtValidationError> {
        if claims.token_type == expected {
            Ok(claims)
        } else {
            tracing::warn!(
                "Rejected {} token where {} token was required for user: {}",
                claims.token_type.as_str(),
                expected.as_str(),
                claims.sub
            );
            Err(JwtValidationError::TokenInvalid {
                reason: format!("expected {} token", expected.as_str()),
            })
        }
    }

    /// Decode claims without expiration validation so expiry can be reported in detail
    fn decode_token_claims(&self, token: &str) -> Result<Claims, JwtValidationError> {
        let mut validation_no_exp = Validation::new(Algorithm::HS256);
        validation_no_exp.validate_exp = false;

        decode::<Claims>(token, &self.decoding_key, &validation_no_exp)
            .map(|token_data| token_data.claims)
            .map_err(|e| Self::convert_jwt_error(&e))
    }

    fn check_token_expiry(
        claims: &Claims,
        current_time: DateTime<Utc>,
    ) -> Result<(), JwtValidationError> {
        if current_time.timestamp() > claims.exp {
            let expired_at = DateTime::from_timestamp(claims.exp, 0).unwrap_or(current_time);
            tracing::warn!(
                "JWT token expired for user: {} - Expired {} ago at {}",
                claims.sub,
                humanize_duration(current_time.signed_duration_since(expired_at)),
                expired_at.to_rfc3339()
            );
            return Err(JwtValidationError::TokenExpired {
                expired_at,
                current_time,
            });
        }
        Ok(())
    }

    /// Convert JWT library errors to detailed validation errors
    fn convert_jwt_error(e: &jsonwebtoken::errors::Error) -> JwtValidationError {
        use jsonwebtoken::errors::ErrorKind;
        tracing::warn!("JWT token validation failed: {:?}", e);

        match e.kind() {
            ErrorKind::InvalidSignature => JwtValidationError::TokenInvalid {
                reason: "Token signature verification failed".into(),
            },
            ErrorKind::InvalidToken => JwtValidationError::TokenMalformed {
                details: "Token format is invalid".into(),
            },
            ErrorKind::Base64(base64_err) => JwtValidationError::TokenMalformed {
                details: format!("Token contains invalid base64: {base64_err}"),
            },
            ErrorKind::Json(json_err) => JwtValidationError::TokenMalformed {
                details: format!("Token contains invalid JSON: {json_err}"),
            },
            ErrorKind::Utf8(utf8_err) => JwtValidationError::TokenMalformed {
                details: format!("Token contains invalid UTF-8: {utf8_err}"),
            },
            _ => JwtValidationError::TokenInvalid {
                reason: format!("Token validation failed: {e}"),
            },
        }
    }
}

/// Generate a random 64-byte secret for development use
#[must_use]
pub fn generate_jwt_secret() -> [u8; 64] {
    let mut secret = [0u8; 64];
    rand::thread_rng().fill_bytes(&mut secret);
    secret
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"unit-test-secret-that-is-long-enough-for-hs256";

    fn test_user() -> User {
        let now = Utc::now();
        User {
            id: 42,
            email: "cook@example.com".to_owned(),
            password_hash: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_access_token_round_trip() {
        let manager = AuthManager::new(SECRET, 12, 7);
        let token = manager.generate_access_token(&test_user()).unwrap();
        let claims = manager.validate_access_token(&token).unwrap();

        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.email, "cook@example.com");
        assert_eq!(claims.token_type, TokenType::Access);
        assert_eq!(claims.exp - claims.iat, 12 * 3600);
    }

    #[test]
    fn test_token_types_are_not_interchangeable() {
        let manager = AuthManager::new(SECRET, 12, 7);
        let pair = manager.generate_token_pair(&test_user()).unwrap();

        assert!(matches!(
            manager.validate_access_token(&pair.refresh_token),
            Err(JwtValidationError::TokenInvalid { .. })
        ));
        assert!(matches!(
            manager.validate_refresh_token(&pair.access_token),
            Err(JwtValidationError::TokenInvalid { .. })
        ));
        assert!(manager.validate_refresh_token(&pair.refresh_token).is_ok());
        assert!(pair.refresh_expires_at > pair.access_expires_at);
    }

    #[test]
    fn test_tokens_are_unique() {
        let manager = AuthManager::new(SECRET, 12, 7);
        let user = test_user();
        let first = manager.generate_access_token(&user).unwrap();
        let second = manager.generate_access_token(&user).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_expired_token_reports_expiry() {
        let manager = AuthManager::new(SECRET, 12, 7);
        let now = Utc::now();
        let claims = Claims {
            sub: "42".to_owned(),
            user_id: 42,
            email: "cook@example.com".to_owned(),
            token_type: TokenType::Access,
            iat: (now - Duration::hours(3)).timestamp(),
            exp: (now - Duration::hours(2)).timestamp(),
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        let error = manager.validate_access_token(&token).unwrap_err();
        assert!(matches!(error, JwtValidationError::TokenExpired { .. }));
        assert!(error.to_string().contains("2 hours"));
        assert_eq!(AppError::from(error).code, ErrorCode::AuthExpired);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let issuer = AuthManager::new(SECRET, 12, 7);
        let verifier = AuthManager::new(b"a-completely-different-secret-value-here", 12, 7);
        let token = issuer.generate_access_token(&test_user()).unwrap();

        let error = verifier.validate_access_token(&token).unwrap_err();
        assert!(matches!(error, JwtValidationError::TokenInvalid { .. }));
        assert_eq!(AppError::from(error).code, ErrorCode::AuthInvalid);
    }

    #[test]
    fn test_garbage_is_malformed() {
        let manager = AuthManager::new(SECRET, 12, 7);
        assert!(matches!(
            manager.validate_token_detailed("not-a-jwt"),
            Err(JwtValidationError::TokenMalformed { .. })
        ));
    }

    #[test]
    fn test_generate_jwt_secret_is_random() {
        assert_ne!(generate_jwt_secret(), generate_jwt_secret());
    }
}
