// ABOUTME: CSRF (Cross-Site Request Forgery) protection token generation and validation
// ABOUTME: Double-submit tokens: the header value must match the cookie and be a live issued token
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Pantry Contributors

//! CSRF protection module
//!
//! Tokens are random, hex encoded, and kept in memory until they expire.
//! A state-changing request passes when the `X-CSRF-Token` header and the
//! `_csrf` cookie carry the same token and that token was issued by this
//! process and has not expired.
//!
//! The store is capped at [`MAX_TOKENS`]; issuing past the cap evicts the
//! oldest tokens first.

use crate::constants::csrf::{MAX_TOKENS, TOKEN_EXPIRY_SECS, TOKEN_LENGTH};
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tokio::sync::RwLock;

/// CSRF token metadata (token itself is the `HashMap` key)
#[derive(Clone)]
struct CsrfToken {
    expires_at: DateTime<Utc>,
    issued: u64,
}

/// CSRF token manager with in-memory storage
pub struct CsrfTokenManager {
    tokens: Arc<RwLock<HashMap<String, CsrfToken>>>,
    ttl: Duration,
    max_tokens: usize,
    next_issued: AtomicU64,
}

impl CsrfTokenManager {
    /// Create a manager issuing tokens valid for 30 minutes
    #[must_use]
    pub fn new() -> Self {
        Self::with_ttl(Duration::seconds(TOKEN_EXPIRY_SECS))
    }

    /// Create a manager with a custom token lifetime
    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self::with_limits(ttl, MAX_TOKENS)
    }

    /// Create a manager with a custom lifetime and store capacity
    #[must_use]
    pub fn with_limits(ttl: Duration, max_tokens: usize) -> Self {
        Self {
            tokens: Arc::new(RwLock::new(HashMap::new())),
            ttl,
            max_tokens: max_tokens.max(1),
            next_issued: AtomicU64::new(0),
        }
    }

    /// Token lifetime in seconds, used for the cookie `Max-Age`
    #[must_use]
    pub fn ttl_secs(&self) -> i64 {
        self.ttl.num_seconds()
    }

    /// Issue a new token
    pub async fn generate_token(&self) -> String {
        let random_bytes: Vec<u8> = (0..TOKEN_LENGTH)
            .map(|_| rand::thread_rng().gen())
            .collect();

        let token = hex::encode(random_bytes);
        let expires_at = Utc::now() + self.ttl;
        let issued = self.next_issued.fetch_add(1, Ordering::Relaxed);

        let mut tokens = self.tokens.write().await;
        Self::cleanup_expired_tokens_locked(&mut tokens);
        let evicted = Self::evict_oldest_locked(&mut tokens, self.max_tokens.saturating_sub(1));
        tokens.insert(token.clone(), CsrfToken { expires_at, issued });
        drop(tokens);

        if evicted > 0 {
            tracing::debug!(evicted, "CSRF token store full, evicted oldest tokens");
        }

        token
    }

    /// Check that `token` was issued here and has not expired
    ///
    /// # Errors
    ///
    /// Returns `CsrfInvalid` if the token is unknown or expired
    pub async fn validate_token(&self, token: &str) -> AppResult<()> {
        let csrf_token = {
            let tokens = self.tokens.read().await;
            tokens
                .get(token)
                .ok_or_else(|| AppError::csrf_invalid("Invalid CSRF token"))?
                .clone()
        };

        if Utc::now() > csrf_token.expires_at {
            return Err(AppError::csrf_invalid("CSRF token expired"));
        }

        Ok(())
    }

    /// Double-submit check for a state-changing request
    ///
    /// # Errors
    ///
    /// Returns `CsrfInvalid` if either value is missing, they differ, or the
    /// token is unknown or expired
    pub async fn validate_double_submit(
        &self,
        header_token: Option<&str>,
        cookie_token: Option<&str>,
    ) -> AppResult<()> {
        let header_token =
            header_token.ok_or_else(|| AppError::csrf_invalid("CSRF token header missing"))?;
        let cookie_token =
            cookie_token.ok_or_else(|| AppError::csrf_invalid("CSRF cookie missing"))?;

        if !bool::from(header_token.as_bytes().ct_eq(cookie_token.as_bytes())) {
            return Err(AppError::csrf_invalid("CSRF token mismatch"));
        }

        self.validate_token(header_token).await
    }

    /// Invalidate a CSRF token
    pub async fn invalidate_token(&self, token: &str) {
        let mut tokens = self.tokens.write().await;
        tokens.remove(token);
    }

    fn cleanup_expired_tokens_locked(tokens: &mut HashMap<String, CsrfToken>) {
        let now = Utc::now();
        tokens.retain(|_, csrf_token| csrf_token.expires_at > now);
    }

    /// Drop the earliest issued tokens until at most `keep` remain
    fn evict_oldest_locked(tokens: &mut HashMap<String, CsrfToken>, keep: usize) -> usize {
        let mut evicted = 0;
        while tokens.len() > keep {
            let Some(oldest) = tokens
                .iter()
                .min_by_key(|(_, csrf_token)| csrf_token.issued)
                .map(|(key, _)| key.clone())
            else {
                break;
            };
            tokens.remove(&oldest);
            evicted += 1;
        }
        evicted
    }

    /// Remove expired tokens, returning how many were dropped
    pub async fn cleanup_expired_tokens(&self) -> usize {
        let mut tokens = self.tokens.write().await;
        let before = tokens.len();
        Self::cleanup_expired_tokens_locked(&mut tokens);
        before - tokens.len()
    }

    /// Number of live tokens held
    pub async fn token_count(&self) -> usize {
        self.tokens.read().await.len()
    }
}

impl Default for CsrfTokenManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    #[tokio::test]
    async fn test_generated_token_validates() {
        let manager = CsrfTokenManager::new();
        let token = manager.generate_token().await;

        assert_eq!(token.len(), TOKEN_LENGTH * 2);
        assert!(manager.validate_token(&token).await.is_ok());
    }

    #[tokio::test]
    async fn test_unknown_token_rejected() {
        let manager = CsrfTokenManager::new();
        let error = manager.validate_token("deadbeef").await.unwrap_err();
        assert_eq!(error.code, ErrorCode::CsrfInvalid);
    }

    #[tokio::test]
    async fn test_double_submit_requires_matching_values() {
        let manager = CsrfTokenManager::new();
        let token = manager.generate_token().await;
        let other = manager.generate_token().await;

        assert!(manager
            .validate_double_submit(Some(&token), Some(&token))
            .await
            .is_ok());
        assert!(manager
            .validate_double_submit(Some(&token), Some(&other))
            .await
            .is_err());
        assert!(manager.validate_double_submit(None, Some(&token)).await.is_err());
        assert!(manager.validate_double_submit(Some(&token), None).await.is_err());
    }

    #[tokio::test]
    async fn test_double_submit_rejects_forged_pair() {
        let manager = CsrfTokenManager::new();
        assert!(manager
            .validate_double_submit(Some("forged"), Some("forged"))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_expired_tokens_are_rejected_and_cleaned() {
        let manager = CsrfTokenManager::with_ttl(Duration::seconds(-1));
        let token = manager.generate_token().await;

        assert!(manager.validate_token(&token).await.is_err());
        manager.cleanup_expired_tokens().await;
        assert_eq!(manager.token_count().await, 0);
    }

    #[tokio::test]
    async fn test_store_is_capped_and_evicts_oldest() {
        let manager = CsrfTokenManager::with_limits(Duration::minutes(5), 3);
        let mut issued = Vec::new();
        for _ in 0..5 {
            issued.push(manager.generate_token().await);
        }

        assert_eq!(manager.token_count().await, 3);
        for evicted in &issued[..2] {
            assert!(manager.validate_token(evicted).await.is_err());
        }
        for live in &issued[2..] {
            assert!(manager.validate_token(live).await.is_ok());
        }
    }

    #[test]
    fn test_default_cap_applies() {
        let manager = CsrfTokenManager::new();
        assert_eq!(manager.max_tokens, MAX_TOKENS);
    }

    #[tokio::test]
    async fn test_invalidate_token() {
        let manager = CsrfTokenManager::new();
        let token = manager.generate_token().await;
        manager.invalidate_token(&token).await;
        assert!(manager.validate_token(&token).await.is_err());
    }
}
