// ABOUTME: Account operations: signup with bcrypt hashing, login, token refresh, verification
// ABOUTME: Normalizes and validates credentials before touching storage
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Pantry Contributors

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::auth::AuthManager;
use crate::constants::error_messages::{
    EMAIL_EXISTS, EMAIL_REQUIRED, INVALID_CREDENTIALS, INVALID_EMAIL_FORMAT, PASSWORD_REQUIRED,
    PASSWORD_TOO_LONG, PASSWORD_TOO_SHORT,
};
use crate::constants::limits::{MAX_EMAIL_LENGTH, MAX_PASSWORD_BYTES, MIN_PASSWORD_LENGTH};
use crate::database::repositories::UserRepository;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::logging::AppLogger;
use crate::middleware::auth::{authenticate_token, AuthenticatedUser};
use crate::models::{TokenPair, TokenResponse, User, UserResponse};

/// Account management
pub struct UserService {
    users: Arc<dyn UserRepository>,
    auth_manager: Arc<AuthManager>,
    bcrypt_cost: u32,
}

impl UserService {
    /// Create the service over a user repository
    #[must_use]
    pub fn new(
        users: Arc<dyn UserRepository>,
        auth_manager: Arc<AuthManager>,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            users,
            auth_manager,
            bcrypt_cost,
        }
    }

    /// Register a new account
    ///
    /// # Errors
    ///
    /// - 400 when the email or password fails validation
    /// - 409 when the email is already registered
    pub async fn signup(&self, email: &str, password: &str) -> AppResult<UserResponse> {
        let email = normalize_email(email);
        validate_email(&email)?;
        validate_password(password)?;

        if self.users.get_by_email(&email).await?.is_some() {
            AppLogger::log_auth_event(&email, "signup", false, Some("duplicate email"));
            return Err(AppError::already_exists(EMAIL_EXISTS));
        }

        let password_hash = self.hash_password(password).await?;

        // A concurrent signup can still win the race; the unique index turns that into 409 too
        let user = self
            .users
            .create(&email, &password_hash)
            .await
            .map_err(|e| match AppError::from(e) {
                err if err.code == ErrorCode::ResourceAlreadyExists => {
                    AppError::already_exists(EMAIL_EXISTS)
                }
                err => err,
            })?;

        AppLogger::log_auth_event(&user.id.to_string(), "signup", true, None);
        info!("Registered user {}", user.id);
        Ok(UserResponse::from(user))
    }

    /// Check credentials and issue a token pair
    ///
    /// # Errors
    ///
    /// - 400 when a field is missing
    /// - 401 with the same message for an unknown email and a wrong password
    pub async fn login(&self, email: &str, password: &str) -> AppResult<(User, TokenPair)> {
        let email = normalize_email(email);
        if email.is_empty() {
            return Err(AppError::new(ErrorCode::MissingRequiredField, EMAIL_REQUIRED));
        }
        if password.is_empty() {
            return Err(AppError::new(
                ErrorCode::MissingRequiredField,
                PASSWORD_REQUIRED,
            ));
        }

        let Some(user) = self.users.get_by_email(&email).await? else {
            AppLogger::log_auth_event(&email, "login", false, Some("unknown email"));
            return Err(AppError::auth_invalid(INVALID_CREDENTIALS));
        };

        if !self.verify_password(password, &user.password_hash).await? {
            AppLogger::log_auth_event(&user.id.to_string(), "login", false, Some("bad password"));
            return Err(AppError::auth_invalid(INVALID_CREDENTIALS));
        }

        let pair = self.auth_manager.generate_token_pair(&user)?;
        AppLogger::log_auth_event(&user.id.to_string(), "login", true, None);
        Ok((user, pair))
    }

    /// Exchange a refresh token for a new token pair
    ///
    /// # Errors
    ///
    /// Returns 400 for an empty token and 401 when the token is invalid,
    /// expired, not a refresh token, or its user no longer exists
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<TokenResponse> {
        let refresh_token = refresh_token.trim();
        if refresh_token.is_empty() {
            return Err(AppError::new(
                ErrorCode::MissingRequiredField,
                "refresh token is required",
            ));
        }

        let claims = self.auth_manager.validate_refresh_token(refresh_token)?;
        let Some(user) = self.users.get_by_id(claims.user_id).await? else {
            warn!("Refresh token presented for missing user {}", claims.user_id);
            return Err(AppError::auth_invalid("user no longer exists"));
        };

        let pair = self.auth_manager.generate_token_pair(&user)?;
        AppLogger::log_auth_event(&user.id.to_string(), "refresh", true, None);
        Ok(TokenResponse::from_pair(&pair, Utc::now()))
    }

    /// Validate an access token
    ///
    /// # Errors
    ///
    /// Returns 401 when the token is invalid or expired
    pub fn verify(&self, token: &str) -> AppResult<AuthenticatedUser> {
        authenticate_token(&self.auth_manager, token)
    }

    async fn hash_password(&self, password: &str) -> AppResult<String> {
        let password = password.to_owned();
        let cost = self.bcrypt_cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))
    }

    async fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool> {
        let password = password.to_owned();
        let hash = hash.to_owned();
        let verified = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))?;

        // A corrupt stored hash is treated as a failed login rather than a server error
        Ok(verified.unwrap_or_else(|e| {
            debug!("Stored password hash could not be verified: {e}");
            false
        }))
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn validate_email(email: &str) -> AppResult<()> {
    if email.is_empty() {
        return Err(AppError::new(ErrorCode::MissingRequiredField, EMAIL_REQUIRED));
    }
    if email.len() > MAX_EMAIL_LENGTH || !is_well_formed_email(email) {
        return Err(AppError::new(ErrorCode::InvalidFormat, INVALID_EMAIL_FORMAT));
    }
    Ok(())
}

/// `local@domain.tld` with no whitespace and a dot inside the domain
fn is_well_formed_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        && !domain.ends_with('.')
}

fn validate_password(password: &str) -> AppResult<()> {
    if password.is_empty() {
        return Err(AppError::new(
            ErrorCode::MissingRequiredField,
            PASSWORD_REQUIRED,
        ));
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AppError::invalid_input(PASSWORD_TOO_SHORT));
    }
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(AppError::invalid_input(PASSWORD_TOO_LONG));
    }
    Ok(())
}
