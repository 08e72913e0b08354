// ABOUTME: Authentication route handlers for signup, login, logout, refresh and token verification
// ABOUTME: Issues CSRF tokens and manages the HttpOnly access-token cookie for browser clients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Pantry Contributors

//! Authentication routes
//!
//! Browser clients fetch a CSRF token from `GET /csrf` before any
//! state-changing call, then log in and carry the access token in the
//! `token` cookie. API clients use the `accessToken` from the login body as
//! a Bearer header instead.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::constants::http::CSRF_HEADER_NAME;
use crate::errors::{AppError, AppResult};
use crate::middleware::auth::extract_token;
use crate::models::{ApiResponse, RefreshTokenRequest, TokenResponse};
use crate::resources::ServerResources;
use crate::routes::Json;
use crate::security::cookies::{clear_auth_cookie, set_auth_cookie, set_csrf_cookie};

/// Body of `POST /signup` and `POST /login`
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialsRequest {
    /// Account email
    #[serde(default)]
    pub email: String,
    /// Plain-text password
    #[serde(default)]
    pub password: String,
}

/// Body of `GET /csrf`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsrfTokenResponse {
    /// Token to echo in the `X-CSRF-Token` header
    pub csrf_token: String,
}

/// Body of `GET /verify-token`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyTokenResponse {
    /// Authenticated user id
    pub user_id: i64,
    /// Authenticated email
    pub email: String,
    /// Always true; invalid tokens get a 401 instead
    pub valid: bool,
}

/// Authentication routes implementation
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all authentication routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/csrf", get(Self::handle_csrf_token))
            .route("/signup", post(Self::handle_signup))
            .route("/login", post(Self::handle_login))
            .route("/logout", post(Self::handle_logout))
            .route("/refresh-token", post(Self::handle_refresh))
            .route("/verify-token", get(Self::handle_verify))
            .with_state(resources)
    }

    /// Handle GET /csrf - Issue a double-submit CSRF token
    async fn handle_csrf_token(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let csrf_token = resources.csrf_manager.generate_token().await;

        let mut headers = HeaderMap::new();
        set_csrf_cookie(
            &mut headers,
            &csrf_token,
            resources.csrf_manager.ttl_secs(),
            &resources.config.security,
        )?;
        headers.insert(
            CSRF_HEADER_NAME,
            HeaderValue::from_str(&csrf_token)
                .map_err(|e| AppError::internal(format!("Invalid CSRF header value: {e}")))?,
        );

        let body = ApiResponse::data(CsrfTokenResponse { csrf_token });
        Ok((StatusCode::OK, headers, Json(body)).into_response())
    }

    /// Handle POST /signup - Register a new account
    async fn handle_signup(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<CredentialsRequest>,
    ) -> Result<Response, AppError> {
        let user = resources
            .user_service
            .signup(&request.email, &request.password)
            .await?;

        let body = ApiResponse::with_message(user, "user created successfully");
        Ok((StatusCode::CREATED, Json(body)).into_response())
    }

    /// Handle POST /login - Check credentials, set the auth cookie, return tokens
    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<CredentialsRequest>,
    ) -> Result<Response, AppError> {
        let (user, pair) = resources
            .user_service
            .login(&request.email, &request.password)
            .await?;

        let mut headers = HeaderMap::new();
        set_auth_cookie(
            &mut headers,
            &pair.access_token,
            resources.config.auth.cookie_max_age_hours,
            &resources.config.security,
        )?;

        tracing::info!(user_id = user.id, "User logged in");
        let body = ApiResponse::with_message(
            TokenResponse::from_pair(&pair, Utc::now()),
            "login successful",
        );
        Ok((StatusCode::OK, headers, Json(body)).into_response())
    }

    /// Handle POST /logout - Expire the auth cookie
    async fn handle_logout(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let mut headers = HeaderMap::new();
        clear_auth_cookie(&mut headers, &resources.config.security)?;

        Ok((StatusCode::OK, headers, Json(ApiResponse::message("logged out"))).into_response())
    }

    /// Handle POST /refresh-token - Exchange a refresh token for a new pair
    async fn handle_refresh(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<RefreshTokenRequest>,
    ) -> AppResult<Json<ApiResponse<TokenResponse>>> {
        let tokens = resources
            .user_service
            .refresh(&request.refresh_token)
            .await?;
        Ok(Json(ApiResponse::data(tokens)))
    }

    /// Handle GET /verify-token - Report who the presented access token belongs to
    async fn handle_verify(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> AppResult<Json<ApiResponse<VerifyTokenResponse>>> {
        let (token, _) = extract_token(&headers).ok_or_else(AppError::auth_required)?;
        let user = resources.user_service.verify(&token)?;

        Ok(Json(ApiResponse::data(VerifyTokenResponse {
            user_id: user.user_id,
            email: user.email,
            valid: true,
        })))
    }
}
