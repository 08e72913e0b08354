// ABOUTME: Route module organization for the Smart Pantry HTTP endpoints
// ABOUTME: Groups thin axum handlers by domain and shares the JSON extractor and id parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Pantry Contributors

//! Route module for Smart Pantry
//!
//! Each domain module contains only route definitions and thin handler
//! functions that authenticate, decode, and delegate to the service layer.

/// Signup, login, logout, token refresh and verification, CSRF issuance
pub mod auth;
/// JSON extractor with `AppError` rejections
pub mod extract;
/// Pantry item CRUD
pub mod food_items;
/// Health check and readiness endpoints
pub mod health;
/// Recipe suggestions
pub mod recipes;

pub use auth::AuthRoutes;
pub use extract::Json;
pub use food_items::FoodItemRoutes;
pub use health::HealthRoutes;
pub use recipes::RecipeRoutes;

use crate::constants::error_messages::INVALID_ID_FORMAT;
use crate::errors::{AppError, AppResult, ErrorCode};

/// Parse a numeric path id
///
/// # Errors
///
/// Returns 400 "invalid ID format" when `raw` is not an integer
pub fn parse_id(raw: &str) -> AppResult<i64> {
    raw.parse::<i64>()
        .map_err(|_| AppError::new(ErrorCode::InvalidFormat, INVALID_ID_FORMAT))
}
