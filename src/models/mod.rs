// ABOUTME: Core data models for users, food items, and authentication tokens
// ABOUTME: Re-exports domain entities and the JSON DTOs exchanged over HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Pantry Contributors

//! # Data Models
//!
//! - `User` / `UserResponse`: account records and their public view
//! - `FoodItem` / `FoodItemRequest`: pantry entries with an expiry date
//! - `TokenPair` / `TokenResponse`: JWT issuance results
//! - `ApiResponse`: the `{ data, message }` success envelope

mod food_item;
mod response;
mod token;
mod user;

pub use food_item::{parse_expiry_date, FoodItem, FoodItemRequest};
pub use response::ApiResponse;
pub use token::{RefreshTokenRequest, TokenPair, TokenResponse, TokenType};
pub use user::{User, UserResponse};
