// ABOUTME: Domain service layer for business logic extracted from route handlers
// ABOUTME: Validation and ownership rules for accounts, pantry items, and recipe suggestions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Pantry Contributors

//! Domain service layer
//!
//! Route handlers stay thin: they authenticate, decode the request, and hand
//! off to a service. Services depend on the repository traits rather than on
//! `Database` directly, so tests can run them against any storage.

/// Food item CRUD scoped to the owning user
pub mod food_item_service;

/// Recipe suggestions from the language model
pub mod recipe_service;

/// Signup, login, token refresh and verification
pub mod user_service;

pub use food_item_service::FoodItemService;
pub use recipe_service::{RecipeService, RecipeSuggestion};
pub use user_service::UserService;
