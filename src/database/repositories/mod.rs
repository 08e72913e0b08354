// ABOUTME: Repository traits that put a seam between services and storage
// ABOUTME: Each trait has a Database-backed implementation mapping failures to DatabaseError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Pantry Contributors

mod food_item_repository;
mod user_repository;

pub use food_item_repository::FoodItemRepositoryImpl;
pub use user_repository::UserRepositoryImpl;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::database::DatabaseError;
use crate::models::{FoodItem, FoodItemRequest, User};

/// Account storage
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user; a duplicate email yields a unique `ConstraintViolation`
    async fn create(&self, email: &str, password_hash: &str) -> Result<User, DatabaseError>;

    /// Look up by normalized email
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError>;

    /// Look up by id
    async fn get_by_id(&self, user_id: i64) -> Result<Option<User>, DatabaseError>;
}

/// Pantry storage; every method is scoped to one owner
#[async_trait]
pub trait FoodItemRepository: Send + Sync {
    /// Insert an item for `user_id`
    async fn create(
        &self,
        user_id: i64,
        request: &FoodItemRequest,
    ) -> Result<FoodItem, DatabaseError>;

    /// All items of `user_id`, soonest expiry first
    async fn list(&self, user_id: i64) -> Result<Vec<FoodItem>, DatabaseError>;

    /// One item, if owned by `user_id`
    async fn get(&self, user_id: i64, item_id: i64) -> Result<Option<FoodItem>, DatabaseError>;

    /// Replace fields of an owned item
    async fn update(
        &self,
        user_id: i64,
        item_id: i64,
        request: &FoodItemRequest,
    ) -> Result<Option<FoodItem>, DatabaseError>;

    /// Remove an owned item; `false` when nothing matched
    async fn delete(&self, user_id: i64, item_id: i64) -> Result<bool, DatabaseError>;

    /// Items expiring within `0..=days` whole days of `now`
    async fn list_expiring(
        &self,
        user_id: i64,
        now: DateTime<Utc>,
        days: i64,
    ) -> Result<Vec<FoodItem>, DatabaseError>;
}

/// Recover the `sqlx` error behind an `anyhow` chain so constraint
/// violations keep their kind; everything else becomes a query error
pub(crate) fn into_database_error(error: anyhow::Error) -> DatabaseError {
    match error.downcast::<sqlx::Error>() {
        Ok(sqlx_error) => DatabaseError::from(sqlx_error),
        Err(other) => DatabaseError::QueryError {
            context: other.to_string(),
        },
    }
}
