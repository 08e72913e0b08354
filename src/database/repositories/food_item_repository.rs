// ABOUTME: Food item repository implementation backed by the SQLite database
// ABOUTME: Delegates owner-scoped CRUD to Database and maps failures to DatabaseError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Pantry Contributors

use super::{into_database_error, FoodItemRepository};
use crate::database::{Database, DatabaseError};
use crate::models::{FoodItem, FoodItemRequest};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// `SQLite` implementation of `FoodItemRepository`
pub struct FoodItemRepositoryImpl {
    db: Database,
}

impl FoodItemRepositoryImpl {
    /// Create a new `FoodItemRepository` with the given database connection
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FoodItemRepository for FoodItemRepositoryImpl {
    async fn create(
        &self,
        user_id: i64,
        request: &FoodItemRequest,
    ) -> Result<FoodItem, DatabaseError> {
        self.db
            .create_food_item(user_id, request)
            .await
            .map_err(into_database_error)
    }

    async fn list(&self, user_id: i64) -> Result<Vec<FoodItem>, DatabaseError> {
        self.db
            .get_food_items_for_user(user_id)
            .await
            .map_err(into_database_error)
    }

    async fn get(&self, user_id: i64, item_id: i64) -> Result<Option<FoodItem>, DatabaseError> {
        self.db
            .get_food_item(user_id, item_id)
            .await
            .map_err(into_database_error)
    }

    async fn update(
        &self,
        user_id: i64,
        item_id: i64,
        request: &FoodItemRequest,
    ) -> Result<Option<FoodItem>, DatabaseError> {
        self.db
            .update_food_item(user_id, item_id, request)
            .await
            .map_err(into_database_error)
    }

    async fn delete(&self, user_id: i64, item_id: i64) -> Result<bool, DatabaseError> {
        self.db
            .delete_food_item(user_id, item_id)
            .await
            .map_err(into_database_error)
    }

    async fn list_expiring(
        &self,
        user_id: i64,
        now: DateTime<Utc>,
        days: i64,
    ) -> Result<Vec<FoodItem>, DatabaseError> {
        self.db
            .get_expiring_food_items(user_id, now, days)
            .await
            .map_err(into_database_error)
    }
}
