// ABOUTME: Food item database operations scoped to the owning user
// ABOUTME: CRUD plus expiry-window queries used for recipe suggestions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Pantry Contributors

use super::Database;
use crate::models::{FoodItem, FoodItemRequest};
use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::Row;

const FOOD_ITEM_COLUMNS: &str =
    "id, title, quantity, expiry_date, user_id, created_at, updated_at";

impl Database {
    /// Create the food_items table
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_food_items(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS food_items (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                quantity INTEGER NOT NULL CHECK (quantity >= 0),
                expiry_date TEXT NOT NULL,
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_food_items_user_id ON food_items(user_id)")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_food_items_expiry_date ON food_items(expiry_date)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert a food item owned by `user_id`
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not exist (foreign key), the
    /// quantity is negative (check constraint), or the insert fails
    pub async fn create_food_item(
        &self,
        user_id: i64,
        request: &FoodItemRequest,
    ) -> Result<FoodItem> {
        let now = Utc::now();

        let id = sqlx::query(
            r"
            INSERT INTO food_items (title, quantity, expiry_date, user_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(&request.title)
        .bind(request.quantity)
        .bind(request.expiry_date)
        .bind(user_id)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        Ok(FoodItem {
            id,
            title: request.title.clone(),
            quantity: request.quantity,
            expiry_date: request.expiry_date,
            user_id,
            created_at: now,
            updated_at: now,
        })
    }

    /// List a user's food items, soonest expiry first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_food_items_for_user(&self, user_id: i64) -> Result<Vec<FoodItem>> {
        let query = format!(
            "SELECT {FOOD_ITEM_COLUMNS} FROM food_items WHERE user_id = $1 ORDER BY expiry_date ASC, id ASC"
        );

        let rows = sqlx::query(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(Self::row_to_food_item).collect()
    }

    /// Get one food item if it belongs to `user_id`
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_food_item(&self, user_id: i64, item_id: i64) -> Result<Option<FoodItem>> {
        let query =
            format!("SELECT {FOOD_ITEM_COLUMNS} FROM food_items WHERE id = $1 AND user_id = $2");

        let row = sqlx::query(&query)
            .bind(item_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::row_to_food_item).transpose()
    }

    /// Overwrite title, quantity, and expiry of an owned item
    ///
    /// Returns `None` when no item with that id belongs to the user.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn update_food_item(
        &self,
        user_id: i64,
        item_id: i64,
        request: &FoodItemRequest,
    ) -> Result<Option<FoodItem>> {
        let result = sqlx::query(
            r"
            UPDATE food_items
            SET title = $1, quantity = $2, expiry_date = $3, updated_at = $4
            WHERE id = $5 AND user_id = $6
            ",
        )
        .bind(&request.title)
        .bind(request.quantity)
        .bind(request.expiry_date)
        .bind(Utc::now())
        .bind(item_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_food_item(user_id, item_id).await
    }

    /// Delete an owned item; `false` when nothing matched
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete_food_item(&self, user_id: i64, item_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM food_items WHERE id = $1 AND user_id = $2")
            .bind(item_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Items whose whole-day distance to expiry is within `0..=days`
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_expiring_food_items(
        &self,
        user_id: i64,
        now: DateTime<Utc>,
        days: i64,
    ) -> Result<Vec<FoodItem>> {
        // Day counts truncate toward zero; filter on decoded timestamps
        let items = self.get_food_items_for_user(user_id).await?;
        Ok(items
            .into_iter()
            .filter(|item| item.is_expiring_within(now, days))
            .collect())
    }

    fn row_to_food_item(row: &sqlx::sqlite::SqliteRow) -> Result<FoodItem> {
        Ok(FoodItem {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            quantity: row.try_get("quantity")?,
            expiry_date: row.try_get("expiry_date")?,
            user_id: row.try_get("user_id")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}
