// ABOUTME: Pantry item operations scoped to the authenticated owner
// ABOUTME: Validates titles and quantities; other users' items read as not found
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Pantry Contributors

use std::sync::Arc;

use tracing::debug;

use crate::constants::error_messages::{QUANTITY_NEGATIVE, TITLE_REQUIRED, TITLE_TOO_LONG};
use crate::constants::limits::MAX_TITLE_LENGTH;
use crate::database::repositories::FoodItemRepository;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::models::{FoodItem, FoodItemRequest};

const FOOD_ITEM: &str = "Food item";

/// Food item CRUD
pub struct FoodItemService {
    items: Arc<dyn FoodItemRepository>,
}

impl FoodItemService {
    /// Create the service over a food item repository
    #[must_use]
    pub fn new(items: Arc<dyn FoodItemRepository>) -> Self {
        Self { items }
    }

    /// All items of `user_id`, soonest expiry first
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails
    pub async fn list(&self, user_id: i64) -> AppResult<Vec<FoodItem>> {
        Ok(self.items.list(user_id).await?)
    }

    /// One owned item
    ///
    /// # Errors
    ///
    /// Returns 404 if the item does not exist or belongs to someone else
    pub async fn get(&self, user_id: i64, item_id: i64) -> AppResult<FoodItem> {
        self.items
            .get(user_id, item_id)
            .await?
            .ok_or_else(|| AppError::not_found(FOOD_ITEM))
    }

    /// Add an item to the pantry
    ///
    /// # Errors
    ///
    /// Returns 400 when the request fails validation
    pub async fn create(&self, user_id: i64, request: FoodItemRequest) -> AppResult<FoodItem> {
        let request = validate_request(request)?;
        let item = self.items.create(user_id, &request).await?;
        debug!(user_id, item_id = item.id, "Created food item");
        Ok(item)
    }

    /// Replace title, quantity and expiry of an owned item
    ///
    /// # Errors
    ///
    /// Returns 400 when the request fails validation and 404 when the item
    /// is not owned by `user_id`
    pub async fn update(
        &self,
        user_id: i64,
        item_id: i64,
        request: FoodItemRequest,
    ) -> AppResult<FoodItem> {
        let request = validate_request(request)?;
        self.items
            .update(user_id, item_id, &request)
            .await?
            .ok_or_else(|| AppError::not_found(FOOD_ITEM))
    }

    /// Remove an owned item
    ///
    /// # Errors
    ///
    /// Returns 404 when the item is not owned by `user_id`
    pub async fn delete(&self, user_id: i64, item_id: i64) -> AppResult<()> {
        if self.items.delete(user_id, item_id).await? {
            debug!(user_id, item_id, "Deleted food item");
            Ok(())
        } else {
            Err(AppError::not_found(FOOD_ITEM))
        }
    }
}

/// Trim the title and check field limits
fn validate_request(mut request: FoodItemRequest) -> AppResult<FoodItemRequest> {
    request.title = request.title.trim().to_owned();

    if request.title.is_empty() {
        return Err(AppError::new(ErrorCode::MissingRequiredField, TITLE_REQUIRED));
    }
    if request.title.chars().count() > MAX_TITLE_LENGTH {
        return Err(AppError::invalid_input(TITLE_TOO_LONG));
    }
    if request.quantity < 0 {
        return Err(AppError::new(ErrorCode::ValueOutOfRange, QUANTITY_NEGATIVE));
    }
    Ok(request)
}
