// ABOUTME: Recipe suggestions seeded with the user's pantry, soonest-expiring items first
// ABOUTME: Falls back to fixed messages when the language model fails or returns nothing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Pantry Contributors

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::constants::recipes::{
    EMPTY_RESPONSE_MESSAGE, EXPIRING_WITHIN_DAYS, GENERATION_FAILED_MESSAGE, NO_ITEMS_MESSAGE,
};
use crate::database::repositories::FoodItemRepository;
use crate::errors::{AppError, AppResult};
use crate::llm::{build_recipe_prompt, ChatMessage, ChatRequest, LlmProvider, RECIPE_SYSTEM_PROMPT};
use crate::logging::AppLogger;
use crate::models::FoodItem;

/// Result of a suggestion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeSuggestion {
    /// Recipe text, or a fallback message when `generated` is false
    pub suggestion: String,
    /// Items that were offered to the model
    pub used_items: Vec<FoodItem>,
    /// Whether `suggestion` came from the model
    pub generated: bool,
}

impl RecipeSuggestion {
    fn fallback(message: &str, used_items: Vec<FoodItem>) -> Self {
        Self {
            suggestion: message.to_owned(),
            used_items,
            generated: false,
        }
    }
}

/// Recipe generation
pub struct RecipeService {
    items: Arc<dyn FoodItemRepository>,
    provider: Option<Arc<dyn LlmProvider>>,
    model: Option<String>,
}

impl RecipeService {
    /// Create the service; without a provider every request gets the fallback message
    #[must_use]
    pub fn new(
        items: Arc<dyn FoodItemRepository>,
        provider: Option<Arc<dyn LlmProvider>>,
        model: Option<String>,
    ) -> Self {
        Self {
            items,
            provider,
            model,
        }
    }

    /// Suggest a recipe from the user's pantry
    ///
    /// Items expiring within a week are preferred; when none are, every item
    /// is offered. Model failures do not surface as errors.
    ///
    /// # Errors
    ///
    /// Returns 400 when the user has no items, or a database error
    pub async fn suggest(&self, user_id: i64) -> AppResult<RecipeSuggestion> {
        let used_items = self.select_items(user_id).await?;

        let Some(provider) = self.provider.as_ref() else {
            warn!("Recipe requested but no language model provider is configured");
            return Ok(RecipeSuggestion::fallback(
                GENERATION_FAILED_MESSAGE,
                used_items,
            ));
        };

        let mut request = ChatRequest::new(vec![
            ChatMessage::system(RECIPE_SYSTEM_PROMPT),
            ChatMessage::user(build_recipe_prompt(&used_items)),
        ]);
        if let Some(model) = &self.model {
            request = request.with_model(model.clone());
        }

        let started = Instant::now();
        let result = provider.complete(&request).await;
        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        AppLogger::log_recipe_generation(
            user_id,
            provider.name(),
            used_items.len(),
            result.is_ok(),
            duration_ms,
        );

        match result {
            Ok(response) if response.content.trim().is_empty() => Ok(
                RecipeSuggestion::fallback(EMPTY_RESPONSE_MESSAGE, used_items),
            ),
            Ok(response) => Ok(RecipeSuggestion {
                suggestion: response.content,
                used_items,
                generated: true,
            }),
            Err(e) => {
                error!(user_id, error = %e, "Recipe generation failed");
                Ok(RecipeSuggestion::fallback(
                    GENERATION_FAILED_MESSAGE,
                    used_items,
                ))
            }
        }
    }

    /// Items expiring within the window, or the whole pantry when none are
    async fn select_items(&self, user_id: i64) -> AppResult<Vec<FoodItem>> {
        let expiring = self
            .items
            .list_expiring(user_id, Utc::now(), EXPIRING_WITHIN_DAYS)
            .await?;
        if !expiring.is_empty() {
            return Ok(expiring);
        }

        let items = self.items.list(user_id).await?;
        if items.is_empty() {
            return Err(AppError::invalid_input(NO_ITEMS_MESSAGE));
        }
        Ok(items)
    }
}
