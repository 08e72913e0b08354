// ABOUTME: Shared server resources built once at startup and handed to every route
// ABOUTME: Owns the database, token managers, configuration, LLM provider and services
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Pantry Contributors

//! # Server Resources
//!
//! Everything a request handler needs, created once and shared through
//! `Arc<ServerResources>` so route groups never construct their own copies.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::auth::AuthManager;
use crate::config::environment::{LlmConfig, ServerConfig};
use crate::database::repositories::{
    FoodItemRepository, FoodItemRepositoryImpl, UserRepository, UserRepositoryImpl,
};
use crate::database::Database;
use crate::llm::{GeminiProvider, LlmProvider};
use crate::security::csrf::CsrfTokenManager;
use crate::services::{FoodItemService, RecipeService, UserService};

/// Centralized resource container for dependency injection
pub struct ServerResources {
    /// Connection pool
    pub database: Database,
    /// JWT issuing and validation
    pub auth_manager: Arc<AuthManager>,
    /// Double-submit CSRF tokens
    pub csrf_manager: Arc<CsrfTokenManager>,
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
    /// Recipe model; `None` when no API key is configured
    pub llm_provider: Option<Arc<dyn LlmProvider>>,
    /// Account operations
    pub user_service: Arc<UserService>,
    /// Pantry CRUD
    pub food_item_service: Arc<FoodItemService>,
    /// Recipe suggestions
    pub recipe_service: Arc<RecipeService>,
}

impl ServerResources {
    /// Wire services over `database` using the given configuration
    #[must_use]
    pub fn new(
        database: Database,
        config: Arc<ServerConfig>,
        llm_provider: Option<Arc<dyn LlmProvider>>,
    ) -> Self {
        let auth_manager = Arc::new(AuthManager::new(
            config.auth.jwt_secret.as_bytes(),
            config.auth.access_token_expiry_hours,
            config.auth.refresh_token_expiry_days,
        ));

        let users: Arc<dyn UserRepository> = Arc::new(UserRepositoryImpl::new(database.clone()));
        let items: Arc<dyn FoodItemRepository> =
            Arc::new(FoodItemRepositoryImpl::new(database.clone()));

        let user_service = Arc::new(UserService::new(
            users,
            auth_manager.clone(),
            config.auth.bcrypt_cost,
        ));
        let food_item_service = Arc::new(FoodItemService::new(items.clone()));
        let recipe_service = Arc::new(RecipeService::new(
            items,
            llm_provider.clone(),
            Some(config.llm.model.clone()),
        ));

        Self {
            database,
            auth_manager,
            csrf_manager: Arc::new(CsrfTokenManager::new()),
            config,
            llm_provider,
            user_service,
            food_item_service,
            recipe_service,
        }
    }
}

/// Build the Gemini provider when an API key is configured
#[must_use]
pub fn llm_provider_from_config(config: &LlmConfig) -> Option<Arc<dyn LlmProvider>> {
    let Some(api_key) = config.api_key.as_deref().filter(|key| !key.trim().is_empty()) else {
        warn!("GEMINI_API_KEY not set; recipe suggestions will return the fallback message");
        return None;
    };

    let provider = GeminiProvider::new(api_key)
        .with_base_url(config.base_url.clone())
        .with_default_model(config.model.clone())
        .with_timeout(Duration::from_secs(config.timeout_secs));

    info!("Recipe suggestions use Gemini model {}", config.model);
    Some(Arc::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_provider_without_key() {
        let mut config = ServerConfig::for_testing().llm;
        config.api_key = Some("  ".to_owned());
        assert!(llm_provider_from_config(&config).is_none());
    }

    #[test]
    fn test_provider_with_key() {
        let mut config = ServerConfig::for_testing().llm;
        config.api_key = Some("key".to_owned());
        let provider = llm_provider_from_config(&config).unwrap();
        assert_eq!(provider.name(), "gemini");
        assert_eq!(provider.default_model(), config.model);
    }
}
