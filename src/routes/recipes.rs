// ABOUTME: Recipe suggestion route handler
// ABOUTME: Authenticates the caller and returns a suggestion built from their pantry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Pantry Contributors

use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::get;
use axum::Router;

use crate::errors::AppResult;
use crate::middleware::auth::authenticate_request;
use crate::models::ApiResponse;
use crate::resources::ServerResources;
use crate::routes::Json;
use crate::services::RecipeSuggestion;

/// Recipe routes implementation
pub struct RecipeRoutes;

impl RecipeRoutes {
    /// Create all recipe routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/recipes/suggestions", get(Self::handle_suggestions))
            .with_state(resources)
    }

    /// Handle GET /api/recipes/suggestions
    async fn handle_suggestions(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> AppResult<Json<ApiResponse<RecipeSuggestion>>> {
        let auth = authenticate_request(&headers, &resources)?;
        let suggestion = resources.recipe_service.suggest(auth.user_id).await?;
        Ok(Json(ApiResponse::data(suggestion)))
    }
}
