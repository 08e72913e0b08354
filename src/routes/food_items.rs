// ABOUTME: Food item route handlers for the authenticated user's pantry
// ABOUTME: Thin CRUD handlers that parse ids, authenticate, and delegate to FoodItemService
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Pantry Contributors

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;

use crate::errors::{AppError, AppResult};
use crate::middleware::auth::authenticate_request;
use crate::models::{ApiResponse, FoodItem, FoodItemRequest};
use crate::resources::ServerResources;
use crate::routes::{parse_id, Json};

/// Food item routes implementation
pub struct FoodItemRoutes;

impl FoodItemRoutes {
    /// Create all food item routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/food-items",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route(
                "/api/food-items/:id",
                get(Self::handle_get)
                    .put(Self::handle_update)
                    .delete(Self::handle_delete),
            )
            .with_state(resources)
    }

    /// Handle GET /api/food-items - List the caller's items
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> AppResult<Json<ApiResponse<Vec<FoodItem>>>> {
        let auth = authenticate_request(&headers, &resources)?;
        let items = resources.food_item_service.list(auth.user_id).await?;
        Ok(Json(ApiResponse::data(items)))
    }

    /// Handle POST /api/food-items - Add an item
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<FoodItemRequest>,
    ) -> Result<Response, AppError> {
        let auth = authenticate_request(&headers, &resources)?;
        let item = resources
            .food_item_service
            .create(auth.user_id, request)
            .await?;
        Ok((StatusCode::CREATED, Json(ApiResponse::data(item))).into_response())
    }

    /// Handle GET /api/food-items/:id - Fetch one item
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> AppResult<Json<ApiResponse<FoodItem>>> {
        let auth = authenticate_request(&headers, &resources)?;
        let item_id = parse_id(&id)?;
        let item = resources
            .food_item_service
            .get(auth.user_id, item_id)
            .await?;
        Ok(Json(ApiResponse::data(item)))
    }

    /// Handle PUT /api/food-items/:id - Replace an item's fields
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
        Json(request): Json<FoodItemRequest>,
    ) -> AppResult<Json<ApiResponse<FoodItem>>> {
        let auth = authenticate_request(&headers, &resources)?;
        let item_id = parse_id(&id)?;
        let item = resources
            .food_item_service
            .update(auth.user_id, item_id, request)
            .await?;
        Ok(Json(ApiResponse::data(item)))
    }

    /// Handle DELETE /api/food-items/:id - Remove an item
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> AppResult<Json<ApiResponse<()>>> {
        let auth = authenticate_request(&headers, &resources)?;
        let item_id = parse_id(&id)?;
        resources
            .food_item_service
            .delete(auth.user_id, item_id)
            .await?;
        Ok(Json(ApiResponse::message("food item deleted")))
    }
}
