// ABOUTME: Integration tests for recipe suggestions with a scripted language model
// ABOUTME: Checks item selection, prompt contents and the fallback replies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Pantry Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use common::{create_test_database, create_test_food_item, create_test_user};
use smart_pantry::constants::recipes::{
    EMPTY_RESPONSE_MESSAGE, GENERATION_FAILED_MESSAGE, NO_ITEMS_MESSAGE,
};
use smart_pantry::database::repositories::{FoodItemRepository, FoodItemRepositoryImpl};
use smart_pantry::database::Database;
use smart_pantry::errors::{AppError, ErrorCode};
use smart_pantry::llm::{
    ChatRequest, ChatResponse, LlmCapabilities, LlmProvider, MessageRole, RECIPE_SYSTEM_PROMPT,
};
use smart_pantry::services::RecipeService;

/// Provider that replays a fixed outcome and records the requests it saw
struct ScriptedProvider {
    reply: Result<String, ErrorCode>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedProvider {
    fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text.to_owned()),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn failing(code: ErrorCode) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(code),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn last_request(&self) -> ChatRequest {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn display_name(&self) -> &'static str {
        "Scripted"
    }

    fn capabilities(&self) -> LlmCapabilities {
        LlmCapabilities::text_only()
    }

    fn default_model(&self) -> &str {
        "scripted-model"
    }

    fn available_models(&self) -> &'static [&'static str] {
        &["scripted-model"]
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.reply {
            Ok(text) => Ok(ChatResponse {
                content: text.clone(),
                model: "scripted-model".to_owned(),
                usage: None,
                finish_reason: Some("STOP".to_owned()),
            }),
            Err(code) => Err(AppError::new(*code, "scripted failure")),
        }
    }

    async fn health_check(&self) -> Result<bool, AppError> {
        Ok(true)
    }
}

fn service(db: &Database, provider: Option<Arc<ScriptedProvider>>) -> RecipeService {
    let items: Arc<dyn FoodItemRepository> = Arc::new(FoodItemRepositoryImpl::new(db.clone()));
    let provider = provider.map(|p| p as Arc<dyn LlmProvider>);
    RecipeService::new(items, provider, Some("gemini-test".to_owned()))
}

#[tokio::test]
async fn test_no_items_is_bad_request() {
    let db = create_test_database().await.unwrap();
    let user = create_test_user(&db).await.unwrap();

    let error = service(&db, Some(ScriptedProvider::replying("soup")))
        .suggest(user.id)
        .await
        .unwrap_err();
    assert_eq!(error.http_status(), 400);
    assert_eq!(error.message, NO_ITEMS_MESSAGE);
}

#[tokio::test]
async fn test_expiring_items_are_sent_to_model() {
    let db = create_test_database().await.unwrap();
    let user = create_test_user(&db).await.unwrap();
    create_test_food_item(&db, &user, "Rice", 60).await.unwrap();
    create_test_food_item(&db, &user, "Spinach", 2).await.unwrap();
    create_test_food_item(&db, &user, "Milk", 1).await.unwrap();

    let provider = ScriptedProvider::replying("Spinach omelette");
    let suggestion = service(&db, Some(provider.clone()))
        .suggest(user.id)
        .await
        .unwrap();

    assert!(suggestion.generated);
    assert_eq!(suggestion.suggestion, "Spinach omelette");
    let used: Vec<&str> = suggestion
        .used_items
        .iter()
        .map(|i| i.title.as_str())
        .collect();
    assert_eq!(used, vec!["Milk", "Spinach"]);

    let request = provider.last_request();
    assert_eq!(request.model.as_deref(), Some("gemini-test"));
    assert_eq!(request.messages[0].role, MessageRole::System);
    assert_eq!(request.messages[0].content, RECIPE_SYSTEM_PROMPT);
    let prompt = &request.messages[1].content;
    assert!(prompt.contains("- Milk (1): expires"));
    assert!(prompt.contains("- Spinach (1): expires"));
    assert!(!prompt.contains("Rice"));
}

#[tokio::test]
async fn test_all_items_used_when_none_expiring() {
    let db = create_test_database().await.unwrap();
    let user = create_test_user(&db).await.unwrap();
    create_test_food_item(&db, &user, "Rice", 60).await.unwrap();
    create_test_food_item(&db, &user, "Pasta", 200).await.unwrap();

    let provider = ScriptedProvider::replying("Pasta al riso");
    let suggestion = service(&db, Some(provider.clone()))
        .suggest(user.id)
        .await
        .unwrap();

    assert_eq!(suggestion.used_items.len(), 2);
    let prompt = &provider.last_request().messages[1].content;
    assert!(prompt.find("Rice").unwrap() < prompt.find("Pasta").unwrap());
}

#[tokio::test]
async fn test_provider_error_falls_back() {
    let db = create_test_database().await.unwrap();
    let user = create_test_user(&db).await.unwrap();
    create_test_food_item(&db, &user, "Eggs", 3).await.unwrap();

    let suggestion = service(
        &db,
        Some(ScriptedProvider::failing(ErrorCode::ExternalServiceUnavailable)),
    )
    .suggest(user.id)
    .await
    .unwrap();

    assert!(!suggestion.generated);
    assert_eq!(suggestion.suggestion, GENERATION_FAILED_MESSAGE);
    assert_eq!(suggestion.used_items.len(), 1);
}

#[tokio::test]
async fn test_blank_reply_falls_back() {
    let db = create_test_database().await.unwrap();
    let user = create_test_user(&db).await.unwrap();
    create_test_food_item(&db, &user, "Eggs", 3).await.unwrap();

    let suggestion = service(&db, Some(ScriptedProvider::replying("  \n ")))
        .suggest(user.id)
        .await
        .unwrap();

    assert!(!suggestion.generated);
    assert_eq!(suggestion.suggestion, EMPTY_RESPONSE_MESSAGE);
}

#[tokio::test]
async fn test_no_provider_falls_back() {
    let db = create_test_database().await.unwrap();
    let user = create_test_user(&db).await.unwrap();
    create_test_food_item(&db, &user, "Eggs", 3).await.unwrap();

    let suggestion = service(&db, None).suggest(user.id).await.unwrap();
    assert!(!suggestion.generated);
    assert_eq!(suggestion.suggestion, GENERATION_FAILED_MESSAGE);
}

#[tokio::test]
async fn test_other_users_items_ignored() {
    let db = create_test_database().await.unwrap();
    let alice = create_test_user(&db).await.unwrap();
    let bob = create_test_user(&db).await.unwrap();
    create_test_food_item(&db, &alice, "Truffle", 1).await.unwrap();

    let error = service(&db, Some(ScriptedProvider::replying("x")))
        .suggest(bob.id)
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);
}
