// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides in-memory databases, test resources, and user fixtures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Pantry Contributors
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `smart_pantry`

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use smart_pantry::{
    config::environment::ServerConfig,
    database::Database,
    llm::LlmProvider,
    models::{FoodItem, FoodItemRequest, User},
    resources::ServerResources,
};
use std::sync::{Arc, Once};
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Password used by every fixture user
pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // Check for TEST_LOG environment variable to control test logging level
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    Database::new("sqlite::memory:", 1).await
}

/// Resources over a fresh in-memory database with no language model
pub async fn create_test_resources() -> Result<Arc<ServerResources>> {
    create_test_resources_with(ServerConfig::for_testing(), None).await
}

/// Resources with a custom configuration and optional provider
pub async fn create_test_resources_with(
    config: ServerConfig,
    llm_provider: Option<Arc<dyn LlmProvider>>,
) -> Result<Arc<ServerResources>> {
    let database = create_test_database().await?;
    Ok(Arc::new(ServerResources::new(
        database,
        Arc::new(config),
        llm_provider,
    )))
}

/// Unique email so tests sharing a database never collide
pub fn unique_email() -> String {
    format!("user-{}@example.com", Uuid::new_v4().simple())
}

/// Insert a user directly with a cheap bcrypt hash of [`TEST_PASSWORD`]
pub async fn create_test_user(database: &Database) -> Result<User> {
    let hash = bcrypt::hash(TEST_PASSWORD, 4)?;
    database.create_user(&unique_email(), &hash).await
}

/// Food item request expiring `days` from now (plus an hour so whole-day
/// arithmetic lands on `days`)
pub fn food_request(title: &str, quantity: i64, days: i64) -> FoodItemRequest {
    FoodItemRequest {
        title: title.to_owned(),
        quantity,
        expiry_date: in_days(days),
    }
}

/// `now + days + 1h`
pub fn in_days(days: i64) -> DateTime<Utc> {
    Utc::now() + Duration::days(days) + Duration::hours(1)
}

/// Insert a food item for `user`
pub async fn create_test_food_item(
    database: &Database,
    user: &User,
    title: &str,
    days: i64,
) -> Result<FoodItem> {
    database
        .create_food_item(user.id, &food_request(title, 1, days))
        .await
}
