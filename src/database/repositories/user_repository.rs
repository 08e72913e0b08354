// ABOUTME: User repository implementation backed by the SQLite database
// ABOUTME: Delegates to Database and classifies failures as DatabaseError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Pantry Contributors

use super::{into_database_error, UserRepository};
use crate::database::{Database, DatabaseError};
use crate::models::User;
use async_trait::async_trait;

/// `SQLite` implementation of `UserRepository`
pub struct UserRepositoryImpl {
    db: Database,
}

impl UserRepositoryImpl {
    /// Create a new `UserRepository` with the given database connection
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn create(&self, email: &str, password_hash: &str) -> Result<User, DatabaseError> {
        self.db
            .create_user(email, password_hash)
            .await
            .map_err(into_database_error)
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        self.db
            .get_user_by_email(email)
            .await
            .map_err(into_database_error)
    }

    async fn get_by_id(&self, user_id: i64) -> Result<Option<User>, DatabaseError> {
        self.db
            .get_user_by_id(user_id)
            .await
            .map_err(into_database_error)
    }
}
