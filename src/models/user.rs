// ABOUTME: User account model and its public response view
// ABOUTME: Keeps the password hash out of anything serialized to clients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Pantry Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Registered account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Row id
    pub id: i64,
    /// Normalized (trimmed, lowercase) email address
    pub email: String,
    /// bcrypt hash of the password
    pub password_hash: String,
    /// When the account was created
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

/// User as returned to clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserResponse {
    /// Row id
    pub id: i64,
    /// Email address
    pub email: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}
