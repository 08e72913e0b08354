// ABOUTME: Structured error types for database operations
// ABOUTME: Maps sqlx failures into domain errors that convert cleanly into AppError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Pantry Contributors

use super::{AppError, ErrorCode};
use thiserror::Error;

/// Errors raised by the persistence layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Row lookup found nothing
    #[error("{entity_type} not found: {entity_id}")]
    NotFound {
        /// Kind of entity that was looked up
        entity_type: &'static str,
        /// Identifier used in the lookup
        entity_id: String,
    },

    /// Query failed to execute
    #[error("Database query failed: {context}")]
    QueryError {
        /// Description of the failing operation
        context: String,
    },

    /// Pool could not hand out a connection
    #[error("Database connection failed: {0}")]
    ConnectionError(String),

    /// Schema migration failed
    #[error("Database migration failed: {0}")]
    MigrationError(String),

    /// Write would violate a table constraint
    #[error("Constraint violation on {constraint}: {details}")]
    ConstraintViolation {
        /// Constraint name or kind (e.g. `unique`)
        constraint: String,
        /// Driver message
        details: String,
    },
}

impl From<sqlx::Error> for DatabaseError {
    fn from(error: sqlx::Error) -> Self {
        match &error {
            sqlx::Error::RowNotFound => Self::NotFound {
                entity_type: "row",
                entity_id: String::new(),
            },
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                Self::ConnectionError(error.to_string())
            }
            sqlx::Error::Database(db_error) if db_error.is_unique_violation() => {
                Self::ConstraintViolation {
                    constraint: "unique".to_owned(),
                    details: db_error.message().to_owned(),
                }
            }
            sqlx::Error::Database(db_error) if db_error.is_foreign_key_violation() => {
                Self::ConstraintViolation {
                    constraint: "foreign_key".to_owned(),
                    details: db_error.message().to_owned(),
                }
            }
            sqlx::Error::Database(db_error) if db_error.is_check_violation() => {
                Self::ConstraintViolation {
                    constraint: "check".to_owned(),
                    details: db_error.message().to_owned(),
                }
            }
            _ => Self::QueryError {
                context: error.to_string(),
            },
        }
    }
}

impl From<DatabaseError> for AppError {
    fn from(error: DatabaseError) -> Self {
        match &error {
            DatabaseError::NotFound { entity_type, .. } => {
                Self::new(ErrorCode::ResourceNotFound, format!("{entity_type} not found"))
            }
            DatabaseError::ConstraintViolation { constraint, .. } if constraint == "unique" => {
                Self::new(ErrorCode::ResourceAlreadyExists, error.to_string())
            }
            DatabaseError::ConstraintViolation { .. } => {
                Self::new(ErrorCode::InvalidInput, error.to_string())
            }
            DatabaseError::ConnectionError(_) => {
                Self::new(ErrorCode::ResourceUnavailable, error.to_string())
            }
            DatabaseError::QueryError { .. } | DatabaseError::MigrationError(_) => {
                Self::new(ErrorCode::DatabaseError, error.to_string())
            }
        }
        .with_source(error)
    }
}
