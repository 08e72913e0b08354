// ABOUTME: SQLite database management for users and food items
// ABOUTME: Owns the connection pool, schema migrations, and health checks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Pantry Contributors

//! # Database Management
//!
//! `Database` wraps a `sqlx` `SQLite` pool. Table-specific operations live in
//! `users` and `food_items` as additional `impl Database` blocks; the
//! `repositories` module puts trait seams in front of them for the service
//! layer.

mod food_items;
mod users;

/// Repository traits and their `Database`-backed implementations
pub mod repositories;

pub use crate::errors::DatabaseError;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

use crate::config::environment::DatabaseUrl;

/// Database manager for user and food item storage
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Open a connection pool and run migrations
    ///
    /// File databases are created on first use (`mode=rwc`), including any
    /// missing parent directories. In-memory databases use a single connection
    /// that is never recycled, so every query sees the same data.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not a `SQLite` URL, the parent directory
    /// cannot be created, the connection fails, or a migration fails
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let url = DatabaseUrl::parse_url(database_url)?;

        let pool = match &url {
            DatabaseUrl::Memory => {
                let options = SqliteConnectOptions::from_str("sqlite::memory:")?
                    .foreign_keys(true);
                SqlitePoolOptions::new()
                    .max_connections(1)
                    .min_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None)
                    .connect_with(options)
                    .await
                    .context("Failed to open in-memory SQLite database")?
            }
            DatabaseUrl::SQLite { path } => {
                ensure_parent_dir(path)?;
                let options = SqliteConnectOptions::new()
                    .filename(path)
                    .create_if_missing(true)
                    .foreign_keys(true);
                SqlitePoolOptions::new()
                    .max_connections(max_connections.max(1))
                    .connect_with(options)
                    .await
                    .with_context(|| format!("Failed to open SQLite database at {}", path.display()))?
            }
        };

        let db = Self { pool };
        db.migrate().await?;

        info!(database = %url, "Database ready");
        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if any `CREATE TABLE` / `CREATE INDEX` statement fails
    pub async fn migrate(&self) -> Result<()> {
        self.migrate_users().await?;
        self.migrate_food_items().await?;
        debug!("Database migrations applied");
        Ok(())
    }

    /// Verify the database answers queries
    ///
    /// # Errors
    ///
    /// Returns an error if `SELECT 1` fails
    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create database directory {}", parent.display())
            })?;
        }
    }
    Ok(())
}
