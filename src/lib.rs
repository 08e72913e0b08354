// ABOUTME: Main library entry point for the Smart Pantry API
// ABOUTME: Food inventory tracking with JWT auth, CSRF protection, and LLM recipe suggestions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Pantry Contributors

#![deny(unsafe_code)]

//! # Smart Pantry
//!
//! A food inventory backend. Users register, sign in, record the food they have
//! at home together with its expiry date, and ask for recipe suggestions that
//! use up what is about to expire. Suggestions come from a hosted language
//! model (Google Gemini).
//!
//! ## Architecture
//!
//! Requests flow through the usual layers:
//! - **Routes**: thin axum handlers that authenticate and decode requests
//! - **Services**: validation and business rules (the "usecase" layer)
//! - **Database**: `SQLite` storage through `sqlx`, behind repository traits
//! - **LLM**: provider trait with a Gemini implementation
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use smart_pantry::config::environment::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Smart Pantry configured on port {}", config.http_port);
//!     Ok(())
//! }
//! ```

/// JWT token generation and validation
pub mod auth;

/// Configuration loaded from the environment
pub mod config;

/// Application constants re-exported from `pantry-core`
pub mod constants;

/// `SQLite` persistence and repository traits
pub mod database;

/// Unified error handling re-exported from `pantry-core`
pub mod errors;

/// Language model provider abstraction and Gemini client
pub mod llm;

/// Structured logging setup
pub mod logging;

/// HTTP middleware: authentication, CSRF, CORS, tracing
pub mod middleware;

/// Domain models and wire DTOs
pub mod models;

/// Shared server resources handed to every route
pub mod resources;

/// HTTP route handlers grouped by domain
pub mod routes;

/// Cookies, CSRF tokens, and security headers
pub mod security;

/// Router assembly and server lifecycle
pub mod server;

/// Business logic between routes and storage
pub mod services;
