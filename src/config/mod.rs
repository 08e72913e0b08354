// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Exposes environment-driven server configuration and its typed building blocks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Pantry Contributors

//! Configuration module for the Smart Pantry server
//!
//! All runtime settings come from environment variables (optionally seeded
//! from a `.env` file) and are gathered into [`ServerConfig`].

/// Environment and server configuration
pub mod environment;

pub use environment::{DatabaseUrl, Environment, LogLevel, ServerConfig};
