// ABOUTME: Core types and constants for the Smart Pantry API
// ABOUTME: Foundation crate with error handling and application-wide constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Pantry Contributors

#![deny(unsafe_code)]

//! # Pantry Core
//!
//! Foundation crate providing shared types for the Smart Pantry API. It changes
//! rarely, so the server crate can rebuild without recompiling it.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `DatabaseError`
//! - **constants**: Application-wide constants organized by domain

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;
