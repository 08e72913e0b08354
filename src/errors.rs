// ABOUTME: Unified error handling re-exported from pantry-core
// ABOUTME: Single import point for AppError, ErrorCode, ErrorResponse, and DatabaseError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Pantry Contributors

pub use pantry_core::errors::*;
