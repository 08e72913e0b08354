// ABOUTME: Application constants re-exported from pantry-core
// ABOUTME: Token lifetimes, cookie names, validation limits, and recipe messages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Pantry Contributors

pub use pantry_core::constants::*;
