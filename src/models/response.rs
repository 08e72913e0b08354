// ABOUTME: Success envelope shared by all JSON endpoints
// ABOUTME: Wraps payloads as { data, message } with absent fields omitted
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Pantry Contributors

use serde::{Deserialize, Serialize};

/// `{ "data": ..., "message": ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Payload only
    pub const fn data(data: T) -> Self {
        Self {
            data: Some(data),
            message: None,
        }
    }

    /// Payload with a message
    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            data: Some(data),
            message: Some(message.into()),
        }
    }
}

impl ApiResponse<()> {
    /// Message without payload
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            data: None,
            message: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_only_omits_data() {
        let json = serde_json::to_value(ApiResponse::message("deleted")).unwrap();
        assert_eq!(json, serde_json::json!({ "message": "deleted" }));
    }
}
