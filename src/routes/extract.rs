// ABOUTME: JSON body extractor whose rejections render as AppError responses
// ABOUTME: Malformed bodies become 400 INVALID_INPUT; size and content-type rejections keep 413 and 415
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Pantry Contributors

use axum::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::{AppError, ErrorCode};

/// Drop-in replacement for `axum::Json` in request and response position
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(rejection_to_error(&rejection)),
        }
    }
}

/// Syntax and data errors are the client's JSON; size and content-type
/// rejections keep their own status
fn rejection_to_error(rejection: &JsonRejection) -> AppError {
    let message = format!("invalid request body: {}", rejection.body_text());
    match rejection {
        JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
            AppError::invalid_input(message)
        }
        _ => match rejection.status() {
            StatusCode::PAYLOAD_TOO_LARGE => AppError::new(ErrorCode::PayloadTooLarge, message),
            StatusCode::UNSUPPORTED_MEDIA_TYPE => {
                AppError::new(ErrorCode::UnsupportedMediaType, message)
            }
            _ => AppError::invalid_input(message),
        },
    }
}

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}
