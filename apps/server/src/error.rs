// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types and handling for the server.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Sheet '{sheet}' is not available: {message}")]
    SheetUnavailable { sheet: &'static str, message: String },

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Workbook error: {0}")]
    Workbook(#[from] rcm_lite_workbook::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::SheetUnavailable { .. } => {
                (StatusCode::SERVICE_UNAVAILABLE, "SHEET_UNAVAILABLE")
            }
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Workbook(_) => (StatusCode::BAD_GATEWAY, "WORKBOOK_ERROR"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<rcm_lite_core::Error> for ApiError {
    fn from(err: rcm_lite_core::Error) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::Internal(err.to_string())
    }
}
