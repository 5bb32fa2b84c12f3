//! Error taxonomy for the task API.
//!
//! # Design
//! Validation and not-found are detected in handlers and carry their own wire
//! shapes. Database failures collapse into a single `StoreUnavailable`
//! response with an operation-specific message; the underlying error is
//! logged here and never leaks to clients.

use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Request input failed validation — 422 with field-keyed messages.
    #[error("validation failed")]
    Validation(BTreeMap<&'static str, Vec<String>>),

    /// The referenced task does not exist — 404.
    #[error("task not found")]
    NotFound,

    /// The persistence store could not be reached — 500.
    #[error("store unavailable")]
    StoreUnavailable { message: &'static str },
}

impl ApiError {
    pub fn validation(field: &'static str, message: &str) -> Self {
        let mut errors = BTreeMap::new();
        errors.insert(field, vec![message.to_string()]);
        ApiError::Validation(errors)
    }

    /// Translate a store error, attaching the per-operation 500 message.
    pub fn from_store(err: StoreError, message: &'static str) -> Self {
        match err {
            StoreError::NotFound => ApiError::NotFound,
            StoreError::Db(err) => {
                tracing::error!(error = %err, "task store failure");
                ApiError::StoreUnavailable { message }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "errors": errors })),
            )
                .into_response(),
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "error": "Task not found",
                    "message": "The requested task does not exist",
                })),
            )
                .into_response(),
            ApiError::StoreUnavailable { message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Database connection error",
                    "message": message,
                })),
            )
                .into_response(),
        }
    }
}
