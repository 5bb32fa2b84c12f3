//! Error types for the task API client.
//!
//! # Design
//! The server's failure taxonomy gets dedicated variants (`NotFound`,
//! `Validation`, `StoreUnavailable`) because the session layer maps each to a
//! different user-facing message. Any other non-2xx response lands in
//! `HttpError` with the raw status code and body for debugging; failures that
//! never produced a response are `Transport`.

use std::collections::HashMap;
use std::fmt;

/// Errors returned by `TaskClient` parse methods and `Transport`
/// implementations.
#[derive(Debug)]
pub enum ApiError {
    /// The server returned 404 — the referenced task does not exist.
    NotFound,

    /// The server returned 422 with field-keyed validation messages.
    Validation { errors: HashMap<String, Vec<String>> },

    /// The server returned 500 — its persistence store is unreachable.
    StoreUnavailable,

    /// The server returned a non-2xx status outside the taxonomy above.
    HttpError { status: u16, body: String },

    /// The request produced no HTTP response at all (connection-level).
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    SerializationError(String),
}

impl ApiError {
    /// Whether this is a validation failure carrying messages for `field`.
    pub fn has_error_on(&self, field: &str) -> bool {
        matches!(self, ApiError::Validation { errors } if errors.contains_key(field))
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound => write!(f, "resource not found"),
            ApiError::Validation { errors } => {
                write!(f, "validation failed on {} field(s)", errors.len())
            }
            ApiError::StoreUnavailable => write!(f, "server store unavailable"),
            ApiError::HttpError { status, body } => {
                write!(f, "HTTP {status}: {body}")
            }
            ApiError::Transport(msg) => write!(f, "transport failed: {msg}"),
            ApiError::DeserializationError(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
            ApiError::SerializationError(msg) => {
                write!(f, "serialization failed: {msg}")
            }
        }
    }
}

impl std::error::Error for ApiError {}
