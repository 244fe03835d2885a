//! Error types for the contact agenda.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use crate::domain::{ContactId, ValidationError};
use crate::validation::FieldErrors;
use thiserror::Error;

/// Errors that can occur when talking to the contacts REST backend.
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP request failed before a status was received
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Backend answered with a non-success status code
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The backend returned a record with an unusable identifier
    #[error("Invalid contact identifier: {0}")]
    InvalidId(#[from] ValidationError),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Errors returned when a contact form is submitted.
#[derive(Error, Debug)]
pub enum SubmitError {
    /// The draft failed local validation; nothing was sent.
    #[error("Draft has {} invalid field(s)", .0.len())]
    Invalid(FieldErrors),

    /// The backend rejected the create or update call.
    #[error(transparent)]
    Request(#[from] ApiError),

    /// Another mutation is still in flight.
    #[error("Another change is still being saved")]
    Busy,
}

/// Errors returned by the non-form controller operations.
#[derive(Error, Debug)]
pub enum AgendaError {
    #[error(transparent)]
    Request(#[from] ApiError),

    #[error("Another change is still being saved")]
    Busy,

    #[error("Unknown contact: {0}")]
    UnknownContact(ContactId),
}

/// Convenience type alias for Results with ApiError
pub type ApiResult<T> = Result<T, ApiError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
