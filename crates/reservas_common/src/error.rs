// --- File: crates/reservas_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type shared by every reservas crate.
///
/// Crate-specific errors convert into this one with `From` impls so handlers
/// can return it directly; see `http.rs` for the JSON mapping.
#[derive(Error, Debug)]
pub enum ReservasError {
    /// Error occurred during an HTTP request
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Error occurred while parsing data
    #[error("{0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// No session, expired session, or provider refused the credentials
    #[error("{0}")]
    AuthError(String),

    /// Rejected input
    #[error("{0}")]
    ValidationError(String),

    /// The calendar provider failed; the message is the provider's own text
    #[error("{message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// The slot is already taken
    #[error("{0}")]
    ConflictError(String),

    #[error("Method not allowed")]
    MethodNotAllowed,
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for ReservasError {
    fn status_code(&self) -> u16 {
        match self {
            ReservasError::HttpError(_) => 500,
            ReservasError::ParseError(_) => 400,
            ReservasError::ConfigError(_) => 500,
            ReservasError::AuthError(_) => 401,
            ReservasError::ValidationError(_) => 400,
            ReservasError::ExternalServiceError { .. } => 500,
            ReservasError::ConflictError(_) => 409,
            ReservasError::MethodNotAllowed => 405,
        }
    }
}

// Common error conversions
impl From<reqwest::Error> for ReservasError {
    fn from(err: reqwest::Error) -> Self {
        ReservasError::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for ReservasError {
    fn from(err: serde_json::Error) -> Self {
        ReservasError::ParseError(err.to_string())
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> ReservasError {
    ReservasError::ConfigError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> ReservasError {
    ReservasError::ValidationError(message.to_string())
}

pub fn conflict<T: fmt::Display>(message: T) -> ReservasError {
    ReservasError::ConflictError(message.to_string())
}

pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> ReservasError {
    ReservasError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}
