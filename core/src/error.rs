//! Error types for the employee API client.
//!
//! # Design
//! Callers care about four situations: the backend could not be reached
//! (`Network`), the record does not exist (`NotFound`), the backend rejected
//! the payload (`Validation`), or anything else went wrong server-side
//! (`Server`). The backend's own `message`, when it sends one, rides along so
//! views can show it verbatim.

use thiserror::Error;

/// Errors produced while talking to the employee backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS, ...).
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered 404.
    #[error("not found{}", suffix(.message))]
    NotFound { message: Option<String> },

    /// The backend answered 400 or 422.
    #[error("rejected by server{}", suffix(.message))]
    Validation { message: Option<String> },

    /// Any other unexpected status.
    #[error("HTTP {status}{}", suffix(.message))]
    Server { status: u16, message: Option<String> },

    /// A success body could not be decoded into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be encoded as JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// The message the backend attached to the failure, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::NotFound { message }
            | ApiError::Validation { message }
            | ApiError::Server { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }
}

fn suffix(message: &Option<String>) -> String {
    match message {
        Some(m) => format!(": {m}"),
        None => String::new(),
    }
}
