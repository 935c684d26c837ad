//! Client error types

use shared::ValidationError;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure (connect, timeout, TLS, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered 2xx with `success: false`
    #[error("{0}")]
    Api(String),

    /// Backend answered with a non-2xx status
    #[error("{message}")]
    Status { status: u16, message: String },

    /// Authentication required (401)
    #[error("Authentication required")]
    Unauthorized,

    /// Resource not found (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Client-side validation failed; no request was sent
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Local session storage failure
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ClientError {
    /// Build the error for a non-2xx response
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 => ClientError::Unauthorized,
            404 => ClientError::NotFound(message),
            _ => ClientError::Status { status, message },
        }
    }

    /// HTTP status behind this error, when there is one
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Unauthorized => Some(401),
            ClientError::NotFound(_) => Some(404),
            _ => None,
        }
    }

    /// Whether a read query may try again.
    ///
    /// Transport failures and 5xx answers are retried; client errors,
    /// validation and decoding failures are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Http(e) => e.status().is_none_or(|s| s.is_server_error()),
            ClientError::Status { status, .. } => *status >= 500,
            ClientError::Internal(_) => true,
            _ => false,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation(_))
    }

    /// Short message suitable for an inline error block or a toast
    pub fn display_message(&self) -> String {
        match self {
            ClientError::Http(e) if e.is_timeout() => "The server took too long to respond".into(),
            ClientError::Http(e) if e.is_connect() => "Unable to reach the server".into(),
            ClientError::Http(_) => "Network error, please try again".into(),
            ClientError::Api(message) | ClientError::Status { message, .. } => message.clone(),
            ClientError::Unauthorized => "Please sign in to continue".into(),
            ClientError::NotFound(message) => message.clone(),
            ClientError::Validation(e) => e.message.clone(),
            ClientError::InvalidResponse(_) | ClientError::Serialization(_) => {
                "Unexpected response from the server".into()
            }
            ClientError::Storage(_) => "Unable to save the session locally".into(),
            ClientError::Internal(message) => message.clone(),
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
