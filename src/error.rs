//! Client Error Types
//!
//! Errors produced while talking to the BetterReads backend. Callers that
//! need to branch on the failure class use [`ClientError::is_unauthenticated`]
//! and [`ClientError::is_not_found`]; everything else is a network or
//! server failure.

use thiserror::Error;

/// Errors that can occur when communicating with the backend
#[derive(Error, Debug)]
pub enum ClientError {
    /// No session, or the session was rejected
    #[error("Not authenticated")]
    Unauthenticated,

    /// The requested resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other non-success status from the backend
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Transport-level failure reported by the HTTP client
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Request timeout")]
    Timeout,

    #[error("Backend unavailable")]
    Unavailable,

    /// Response body did not match the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Draft rejected before it was sent
    #[error("Invalid book: {0}")]
    InvalidDraft(String),

    /// Configured backend URL cannot be parsed
    #[error("Invalid base URL {url}: {message}")]
    InvalidBaseUrl { url: String, message: String },

    /// Backend answered with success but the payload breaks an invariant
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    /// Map a reqwest error to the matching error class
    pub(crate) fn from_request(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_connect() {
            ClientError::Unavailable
        } else {
            ClientError::Request(err)
        }
    }

    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, ClientError::Unauthenticated)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound(_))
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
