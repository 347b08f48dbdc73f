//! Backend Transport
//!
//! Everything that reaches the backend goes through the [`Transport`] trait.
//! Implementations attach the session credential to every request on their
//! own; callers never see cookies.
//!
//! - [`HttpTransport`]: reqwest client with a cookie jar
//! - `FakeBackend` (tests only): in-memory backend that records requests

mod http;

#[cfg(test)]
pub(crate) mod fake;

pub use http::HttpTransport;

use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{ClientError, ClientResult};

/// Sends requests to the backend with credentials attached
#[async_trait]
pub trait Transport: Send + Sync {
    /// Absolute URL for a backend path
    fn url(&self, path: &str) -> String;

    /// Issue one request and return the raw response
    async fn send(&self, request: ApiRequest) -> ClientResult<ApiResponse>;
}

/// A request relative to the backend base URL
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            body: Some(body),
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::DELETE,
            path: path.into(),
            body: None,
        }
    }
}

/// Status and body of a backend response
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turn a non-success status into the matching [`ClientError`]
    pub fn error_for_status(self, path: &str) -> ClientResult<Self> {
        match self.status {
            s if (200..300).contains(&s) => Ok(self),
            401 | 403 => Err(ClientError::Unauthenticated),
            404 => Err(ClientError::NotFound(path.to_string())),
            status => Err(ClientError::Api {
                status,
                message: self.error_message(),
            }),
        }
    }

    /// Decode the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> ClientResult<T> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// Backend errors come as `{"error": "..."}`; fall back to the raw body
    fn error_message(&self) -> String {
        serde_json::from_str::<ErrorBody>(&self.body)
            .map(|b| b.error)
            .unwrap_or_else(|_| self.body.trim().to_string())
    }
}
