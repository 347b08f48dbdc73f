//! reqwest-backed transport
//!
//! Credentials live in a cookie jar shared by every request, so whatever
//! session cookie the backend sets (or the user seeds) rides along
//! automatically.

use async_trait::async_trait;
use reqwest::cookie::Jar;
use reqwest::{Client, Url};
use std::sync::Arc;

use super::{ApiRequest, ApiResponse, Transport};
use crate::error::{ClientError, ClientResult};

/// HTTP transport for the BetterReads backend
pub struct HttpTransport {
    client: Client,
    base_url: Url,
    jar: Arc<Jar>,
}

impl HttpTransport {
    /// Create a transport rooted at `base_url`
    pub fn new(base_url: &str) -> ClientResult<Self> {
        let trimmed = base_url.trim_end_matches('/');
        let parsed = Url::parse(trimmed).map_err(|e| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            message: e.to_string(),
        })?;

        let jar = Arc::new(Jar::default());
        let client = Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .build()
            .map_err(ClientError::Request)?;

        Ok(Self {
            client,
            base_url: parsed,
            jar,
        })
    }

    /// Seed the jar with an existing session cookie (`name=value; ...`)
    pub fn with_session_cookie(self, cookie: &str) -> Self {
        self.jar.add_cookie_str(cookie, &self.base_url);
        self
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url(), path.trim_start_matches('/'))
    }

    async fn send(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
        let url = self.url(&request.path);
        tracing::debug!(method = %request.method, url = %url, "Sending backend request");

        let mut builder = self.client.request(request.method.clone(), &url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(ClientError::from_request)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(ClientError::from_request)?;

        tracing::debug!(method = %request.method, url = %url, status, "Backend responded");
        Ok(ApiResponse { status, body })
    }
}
