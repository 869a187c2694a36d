//! HTTP client adapter shared by the session manager and the catalog services.
//!
//! Every request goes through [`ApiClient::send`], which reads the token
//! store once, merges an `Authorization: Bearer` header into the request,
//! and clears the token store when the backend answers 401. The
//! `Unauthorized` error is still returned to the caller.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::multipart::Form;
use reqwest::{Client, Method, Request, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::auth::TokenStore;

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// HTTP request timeout in milliseconds. Applies to every request; there is
/// no retry on expiry.
pub const REQUEST_TIMEOUT_MS: u64 = 15_000;

/// Query string pairs; `None` values are left out of the URL.
pub type Query<'a> = [(&'a str, Option<String>)];

/// API client for the catalog backend.
/// Clone is cheap - reqwest::Client and the token store are both shared.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    /// Create a client for `base_url` (e.g. `http://127.0.0.1:8000/api`)
    pub fn new(base_url: &str, tokens: Arc<dyn TokenStore>) -> Result<Self, ApiError> {
        let mut default_headers = HeaderMap::new();
        // Without this Laravel answers auth failures with an HTML redirect
        default_headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(Duration::from_millis(REQUEST_TIMEOUT_MS))
            .default_headers(default_headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    /// Join an API path onto the base URL
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Start a request against an API path. Send it with [`ApiClient::send`]
    /// so the token is attached.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, self.url(path))
    }

    /// Send a request, attaching the bearer token and intercepting 401s.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let mut request = builder.build()?;
        self.authorize(&mut request);

        debug!(method = %request.method(), url = %request.url(), "Sending request");
        let response = self.client.execute(request).await?;
        self.check_response(response).await
    }

    /// Insert the bearer header into the request's existing headers.
    fn authorize(&self, request: &mut Request) {
        let Some(token) = self.tokens.get() else {
            return;
        };
        match HeaderValue::from_str(&format!("Bearer {}", token)) {
            Ok(mut value) => {
                value.set_sensitive(true);
                request.headers_mut().insert(header::AUTHORIZATION, value);
            }
            Err(_) => warn!("Stored token is not a valid header value, sending without it"),
        }
    }

    /// Check if response is successful, returning an error with body if not.
    /// A 401 clears the stored token before the error is returned.
    async fn check_response(&self, response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED {
            match self.tokens.clear() {
                Ok(()) => info!(url = %response.url(), "Received 401, session token cleared"),
                Err(e) => warn!(error = %e, "Received 401 but failed to clear session token"),
            }
        }

        let body = response.text().await.unwrap_or_default();
        Err(ApiError::from_status(status, &body))
    }

    /// Read a response body as JSON. An empty body reads as `null`.
    async fn read_json(response: Response) -> Result<Value, ApiError> {
        let url = response.url().to_string();
        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text)
            .map_err(|e| ApiError::InvalidResponse(format!("Invalid JSON from {}: {}", url, e)))
    }

    // ===== JSON helpers =====

    pub async fn get_json(&self, path: &str, query: &Query<'_>) -> Result<Value, ApiError> {
        let pairs: Vec<(&str, &str)> = query
            .iter()
            .filter_map(|(key, value)| value.as_deref().map(|v| (*key, v)))
            .collect();
        let builder = self.request(Method::GET, path).query(&pairs);
        Self::read_json(self.send(builder).await?).await
    }

    pub async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value, ApiError> {
        let builder = self.request(Method::POST, path).json(body);
        Self::read_json(self.send(builder).await?).await
    }

    /// POST with no body
    pub async fn post_empty(&self, path: &str) -> Result<Value, ApiError> {
        let builder = self.request(Method::POST, path);
        Self::read_json(self.send(builder).await?).await
    }

    /// POST a multipart form (file uploads)
    pub async fn post_multipart(&self, path: &str, form: Form) -> Result<Value, ApiError> {
        let builder = self.request(Method::POST, path).multipart(form);
        Self::read_json(self.send(builder).await?).await
    }

    pub async fn delete_json(&self, path: &str) -> Result<Value, ApiError> {
        let builder = self.request(Method::DELETE, path);
        Self::read_json(self.send(builder).await?).await
    }
}
