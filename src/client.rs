//! App Store Connect API client.
//!
//! Low-level HTTP client that handles authentication and raw requests.
//! Higher-level operations are implemented via traits on resource kinds.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use url::Url;

use crate::error::{AscError, ErrorObject, ErrorResponse, Result};

const DEFAULT_API_URL: &str = "https://api.appstoreconnect.apple.com/v1";
const USER_AGENT: &str = concat!("ascapi/", env!("CARGO_PKG_VERSION"));
const JSON_CONTENT_TYPE: &str = "application/json";

/// Low-level App Store Connect API client.
///
/// Handles authentication and HTTP requests. Resource-specific operations
/// are implemented via the `Get`, `List`, `Create`, `Update` and `Delete`
/// traits on resource kinds.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use ascapi::AscClient;
///
/// # async fn example() -> ascapi::Result<()> {
/// // Create from environment variables
/// let client = AscClient::from_env()?;
///
/// // Or configure manually
/// let client = AscClient::new("your-jwt", "https://api.appstoreconnect.apple.com/v1")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct AscClient {
    http: Client,
    base_url: Arc<Url>,
    token: String,
}

impl std::fmt::Debug for AscClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AscClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl AscClient {
    /// Create a client from environment variables.
    ///
    /// Uses `ASC_API_TOKEN` for authentication and optionally `ASC_API_URL`
    /// for the base URL (defaults to `https://api.appstoreconnect.apple.com/v1`).
    ///
    /// # Errors
    ///
    /// Returns an error if `ASC_API_TOKEN` is not set.
    pub fn from_env() -> Result<Self> {
        let token = env::var("ASC_API_TOKEN").map_err(|_| {
            AscError::ConfigMissing("ASC_API_TOKEN environment variable not set".to_string())
        })?;

        let base_url = env::var("ASC_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Self::new(&token, &base_url)
    }

    /// Create a new client with the provided bearer token and base URL.
    ///
    /// # Arguments
    ///
    /// * `token` - Signed App Store Connect JWT
    /// * `base_url` - Base URL of the API (e.g., `https://api.appstoreconnect.apple.com/v1`)
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(token: &str, base_url: &str) -> Result<Self> {
        // Ensure base URL ends with /
        let base_url_str = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let base_url = Url::parse(&base_url_str)?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(AscError::HttpError)?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            token: token.to_string(),
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Make a GET request.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = self.base_url.join(path)?;
        self.send(self.http.get(url)).await
    }

    /// Make a GET request with query parameters.
    #[tracing::instrument(skip(self, query))]
    pub async fn get_with_query<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<Response> {
        let url = self.base_url.join(path)?;
        self.send(self.http.get(url).query(query)).await
    }

    /// Make a POST request with an already encoded JSON body.
    #[tracing::instrument(skip(self, body), fields(len = body.len()))]
    pub async fn post(&self, path: &str, body: Vec<u8>) -> Result<Response> {
        let url = self.base_url.join(path)?;
        let request = self
            .http
            .post(url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(body);
        self.send(request).await
    }

    /// Make a PATCH request with an already encoded JSON body.
    #[tracing::instrument(skip(self, body), fields(len = body.len()))]
    pub async fn patch(&self, path: &str, body: Vec<u8>) -> Result<Response> {
        let url = self.base_url.join(path)?;
        let request = self
            .http
            .patch(url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(body);
        self.send(request).await
    }

    /// Make a DELETE request, optionally with a JSON body.
    ///
    /// Relationship removals carry a linkage body; plain resource deletes do not.
    #[tracing::instrument(skip(self, body))]
    pub async fn delete(&self, path: &str, body: Option<Vec<u8>>) -> Result<Response> {
        let url = self.base_url.join(path)?;
        let mut request = self.http.delete(url);
        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, JSON_CONTENT_TYPE).body(body);
        }
        self.send(request).await
    }

    /// Attach auth, send, and check the status.
    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(AscError::HttpError)?;

        tracing::debug!(status = response.status().as_u16(), url = %response.url(), "response");

        Self::check_response(response).await
    }

    /// Check response status and convert errors.
    async fn check_response(response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        // Handle rate limiting
        if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(AscError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        let (message, errors) = Self::extract_errors(response, status).await;
        Err(AscError::ApiError {
            message,
            status_code: Some(status.as_u16()),
            errors,
        })
    }

    /// Extract the JSON:API error objects from a failed response.
    async fn extract_errors(
        response: Response,
        status: reqwest::StatusCode,
    ) -> (String, Vec<ErrorObject>) {
        let body = match response.text().await {
            Ok(b) => b,
            Err(_) => return (format!("HTTP {status}"), Vec::new()),
        };

        if let Ok(parsed) = serde_json::from_str::<ErrorResponse>(&body) {
            if let Some(first) = parsed.errors.first() {
                return (first.to_string(), parsed.errors);
            }
        }

        if body.trim().is_empty() {
            (format!("HTTP {status}"), Vec::new())
        } else {
            (body, Vec::new())
        }
    }
}
