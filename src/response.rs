//! Decoded responses that keep the HTTP status and headers around.

use reqwest::header::HeaderMap;
use reqwest::{Response, StatusCode};

use crate::error::{AscError, Result};

/// Header App Store Connect uses to report the hourly request budget.
const RATE_LIMIT_HEADER: &str = "x-rate-limit";

/// A decoded response body plus the status and headers it arrived with.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: T,
}

impl<T> ApiResponse<T> {
    /// Read the full body of `response` and decode it with `decode`.
    ///
    /// Decoding errors are tagged with the response status.
    pub(crate) async fn read_with<F>(response: Response, decode: F) -> Result<Self>
    where
        F: FnOnce(&[u8]) -> Result<T> + Send,
    {
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.bytes().await.map_err(AscError::HttpError)?;

        tracing::trace!(status = status.as_u16(), len = bytes.len(), "read response body");

        let body = decode(&bytes).map_err(|err| err.with_status(status.as_u16()))?;
        Ok(Self {
            status,
            headers,
            body,
        })
    }

    /// Discard status and headers.
    pub fn into_body(self) -> T {
        self.body
    }

    /// Map the body, keeping status and headers.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ApiResponse<U> {
        ApiResponse {
            status: self.status,
            headers: self.headers,
            body: f(self.body),
        }
    }

    /// Parse the `X-Rate-Limit` header, e.g. `user-hour-lim:3600;user-hour-rem:3597;`.
    pub fn rate_limit(&self) -> Option<RateLimit> {
        let raw = self.headers.get(RATE_LIMIT_HEADER)?.to_str().ok()?;
        Some(RateLimit::parse(raw))
    }
}

/// Hourly request budget reported by the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateLimit {
    pub limit: Option<u32>,
    pub remaining: Option<u32>,
}

impl RateLimit {
    fn parse(raw: &str) -> Self {
        let mut limit = RateLimit::default();
        for part in raw.split(';') {
            let Some((key, value)) = part.split_once(':') else {
                continue;
            };
            let value = value.trim().parse().ok();
            match key.trim() {
                "user-hour-lim" => limit.limit = value,
                "user-hour-rem" => limit.remaining = value,
                _ => {}
            }
        }
        limit
    }
}
