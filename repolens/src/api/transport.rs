//! HTTP transport abstraction for testability.
//!
//! The client depends on this trait rather than on reqwest directly,
//! which enables mock transports in tests (call counting, canned
//! bodies, injected failures) without a network. Async methods are
//! dyn-compatible via boxed futures.

use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};

use super::error::FetchError;
use super::types::RateLimitSnapshot;
use crate::config::Config;

/// Boxed future type for dyn-compatible async methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A successful transport-level response.
///
/// Rate-limit quota is parsed out of the `x-ratelimit-*` headers when the
/// backend sends them; callers fall back to the body envelope otherwise.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub body: Bytes,
    pub rate_limit: Option<RateLimitSnapshot>,
}

/// Trait for HTTP GET operations against the backend.
///
/// Implementations map non-success statuses to [`FetchError::Status`],
/// so a returned `TransportResponse` always carries a usable body.
pub trait HttpTransport: Send + Sync {
    fn get(&self, url: &str) -> BoxFuture<'_, Result<TransportResponse, FetchError>>;
}

/// Real transport backed by reqwest.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport from configuration.
    ///
    /// Sets the default headers the backend expects: a user agent, JSON
    /// accept, and a bearer token when one is configured.
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("repolens/", env!("CARGO_PKG_VERSION"))),
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = &config.github_token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| FetchError::Transport(format!("invalid token header: {}", e)))?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| FetchError::Transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    fn get(&self, url: &str) -> BoxFuture<'_, Result<TransportResponse, FetchError>> {
        let request = self.client.get(url);
        let url = url.to_string();

        Box::pin(async move {
            let response = request
                .send()
                .await
                .map_err(|e| FetchError::Transport(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Status {
                    status: status.as_u16(),
                    url,
                });
            }

            let rate_limit = rate_limit_from_headers(response.headers());
            let body = response
                .bytes()
                .await
                .map_err(|e| FetchError::Transport(format!("failed to read body: {}", e)))?;

            Ok(TransportResponse { body, rate_limit })
        })
    }
}

/// Parse a rate-limit snapshot from `x-ratelimit-*` headers.
///
/// Returns `None` unless at least the remaining count is present; the
/// other fields default when absent.
fn rate_limit_from_headers(headers: &reqwest::header::HeaderMap) -> Option<RateLimitSnapshot> {
    let parse = |name: &str| -> Option<u32> {
        headers.get(name)?.to_str().ok()?.parse().ok()
    };

    let remaining = parse("x-ratelimit-remaining")?;
    let reset_at: DateTime<Utc> = headers
        .get("x-ratelimit-reset")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<i64>().ok())
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .unwrap_or_else(Utc::now);

    Some(RateLimitSnapshot {
        limit: parse("x-ratelimit-limit").unwrap_or(0),
        remaining,
        reset_at,
        used: parse("x-ratelimit-used").unwrap_or(0),
    })
}
