//! API client error types.

use thiserror::Error;

/// Errors surfaced by the cache-backed API client.
///
/// These are fatal to the call that triggered them and must reach the
/// caller so it can offer a retry affordance; the client itself never
/// retries. Prefetch element failures are logged and swallowed before
/// they would become one of these.
///
/// All variants are `Clone` so an error can be fanned out to every
/// caller sharing a coalesced in-flight request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The underlying transport failed (connect, timeout, TLS, ...).
    #[error("transport error: {0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// The response body did not match the expected envelope.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Decode(e.to_string())
    }
}
