use thiserror::Error;

/// Top-level error type for the `zdesk-api` crate.
///
/// Covers every failure mode a call can hit: transport, the remote API
/// saying no, undecodable payloads, and bad caller input. Cache-layer
/// failures never surface through [`Client::dispatch`] paths -- they only
/// appear from explicit maintenance operations like `clear_cache`.
///
/// [`Client::dispatch`]: crate::Client
#[derive(Debug, Error)]
pub enum Error {
    /// The server answered with a non-2xx status. Carries the raw body
    /// so callers can inspect the API's own error payload.
    #[error("API error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    /// HTTP transport error (connection refused, DNS failure, timeout).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// Caller passed input the contract rejects (e.g. an empty id list
    /// where at least one identifier is required).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Cache store failure, surfaced only from maintenance entry points.
    #[error("Cache store error: {0}")]
    Cache(#[from] CacheError),
}

/// Failure in the cache store boundary.
///
/// During dispatch these are logged and treated as a miss; the call
/// always falls through to the transport.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The backing store could not be read.
    #[error("cache read failed: {0}")]
    Read(String),

    /// The backing store could not be written.
    #[error("cache write failed: {0}")]
    Write(String),

    /// The store is unreachable or otherwise unusable.
    #[error("cache store unavailable: {0}")]
    Unavailable(String),
}

impl Error {
    /// Returns `true` if this is a "not found" response from the API.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Api { status, .. } => *status == 404,
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            _ => false,
        }
    }

    /// Returns `true` if the server rejected the credentials.
    pub fn is_auth_rejected(&self) -> bool {
        matches!(self, Self::Api { status: 401 | 403, .. })
    }

    /// The HTTP status code, if this error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
