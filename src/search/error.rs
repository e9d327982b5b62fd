//! Error types for the search module.
//!
//! Search-provider failures are fatal to the current run and are
//! surfaced to the caller with enough context to explain what went
//! wrong (authentication, quota, network, or a response the client
//! could not understand).

use thiserror::Error;

/// Errors that can occur while querying a search provider.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error querying {provider}: {source}")]
    Network {
        /// The provider that failed.
        provider: &'static str,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// The provider rejected the request credentials (HTTP 400/401/403).
    #[error("authentication failed for {provider} (HTTP {status}): check your API key and engine ID")]
    AuthRejected {
        /// The provider that rejected the request.
        provider: &'static str,
        /// The HTTP status code.
        status: u16,
    },

    /// The provider reported quota exhaustion or rate limiting (HTTP 429).
    #[error("quota exceeded for {provider} (HTTP 429): try again later")]
    QuotaExceeded {
        /// The provider that reported the quota error.
        provider: &'static str,
    },

    /// Any other non-success HTTP status from the provider.
    #[error("HTTP {status} from {provider}")]
    HttpStatus {
        /// The provider that returned the status.
        provider: &'static str,
        /// The HTTP status code.
        status: u16,
    },

    /// The response body could not be decoded.
    #[error("malformed response from {provider}: {detail}")]
    MalformedResponse {
        /// The provider that returned the body.
        provider: &'static str,
        /// What failed to decode.
        detail: String,
    },
}

impl SearchError {
    /// Creates a network error from a reqwest error.
    pub fn network(provider: &'static str, source: reqwest::Error) -> Self {
        Self::Network { provider, source }
    }

    /// Creates the appropriate error for a non-success HTTP status.
    ///
    /// 400/401/403 map to [`SearchError::AuthRejected`], 429 to
    /// [`SearchError::QuotaExceeded`], everything else to
    /// [`SearchError::HttpStatus`].
    pub fn from_status(provider: &'static str, status: u16) -> Self {
        match status {
            400 | 401 | 403 => Self::AuthRejected { provider, status },
            429 => Self::QuotaExceeded { provider },
            _ => Self::HttpStatus { provider, status },
        }
    }

    /// Creates a malformed-response error.
    pub fn malformed(provider: &'static str, detail: impl Into<String>) -> Self {
        Self::MalformedResponse {
            provider,
            detail: detail.into(),
        }
    }
}
