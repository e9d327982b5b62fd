//! Failure classification for the single-retry policy.
//!
//! When a download fails, the error is classified into a [`FailureType`]:
//! - [`FailureType::Transient`] - temporary failures worth one more attempt
//! - [`FailureType::Permanent`] - failures that won't succeed on retry
//!
//! The engine makes at most one additional attempt per URL after a
//! transient failure, with the same fixed pacing delay and no backoff.

use super::DownloadError;

/// Maximum attempts per URL (initial attempt plus one retry).
pub const MAX_ATTEMPTS_PER_URL: u32 = 2;

/// Classification of download failure types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureType {
    /// Temporary failure that may succeed on retry.
    ///
    /// Examples: network timeout, 5xx server errors, connection refused,
    /// 429 rate limiting.
    Transient,

    /// Failure that won't succeed regardless of retries.
    ///
    /// Examples: 404 Not Found, invalid URL, non-PDF content, IO errors.
    Permanent,
}

/// Classifies a download error for the retry decision.
///
/// # HTTP Status Code Classification
///
/// | Status | Type | Rationale |
/// |--------|------|-----------|
/// | 408 | Transient | Request timeout - may succeed |
/// | 429 | Transient | Rate limited - the fixed delay may be enough |
/// | 5xx | Transient | Server error - may be temporary |
/// | other 4xx | Permanent | Client error - won't succeed on retry |
///
/// Timeouts and network errors are transient; invalid URLs, IO errors,
/// and content-validation failures (not a PDF, empty body) are permanent —
/// the server answered, it just didn't serve a PDF.
pub fn classify_error(error: &DownloadError) -> FailureType {
    match error {
        DownloadError::Timeout { .. } | DownloadError::Network { .. } => FailureType::Transient,

        DownloadError::HttpStatus { status, .. } => classify_http_status(*status),

        DownloadError::NotPdf { .. }
        | DownloadError::EmptyBody { .. }
        | DownloadError::Io { .. }
        | DownloadError::InvalidUrl { .. } => FailureType::Permanent,
    }
}

fn classify_http_status(status: u16) -> FailureType {
    match status {
        408 | 429 => FailureType::Transient,
        status if (500..600).contains(&status) => FailureType::Transient,
        _ => FailureType::Permanent,
    }
}
