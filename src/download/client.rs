//! HTTP client wrapper for fetching PDF documents.
//!
//! The [`PdfClient`] issues GET requests with a browser-like header set
//! and a fixed 30-second timeout, and returns the full response
//! (status, headers snapshot, body bytes) so the engine can classify
//! and log it. Only transport-level problems (invalid URL, network
//! error, timeout) surface as errors here.

use std::time::Duration;

use futures_util::StreamExt;
use reqwest::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE as ACCEPT_LANGUAGE_HEADER, CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::{debug, instrument};
use url::Url;

use super::constants::{ACCEPT_LANGUAGE, BROWSER_USER_AGENT, DOWNLOAD_TIMEOUT_SECS, PDF_ACCEPT};
use super::error::DownloadError;

/// A fetched response with everything the engine needs to classify it.
#[derive(Debug)]
pub struct FetchedResponse {
    /// HTTP status code.
    pub status: u16,
    /// Content-Type header value, when present.
    pub content_type: Option<String>,
    /// Snapshot of all response headers, in arrival order.
    pub headers: Vec<(String, String)>,
    /// The full response body.
    pub body: Vec<u8>,
}

impl FetchedResponse {
    /// Returns true for 2xx status codes.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP client for downloading PDF files.
///
/// Created once and reused for every download in the run, taking
/// advantage of connection pooling.
#[derive(Debug, Clone)]
pub struct PdfClient {
    client: Client,
}

impl Default for PdfClient {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfClient {
    /// Creates a new client with the fixed 30-second timeout.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    pub fn new() -> Self {
        Self::with_timeout(DOWNLOAD_TIMEOUT_SECS)
    }

    /// Creates a client with an explicit timeout (tests use short ones).
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the
    /// supplied timeout configuration.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn with_timeout(timeout_secs: u64) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(PDF_ACCEPT));
        headers.insert(
            ACCEPT_LANGUAGE_HEADER,
            HeaderValue::from_static(ACCEPT_LANGUAGE),
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .gzip(true)
            .user_agent(BROWSER_USER_AGENT)
            .default_headers(headers)
            .build()
            .expect("failed to build HTTP client with static configuration");
        Self { client }
    }

    /// Fetches a URL, buffering the full body.
    ///
    /// The response is returned for *any* HTTP status; the caller
    /// classifies non-success statuses. Only transport failures are
    /// errors here.
    ///
    /// # Errors
    ///
    /// Returns `DownloadError` if:
    /// - The URL is invalid
    /// - The request fails (network error, timeout)
    /// - Reading the body fails mid-stream
    #[instrument(skip(self), fields(url = %url))]
    pub async fn fetch(&self, url: &str) -> Result<FetchedResponse, DownloadError> {
        // Validate URL before issuing the request
        Url::parse(url).map_err(|_| DownloadError::invalid_url(url.to_string()))?;

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                DownloadError::timeout(url)
            } else {
                DownloadError::network(url, e)
            }
        })?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(std::string::ToString::to_string);
        let headers = snapshot_headers(&response);

        let body = read_body(response, url).await?;

        debug!(status, bytes = body.len(), "response fetched");

        Ok(FetchedResponse {
            status,
            content_type,
            headers,
            body,
        })
    }

    /// Returns a reference to the underlying reqwest client.
    #[must_use]
    pub fn inner(&self) -> &Client {
        &self.client
    }
}

/// Accumulates the streamed response body into memory.
///
/// Streaming (rather than `bytes()`) keeps timeout errors mid-body
/// distinguishable and mirrors how larger transfers are consumed.
async fn read_body(response: reqwest::Response, url: &str) -> Result<Vec<u8>, DownloadError> {
    let mut stream = response.bytes_stream();
    let mut body: Vec<u8> = Vec::new();

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| {
            if e.is_timeout() {
                DownloadError::timeout(url)
            } else {
                DownloadError::network(url, e)
            }
        })?;
        body.extend_from_slice(&chunk);
    }

    Ok(body)
}

/// Snapshots response headers as displayable name/value pairs.
fn snapshot_headers(response: &reqwest::Response) -> Vec<(String, String)> {
    response
        .headers()
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                value.to_str().unwrap_or("<binary>").to_string(),
            )
        })
        .collect()
}
