//! Google Custom Search JSON API client.
//!
//! The [`CustomSearchClient`] pages through the Custom Search API in
//! batches of 10 results (the API maximum per request), filters item
//! links down to PDF documents, and stops as soon as the requested
//! count is reached or the provider runs out of results. The API serves
//! at most 100 results per query, so requested counts are clamped to
//! [1, 100].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::config::Credentials;

use super::{MAX_API_RESULTS, SearchError, SearchProvider, is_pdf_link};

/// Default Custom Search API base URL.
const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/customsearch/v1";

/// Results served per API request (API maximum).
const PAGE_SIZE: usize = 10;

/// Courtesy delay between successive page requests.
const PAGE_DELAY: Duration = Duration::from_secs(1);

/// HTTP timeout for API calls.
const API_TIMEOUT_SECS: u64 = 30;

// ==================== Custom Search API Response Types ====================

/// Top-level Custom Search API response.
///
/// The `items` array is absent entirely when a page has no results.
#[derive(Debug, Deserialize)]
struct CustomSearchResponse {
    items: Option<Vec<SearchItem>>,
}

/// A single result entry from the Custom Search response.
#[derive(Debug, Deserialize)]
struct SearchItem {
    link: Option<String>,
}

// ==================== CustomSearchClient ====================

/// Authenticated search provider backed by the Custom Search JSON API.
pub struct CustomSearchClient {
    client: Client,
    credentials: Credentials,
    base_url: String,
    page_delay: Duration,
}

impl CustomSearchClient {
    /// Creates a new client for the production API endpoint.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self::with_base_url(credentials, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn with_base_url(credentials: Credentials, base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(API_TIMEOUT_SECS))
            .gzip(true)
            .user_agent(crate::download::tool_user_agent())
            .build()
            .expect("failed to build HTTP client with static configuration");
        Self {
            client,
            credentials,
            base_url: base_url.into(),
            page_delay: PAGE_DELAY,
        }
    }

    /// Overrides the inter-page courtesy delay (tests use `Duration::ZERO`).
    #[must_use]
    pub fn with_page_delay(mut self, page_delay: Duration) -> Self {
        self.page_delay = page_delay;
        self
    }

    /// Fetches one page of results starting at the given 1-indexed offset.
    ///
    /// Returns `None` when the page carried no items at all (the provider
    /// ran out of results). A page whose items filter down to zero PDF
    /// links still returns `Some`, so paging continues.
    async fn fetch_page(
        &self,
        query: &str,
        start_index: usize,
    ) -> Result<Option<Vec<String>>, SearchError> {
        let url = format!(
            "{}?key={}&cx={}&q={}&start={}&fileType=pdf&alt=json",
            self.base_url,
            urlencoding::encode(&self.credentials.api_key),
            urlencoding::encode(&self.credentials.cx_id),
            urlencoding::encode(query),
            start_index,
        );

        debug!(start_index, "Calling Custom Search API");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SearchError::network("custom-search", e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Custom Search API error");
            return Err(SearchError::from_status("custom-search", status.as_u16()));
        }

        let text = response
            .text()
            .await
            .map_err(|e| SearchError::network("custom-search", e))?;
        let body: CustomSearchResponse = serde_json::from_str(&text)
            .map_err(|e| SearchError::malformed("custom-search", e.to_string()))?;

        let Some(items) = body.items else {
            return Ok(None);
        };
        if items.is_empty() {
            return Ok(None);
        }

        let links = items
            .into_iter()
            .filter_map(|item| item.link)
            .filter(|link| is_pdf_link(link))
            .collect();
        Ok(Some(links))
    }
}

impl std::fmt::Debug for CustomSearchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Credentials stay out of Debug output.
        f.debug_struct("CustomSearchClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl SearchProvider for CustomSearchClient {
    fn name(&self) -> &'static str {
        "custom-search"
    }

    /// Pages through the API lazily, stopping as soon as `count` PDF
    /// links are collected or a page comes back without items.
    #[instrument(skip(self), fields(provider = "custom-search", query = %query))]
    async fn search(&self, query: &str, count: usize) -> Result<Vec<String>, SearchError> {
        let count = count.clamp(1, MAX_API_RESULTS);
        let num_requests = count.div_ceil(PAGE_SIZE);

        let mut pdf_urls: Vec<String> = Vec::with_capacity(count);
        for page in 0..num_requests {
            if page > 0 && !self.page_delay.is_zero() {
                tokio::time::sleep(self.page_delay).await;
            }

            let start_index = page * PAGE_SIZE + 1;
            let Some(links) = self.fetch_page(query, start_index).await? else {
                debug!(page, "provider returned no further results");
                break;
            };

            for link in links {
                pdf_urls.push(link);
                if pdf_urls.len() >= count {
                    return Ok(pdf_urls);
                }
            }
        }

        debug!(found = pdf_urls.len(), requested = count, "search complete");
        Ok(pdf_urls)
    }
}
