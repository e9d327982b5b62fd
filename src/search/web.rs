//! Unauthenticated scraped web search provider.
//!
//! The [`WebSearchClient`] fetches the DuckDuckGo HTML results page for
//! the query and extracts result links with the `scraper` crate. Result
//! anchors point at a redirect endpoint carrying the destination in the
//! `uddg` query parameter, which is unwrapped before filtering down to
//! PDF links.
//!
//! No credentials are required; the trade-off is a single page of
//! results and a markup contract that can change under us, so parse
//! failures surface as [`SearchError::MalformedResponse`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, instrument, warn};
use url::Url;

use super::{SearchError, SearchProvider, is_pdf_link};
use crate::download::BROWSER_USER_AGENT;

/// Default HTML search endpoint.
const DEFAULT_BASE_URL: &str = "https://html.duckduckgo.com/html";

/// CSS selector for result anchors on the HTML results page.
const RESULT_ANCHOR_SELECTOR: &str = "a.result__a";

/// HTTP timeout for the results page fetch.
const FETCH_TIMEOUT_SECS: u64 = 30;

/// Unauthenticated search provider scraping HTML web search results.
pub struct WebSearchClient {
    client: Client,
    base_url: String,
}

impl WebSearchClient {
    /// Creates a new client for the production search endpoint.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        // The HTML endpoint rejects non-browser clients, so identify as one.
        let client = Client::builder()
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .gzip(true)
            .user_agent(BROWSER_USER_AGENT)
            .build()
            .expect("failed to build HTTP client with static configuration");
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

impl Default for WebSearchClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for WebSearchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebSearchClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl SearchProvider for WebSearchClient {
    fn name(&self) -> &'static str {
        "web"
    }

    #[instrument(skip(self), fields(provider = "web", query = %query))]
    async fn search(&self, query: &str, count: usize) -> Result<Vec<String>, SearchError> {
        let url = format!("{}/?q={}", self.base_url, urlencoding::encode(query));

        debug!("Fetching web search results page");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SearchError::network("web", e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "web search returned error status");
            return Err(SearchError::from_status("web", status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SearchError::network("web", e))?;

        // Parsing happens in a sync helper: scraper's DOM is not Send and
        // must not be held across an await point.
        let urls = extract_pdf_links(&body, count);
        debug!(found = urls.len(), requested = count, "search complete");
        Ok(urls)
    }
}

/// Extracts up to `count` PDF links from the HTML results page.
#[allow(clippy::expect_used)]
fn extract_pdf_links(body: &str, count: usize) -> Vec<String> {
    let document = Html::parse_document(body);
    let anchors =
        Selector::parse(RESULT_ANCHOR_SELECTOR).expect("static selector must be valid CSS");

    document
        .select(&anchors)
        .filter_map(|anchor| anchor.value().attr("href"))
        .filter_map(unwrap_redirect)
        .filter(|link| is_pdf_link(link))
        .take(count)
        .collect()
}

/// Unwraps the `uddg` redirect parameter from a result anchor href.
///
/// Hrefs without a redirect parameter pass through unchanged; relative
/// or otherwise unparseable hrefs are dropped.
fn unwrap_redirect(href: &str) -> Option<String> {
    // Result anchors use protocol-relative redirect URLs.
    let absolute = if href.starts_with("//") {
        format!("https:{href}")
    } else {
        href.to_string()
    };

    let parsed = Url::parse(&absolute).ok()?;
    let destination = parsed
        .query_pairs()
        .find(|(key, _)| key == "uddg")
        .map(|(_, value)| value.into_owned());

    destination.or(Some(absolute))
}
