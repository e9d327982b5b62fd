//! Search providers for discovering PDF document URLs.
//!
//! Two interchangeable providers implement the same contract:
//!
//! - [`CustomSearchClient`] - authenticated Google Custom Search JSON API
//! - [`WebSearchClient`] - unauthenticated scraped HTML web search
//!
//! Both produce an ordered list of candidate URLs, capped at the
//! requested count, terminating early when the provider returns fewer
//! results than requested. Provider failures (network, authentication,
//! quota, malformed response) surface as [`SearchError`].
//!
//! # Object Safety
//!
//! [`SearchProvider`] uses `async_trait` to support dynamic dispatch via
//! `Box<dyn SearchProvider>`. Rust 2024 native async traits are not
//! object-safe, so `async_trait` is required to let the CLI pick the
//! provider at runtime.

mod custom_search;
mod error;
mod web;

pub use custom_search::CustomSearchClient;
pub use error::SearchError;
pub use web::WebSearchClient;

use async_trait::async_trait;

/// Maximum result count served by the Custom Search API.
pub const MAX_API_RESULTS: usize = 100;

/// Trait implemented by all search providers.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Returns the provider's name (e.g., "custom-search", "web").
    fn name(&self) -> &str;

    /// Searches for PDF URLs matching the (already normalized) query.
    ///
    /// Returns at most `count` URLs in the provider's ranking order.
    /// Fewer URLs are returned when the provider runs out of results.
    async fn search(&self, query: &str, count: usize) -> Result<Vec<String>, SearchError>;
}

/// Returns true when the link points at a PDF document by extension.
pub(crate) fn is_pdf_link(url: &str) -> bool {
    url.to_lowercase().ends_with(".pdf")
}
