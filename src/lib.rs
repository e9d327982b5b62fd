//! PDF Search & Download Core Library
//!
//! This library provides the core functionality for the pdfgrab tool,
//! which queries a search provider for PDF documents, records the
//! discovered links, and downloads the files to local disk.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`query`] - Search query normalization
//! - [`config`] - Credential loading for the authenticated search variant
//! - [`search`] - Search providers (Custom Search API, scraped web search)
//! - [`report`] - Link report artifact
//! - [`download`] - Sequential PDF download engine with validation and logging

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod download;
pub mod query;
pub mod report;
pub mod search;

// Re-export commonly used types
pub use config::{ConfigError, Credentials};
pub use download::{
    DownloadEngine, DownloadEntry, DownloadError, DownloadLog, DownloadOutcome, DownloadStats,
    FailureType, PdfClient, classify_error,
};
pub use query::normalize_query;
pub use report::LinkReport;
pub use search::{
    CustomSearchClient, MAX_API_RESULTS, SearchError, SearchProvider, WebSearchClient,
};
