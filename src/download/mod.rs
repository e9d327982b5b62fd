//! HTTP download engine for PDF documents.
//!
//! The pipeline per URL is fetch → classify → write → log:
//!
//! - [`PdfClient`] - HTTP client with browser-like headers and a fixed timeout
//! - [`DownloadEngine`] - sequential per-URL loop with fixed pacing delay
//! - [`DownloadLog`] - append-only session log artifact
//! - [`classify_error`] - transient/permanent split for the single-retry policy
//! - [`validate`] - PDF content-type and signature checks

mod client;
mod constants;
mod engine;
mod error;
mod log;
mod retry;
pub mod validate;

pub use client::{FetchedResponse, PdfClient};
pub use constants::{BROWSER_USER_AGENT, DOWNLOAD_TIMEOUT_SECS, INTER_DOWNLOAD_DELAY};
pub(crate) use constants::tool_user_agent;
pub use engine::{DownloadEngine, DownloadStats};
pub use error::DownloadError;
pub use log::{DownloadEntry, DownloadLog, DownloadOutcome};
pub use retry::{FailureType, MAX_ATTEMPTS_PER_URL, classify_error};
