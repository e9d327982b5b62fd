//! Constants for the download module (timeouts, headers, pacing).

use std::time::Duration;

/// Fixed HTTP timeout for each download request (30 seconds).
pub const DOWNLOAD_TIMEOUT_SECS: u64 = 30;

/// Fixed self-imposed delay between consecutive downloads (not adaptive).
pub const INTER_DOWNLOAD_DELAY: Duration = Duration::from_secs(1);

/// Browser User-Agent sent with every download request.
///
/// Many hosts serving PDFs reject non-browser clients outright, so the
/// downloader identifies as a mainstream browser from the start.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Accept header advertising the PDF content types we handle.
pub const PDF_ACCEPT: &str = "application/pdf,application/x-pdf,application/octet-stream";

/// Accept-Language header for the browser-like header set.
pub const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// Tool-identifying User-Agent for non-download traffic (search API calls).
#[must_use]
pub fn tool_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("pdfgrab/{version} (document-search-tool)")
}
