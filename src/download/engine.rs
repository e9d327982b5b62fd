//! Sequential download engine.
//!
//! The engine walks the URL list in order, fetching each one through
//! [`PdfClient`], validating the response as a PDF, writing accepted
//! bytes to a numbered file, and appending one [`DownloadEntry`] per
//! attempted URL to the [`DownloadLog`]. Per-URL failures are recorded
//! and skipped; they never abort the remaining downloads.
//!
//! A fixed delay separates consecutive URLs (simple self-imposed rate
//! limiting, not adaptive). Transient failures get at most one
//! additional attempt per URL.

use std::path::{Path, PathBuf};

use tokio::time::Duration;
use tracing::{debug, info, instrument, warn};

use super::client::{FetchedResponse, PdfClient};
use super::constants::INTER_DOWNLOAD_DELAY;
use super::error::DownloadError;
use super::log::{DownloadEntry, DownloadLog, DownloadOutcome};
use super::retry::{FailureType, MAX_ATTEMPTS_PER_URL, classify_error};
use super::validate::is_pdf_response;

/// Aggregate statistics for one download session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DownloadStats {
    succeeded: usize,
    failed: usize,
}

impl DownloadStats {
    /// Number of URLs written to disk.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.succeeded
    }

    /// Number of URLs recorded as failures.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Total URLs attempted.
    #[must_use]
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }
}

/// Result of attempting one URL, including whatever response metadata
/// was observed for the log entry.
struct Attempt {
    status: Option<u16>,
    headers: Vec<(String, String)>,
    result: Result<PathBuf, DownloadError>,
}

/// Sequential downloader: one URL at a time, fixed pacing delay.
#[derive(Debug)]
pub struct DownloadEngine {
    client: PdfClient,
    delay: Duration,
}

impl DownloadEngine {
    /// Creates an engine with the standard 1-second pacing delay.
    #[must_use]
    pub fn new(client: PdfClient) -> Self {
        Self::with_delay(client, INTER_DOWNLOAD_DELAY)
    }

    /// Creates an engine with an explicit pacing delay (tests use zero).
    #[must_use]
    pub fn with_delay(client: PdfClient, delay: Duration) -> Self {
        Self { client, delay }
    }

    /// Downloads every URL in order, appending one log entry per URL.
    ///
    /// `on_entry` is invoked after each URL is resolved (for progress
    /// reporting); it sees the same entry that was logged.
    ///
    /// # Errors
    ///
    /// Returns an IO error only when the download log itself cannot be
    /// appended to; per-URL download failures are recorded, not raised.
    #[instrument(skip_all, fields(urls = urls.len(), output_dir = %output_dir.display()))]
    pub async fn run(
        &self,
        urls: &[String],
        output_dir: &Path,
        log: &mut DownloadLog,
        mut on_entry: impl FnMut(&DownloadEntry),
    ) -> std::io::Result<DownloadStats> {
        let mut stats = DownloadStats::default();

        for (position, url) in urls.iter().enumerate() {
            let index = position + 1;

            if position > 0 && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            let (attempt, retried) = self.attempt_with_retry(url, index, output_dir).await;

            let outcome = match attempt.result {
                Ok(path) => {
                    info!(index, url = %url, path = %path.display(), "download succeeded");
                    stats.succeeded += 1;
                    DownloadOutcome::Success { path }
                }
                Err(error) => {
                    warn!(index, url = %url, error = %error, "download failed");
                    stats.failed += 1;
                    DownloadOutcome::Failure {
                        reason: error.to_string(),
                    }
                }
            };

            let entry = DownloadEntry {
                index,
                url: url.clone(),
                status: attempt.status,
                headers: attempt.headers,
                outcome,
                retried,
            };
            log.append(&entry)?;
            on_entry(&entry);
        }

        info!(
            succeeded = stats.succeeded(),
            failed = stats.failed(),
            total = stats.total(),
            "download session complete"
        );
        Ok(stats)
    }

    /// Attempts one URL, retrying once after a transient failure.
    async fn attempt_with_retry(
        &self,
        url: &str,
        index: usize,
        output_dir: &Path,
    ) -> (Attempt, bool) {
        let mut attempt = self.attempt(url, index, output_dir).await;
        let mut retried = false;

        for attempt_number in 1..MAX_ATTEMPTS_PER_URL {
            let Err(error) = &attempt.result else { break };
            if classify_error(error) != FailureType::Transient {
                break;
            }

            debug!(
                index,
                url = %url,
                attempt = attempt_number + 1,
                "retrying after transient failure"
            );
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            attempt = self.attempt(url, index, output_dir).await;
            retried = true;
        }

        (attempt, retried)
    }

    /// One fetch-classify-write pass for a single URL.
    async fn attempt(&self, url: &str, index: usize, output_dir: &Path) -> Attempt {
        let fetched = match self.client.fetch(url).await {
            Ok(fetched) => fetched,
            Err(error) => {
                return Attempt {
                    status: None,
                    headers: Vec::new(),
                    result: Err(error),
                };
            }
        };

        let status = Some(fetched.status);
        let headers = fetched.headers.clone();
        let result = write_if_valid_pdf(&fetched, url, index, output_dir).await;

        Attempt {
            status,
            headers,
            result,
        }
    }
}

/// Classifies the response per the download contract and writes the
/// body only when it is a valid, non-empty PDF.
async fn write_if_valid_pdf(
    fetched: &FetchedResponse,
    url: &str,
    index: usize,
    output_dir: &Path,
) -> Result<PathBuf, DownloadError> {
    if !fetched.is_success() {
        return Err(DownloadError::http_status(url, fetched.status));
    }

    if !is_pdf_response(fetched.content_type.as_deref(), &fetched.body) {
        return Err(DownloadError::not_pdf(
            url,
            fetched.content_type.as_deref().unwrap_or("unknown"),
        ));
    }

    if fetched.body.is_empty() {
        return Err(DownloadError::empty_body(url));
    }

    let path = output_dir.join(format!("document_{index}.pdf"));
    tokio::fs::write(&path, &fetched.body)
        .await
        .map_err(|e| DownloadError::io(path.clone(), e))?;
    Ok(path)
}
