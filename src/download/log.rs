//! Append-only download log artifact.
//!
//! One log file per download session, created with a session header and
//! appended to as each URL is attempted. Entries are never mutated
//! after append; an interrupted run leaves a valid prefix of the log.

use std::fmt::Write as _;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::debug;

use crate::report::{FILENAME_TIMESTAMP_FORMAT, HEADER_RULE_WIDTH, HEADER_TIMESTAMP_FORMAT};

/// Outcome of a single download attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The PDF was validated and written to disk.
    Success {
        /// Destination path of the written file.
        path: PathBuf,
    },
    /// The attempt failed; nothing was written.
    Failure {
        /// Human-readable failure reason.
        reason: String,
    },
}

impl DownloadOutcome {
    /// Returns true for successful outcomes.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// One entry in the download log, recorded per attempted URL.
#[derive(Debug, Clone)]
pub struct DownloadEntry {
    /// 1-indexed attempt position within the session.
    pub index: usize,
    /// The source URL.
    pub url: String,
    /// HTTP status code, when a response was received.
    pub status: Option<u16>,
    /// Response headers snapshot, when a response was received.
    pub headers: Vec<(String, String)>,
    /// Success or failure with reason.
    pub outcome: DownloadOutcome,
    /// Whether a second attempt was made after a transient failure.
    pub retried: bool,
}

/// Append-only structured log for one download session.
#[derive(Debug)]
pub struct DownloadLog {
    file: std::fs::File,
    path: PathBuf,
}

impl DownloadLog {
    /// Creates the session log file with its header block.
    ///
    /// # Errors
    ///
    /// Returns the underlying IO error when the file cannot be created
    /// or the header cannot be written.
    pub fn create(dir: &Path, total_urls: usize) -> std::io::Result<Self> {
        Self::create_with_timestamp(dir, total_urls, Local::now())
    }

    /// Creates the log with an explicit timestamp (deterministic tests).
    ///
    /// # Errors
    ///
    /// Returns the underlying IO error when the file cannot be created
    /// or the header cannot be written.
    pub fn create_with_timestamp(
        dir: &Path,
        total_urls: usize,
        started_at: DateTime<Local>,
    ) -> std::io::Result<Self> {
        let filename = format!(
            "download_log_{}.txt",
            started_at.format(FILENAME_TIMESTAMP_FORMAT)
        );
        let path = dir.join(filename);
        let mut file = std::fs::File::create(&path)?;

        let mut header = String::new();
        let _ = writeln!(
            header,
            "Download Session: {}",
            started_at.format(HEADER_TIMESTAMP_FORMAT)
        );
        let _ = writeln!(header, "Total URLs to download: {total_urls}");
        let _ = writeln!(header, "{}", "-".repeat(HEADER_RULE_WIDTH));
        header.push('\n');
        file.write_all(header.as_bytes())?;

        debug!(path = %path.display(), total_urls, "download log created");
        Ok(Self { file, path })
    }

    /// Appends one entry; entries are never rewritten.
    ///
    /// # Errors
    ///
    /// Returns the underlying IO error when the append fails.
    pub fn append(&mut self, entry: &DownloadEntry) -> std::io::Result<()> {
        self.file.write_all(render_entry(entry).as_bytes())?;
        self.file.flush()
    }

    /// Returns the log file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Renders one log entry block.
fn render_entry(entry: &DownloadEntry) -> String {
    let mut block = String::new();
    let _ = writeln!(
        block,
        "Attempting to download {}: {}",
        entry.index, entry.url
    );

    if let Some(status) = entry.status {
        let _ = writeln!(block, "Response status: {status}");
        let headers = entry
            .headers
            .iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(block, "Response headers: {{{headers}}}");
    }

    if entry.retried {
        let _ = writeln!(block, "Retried once after transient failure");
    }

    match &entry.outcome {
        DownloadOutcome::Success { path } => {
            let _ = writeln!(block, "Successfully downloaded to: {}", path.display());
        }
        DownloadOutcome::Failure { reason } => {
            let _ = writeln!(block, "Failed to download: {} - {reason}", entry.url);
        }
    }

    block.push('\n');
    block
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn fixed_timestamp() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap()
    }

    fn success_entry(index: usize) -> DownloadEntry {
        DownloadEntry {
            index,
            url: format!("https://example.com/{index}.pdf"),
            status: Some(200),
            headers: vec![("content-type".to_string(), "application/pdf".to_string())],
            outcome: DownloadOutcome::Success {
                path: PathBuf::from(format!("downloaded_pdfs/document_{index}.pdf")),
            },
            retried: false,
        }
    }

    #[test]
    fn test_create_writes_session_header() {
        let temp_dir = TempDir::new().unwrap();
        let log = DownloadLog::create_with_timestamp(temp_dir.path(), 3, fixed_timestamp()).unwrap();

        let content = std::fs::read_to_string(log.path()).unwrap();
        assert!(content.starts_with("Download Session: 2024-03-15 10:30:00\n"));
        assert!(content.contains("Total URLs to download: 3\n"));
        assert!(content.contains(&"-".repeat(50)));
    }

    #[test]
    fn test_log_filename_is_timestamped() {
        let temp_dir = TempDir::new().unwrap();
        let log = DownloadLog::create_with_timestamp(temp_dir.path(), 0, fixed_timestamp()).unwrap();
        assert_eq!(
            log.path().file_name().unwrap().to_str().unwrap(),
            "download_log_20240315_103000.txt"
        );
    }

    #[test]
    fn test_append_writes_one_block_per_entry_in_order() {
        let temp_dir = TempDir::new().unwrap();
        let mut log =
            DownloadLog::create_with_timestamp(temp_dir.path(), 2, fixed_timestamp()).unwrap();

        log.append(&success_entry(1)).unwrap();
        log.append(&DownloadEntry {
            index: 2,
            url: "https://example.com/missing.pdf".to_string(),
            status: Some(404),
            headers: vec![],
            outcome: DownloadOutcome::Failure {
                reason: "HTTP 404".to_string(),
            },
            retried: false,
        })
        .unwrap();

        let content = std::fs::read_to_string(log.path()).unwrap();
        assert_eq!(content.matches("Attempting to download").count(), 2);

        let first = content.find("Attempting to download 1:").unwrap();
        let second = content.find("Attempting to download 2:").unwrap();
        assert!(first < second, "entries must appear in attempt order");
        assert!(content.contains("Successfully downloaded to: downloaded_pdfs/document_1.pdf"));
        assert!(content.contains("Failed to download: https://example.com/missing.pdf - HTTP 404"));
    }

    #[test]
    fn test_entry_without_response_omits_status_lines() {
        let entry = DownloadEntry {
            index: 1,
            url: "https://example.com/a.pdf".to_string(),
            status: None,
            headers: vec![],
            outcome: DownloadOutcome::Failure {
                reason: "network error".to_string(),
            },
            retried: false,
        };
        let block = render_entry(&entry);
        assert!(!block.contains("Response status"));
        assert!(!block.contains("Response headers"));
        assert!(block.contains("Failed to download"));
    }

    #[test]
    fn test_retried_entry_notes_the_retry() {
        let mut entry = success_entry(1);
        entry.retried = true;
        let block = render_entry(&entry);
        assert!(block.contains("Retried once after transient failure"));
    }

    #[test]
    fn test_headers_snapshot_rendered_into_entry() {
        let block = render_entry(&success_entry(1));
        assert!(block.contains("Response headers: {content-type: application/pdf}"));
    }
}
