//! Link report artifact.
//!
//! After a search, the discovered URLs are written once to a
//! timestamped text file so the links survive even when the user
//! declines the download step. The artifact carries a small header
//! block (query, date, count) followed by a 1-indexed URL listing.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::info;

/// Separator width used in report and log headers.
pub(crate) const HEADER_RULE_WIDTH: usize = 50;

/// Timestamp format used in artifact filenames.
pub(crate) const FILENAME_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Timestamp format used in artifact header blocks.
pub(crate) const HEADER_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A link report: the discovered URL list plus run metadata.
///
/// Write-once; created once per run before any download starts.
#[derive(Debug)]
pub struct LinkReport<'a> {
    query: &'a str,
    urls: &'a [String],
    generated_at: DateTime<Local>,
}

impl<'a> LinkReport<'a> {
    /// Creates a report for the given query and discovered URLs,
    /// stamped with the current local time.
    #[must_use]
    pub fn new(query: &'a str, urls: &'a [String]) -> Self {
        Self::with_timestamp(query, urls, Local::now())
    }

    /// Creates a report with an explicit timestamp (deterministic tests).
    #[must_use]
    pub fn with_timestamp(query: &'a str, urls: &'a [String], generated_at: DateTime<Local>) -> Self {
        Self {
            query,
            urls,
            generated_at,
        }
    }

    /// Returns the report filename, derived from query and timestamp.
    ///
    /// The query part is omitted when it sanitizes to nothing.
    #[must_use]
    pub fn filename(&self) -> String {
        let timestamp = self.generated_at.format(FILENAME_TIMESTAMP_FORMAT);
        let safe_query = sanitize_for_filename(self.query);
        if safe_query.is_empty() {
            format!("pdf_links_{timestamp}.txt")
        } else {
            format!("pdf_links_{safe_query}_{timestamp}.txt")
        }
    }

    /// Renders the full report content.
    #[must_use]
    pub fn render(&self) -> String {
        let mut content = String::new();
        content.push_str(&format!("Search Query: {}\n", self.query));
        content.push_str(&format!(
            "Date: {}\n",
            self.generated_at.format(HEADER_TIMESTAMP_FORMAT)
        ));
        content.push_str(&format!("Number of PDFs found: {}\n", self.urls.len()));
        content.push_str(&"-".repeat(HEADER_RULE_WIDTH));
        content.push_str("\n\n");

        for (index, url) in self.urls.iter().enumerate() {
            content.push_str(&format!("{}. {url}\n", index + 1));
        }
        content
    }

    /// Writes the report into `dir` and returns the written path.
    ///
    /// # Errors
    ///
    /// Returns the underlying IO error when the file cannot be created
    /// or written; the caller treats this as terminal for the run.
    pub fn write_to(&self, dir: &Path) -> std::io::Result<PathBuf> {
        let path = dir.join(self.filename());
        let mut file = std::fs::File::create(&path)?;
        file.write_all(self.render().as_bytes())?;
        info!(path = %path.display(), count = self.urls.len(), "link report written");
        Ok(path)
    }
}

/// Keeps alphanumerics, `-` and `_`; maps spaces to `_`; drops the rest.
fn sanitize_for_filename(query: &str) -> String {
    query
        .trim()
        .chars()
        .filter_map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                Some(c)
            } else if c == ' ' {
                Some('_')
            } else {
                None
            }
        })
        .collect()
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

    fn sample_urls() -> Vec<String> {
        vec![
            "https://example.com/a.pdf".to_string(),
            "https://example.com/b.pdf".to_string(),
            "https://example.com/c.pdf".to_string(),
        ]
    }

    #[test]
    fn test_filename_derived_from_query_and_timestamp() {
        let urls = sample_urls();
        let report = LinkReport::with_timestamp("machine learning", &urls, fixed_timestamp());
        assert_eq!(
            report.filename(),
            "pdf_links_machine_learning_20240315_103000.txt"
        );
    }

    #[test]
    fn test_filename_omits_query_when_it_sanitizes_to_empty() {
        let urls = sample_urls();
        let report = LinkReport::with_timestamp("???", &urls, fixed_timestamp());
        assert_eq!(report.filename(), "pdf_links_20240315_103000.txt");
    }

    #[test]
    fn test_render_header_block() {
        let urls = sample_urls();
        let report = LinkReport::with_timestamp("rust", &urls, fixed_timestamp());
        let content = report.render();

        assert!(content.starts_with("Search Query: rust\n"));
        assert!(content.contains("Date: 2024-03-15 10:30:00\n"));
        assert!(content.contains("Number of PDFs found: 3\n"));
        assert!(content.contains(&"-".repeat(50)));
    }

    #[test]
    fn test_render_numbers_urls_from_one_with_no_gaps() {
        let urls = sample_urls();
        let report = LinkReport::with_timestamp("rust", &urls, fixed_timestamp());
        let content = report.render();

        assert!(content.contains("1. https://example.com/a.pdf\n"));
        assert!(content.contains("2. https://example.com/b.pdf\n"));
        assert!(content.contains("3. https://example.com/c.pdf\n"));
    }

    #[test]
    fn test_render_line_count_is_results_plus_header() {
        let urls = sample_urls();
        let report = LinkReport::with_timestamp("rust", &urls, fixed_timestamp());
        // 4 header lines + 1 blank + 3 URL lines
        assert_eq!(report.render().lines().count(), 8);
    }

    #[test]
    fn test_write_to_creates_report_file() {
        let temp_dir = TempDir::new().unwrap();
        let urls = sample_urls();
        let report = LinkReport::with_timestamp("rust", &urls, fixed_timestamp());

        let path = report.write_to(temp_dir.path()).unwrap();
        assert!(path.exists());
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, report.render());
    }

    #[test]
    fn test_write_to_missing_directory_surfaces_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("does-not-exist");
        let urls = sample_urls();
        let report = LinkReport::with_timestamp("rust", &urls, fixed_timestamp());

        assert!(report.write_to(&missing).is_err());
    }

    #[test]
    fn test_sanitize_keeps_hyphen_and_underscore() {
        assert_eq!(sanitize_for_filename("a-b_c d"), "a-b_c_d");
    }
}
