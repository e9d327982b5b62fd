//! Search query normalization.
//!
//! User input is trimmed and, when the PDF file-type restriction is
//! absent, the `filetype:pdf` token is appended so every provider query
//! is scoped to PDF documents.

/// The file-type restriction token appended to every search query.
pub const PDF_FILETYPE_TOKEN: &str = "filetype:pdf";

/// Normalizes a raw search query for PDF-restricted searching.
///
/// Trims surrounding whitespace and appends [`PDF_FILETYPE_TOKEN`]
/// unless the query already contains it. Idempotent: normalizing an
/// already-normalized query returns it unchanged.
#[must_use]
pub fn normalize_query(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.contains(PDF_FILETYPE_TOKEN) {
        trimmed.to_string()
    } else {
        format!("{trimmed} {PDF_FILETYPE_TOKEN}")
    }
}
