//! PDF response validation.
//!
//! A response counts as a PDF when its body starts with the `%PDF-`
//! magic bytes or the server declared one of the accepted PDF content
//! types. Everything else is rejected before any bytes reach disk.

/// Magic bytes every PDF file starts with.
pub const PDF_SIGNATURE: &[u8] = b"%PDF-";

/// Content types accepted as PDF-indicating.
const PDF_CONTENT_TYPES: [&str; 3] = [
    "application/pdf",
    "application/x-pdf",
    "application/octet-stream",
];

/// Returns true when the content-type header indicates a PDF document.
///
/// Matching is case-insensitive and ignores parameters
/// (`application/pdf; charset=binary` matches).
#[must_use]
pub fn is_pdf_content_type(content_type: Option<&str>) -> bool {
    let Some(value) = content_type else {
        return false;
    };
    let lowered = value.to_lowercase();
    PDF_CONTENT_TYPES.iter().any(|ct| lowered.contains(ct))
}

/// Returns true when the body starts with the PDF magic bytes.
#[must_use]
pub fn has_pdf_signature(body: &[u8]) -> bool {
    body.starts_with(PDF_SIGNATURE)
}

/// Returns true when either the signature or the content-type marks the
/// response as a PDF.
#[must_use]
pub fn is_pdf_response(content_type: Option<&str>, body: &[u8]) -> bool {
    has_pdf_signature(body) || is_pdf_content_type(content_type)
}
