//! Document acquisition: fetching resume bytes and turning them into text.

pub mod docx;
pub mod fetch;
pub mod pdf;

use std::path::Path;

use thiserror::Error;
use tracing::{debug, warn};

pub use fetch::{DocumentFetcher, ResumeDocument, SourceFetcher};

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("PDF parsing error: {0}")]
    Pdf(String),

    #[error("DOCX parsing error: {0}")]
    Docx(String),
}

/// Supported document kinds, chosen from the filename extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    PlainText,
}

impl DocumentKind {
    pub fn from_filename(filename: &str) -> Self {
        let ext = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("pdf") => DocumentKind::Pdf,
            Some("docx") | Some("doc") => DocumentKind::Docx,
            _ => DocumentKind::PlainText,
        }
    }
}

/// Turns raw document bytes into text. Implementations never fail: an
/// unreadable document yields an empty string.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8], filename: &str) -> String;
}

/// Default extractor: pdf-extract for PDFs, Open XML parsing for Word files,
/// lossy UTF-8 for everything else.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentTextExtractor;

impl TextExtractor for DocumentTextExtractor {
    fn extract(&self, bytes: &[u8], filename: &str) -> String {
        extract_text(bytes, filename)
    }
}

pub fn extract_text(bytes: &[u8], filename: &str) -> String {
    let kind = DocumentKind::from_filename(filename);
    let result = match kind {
        DocumentKind::Pdf => pdf::extract_pdf_text(bytes),
        DocumentKind::Docx => docx::extract_docx_text(bytes),
        DocumentKind::PlainText => Ok(String::from_utf8_lossy(bytes).replace('\u{FFFD}', "")),
    };

    match result {
        Ok(text) => {
            let text = text.trim().to_string();
            debug!("Extracted {} chars from {} ({:?})", text.len(), filename, kind);
            text
        }
        Err(e) => {
            warn!("Text extraction failed for {}: {}", filename, e);
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_extension_is_case_insensitive() {
        assert_eq!(DocumentKind::from_filename("Resume.PDF"), DocumentKind::Pdf);
        assert_eq!(DocumentKind::from_filename("cv.docx"), DocumentKind::Docx);
        assert_eq!(DocumentKind::from_filename("cv.DOC"), DocumentKind::Docx);
        assert_eq!(DocumentKind::from_filename("cv.txt"), DocumentKind::PlainText);
        assert_eq!(DocumentKind::from_filename("no_extension"), DocumentKind::PlainText);
    }

    #[test]
    fn test_plain_text_drops_invalid_utf8() {
        let bytes = b"Jane \xFF\xFEDoe\n";
        assert_eq!(extract_text(bytes, "resume.txt"), "Jane Doe");
    }

    #[test]
    fn test_corrupt_pdf_yields_empty_text() {
        assert_eq!(extract_text(b"definitely not a pdf", "resume.pdf"), "");
    }

    #[test]
    fn test_corrupt_docx_yields_empty_text() {
        assert_eq!(extract_text(b"not a zip archive", "resume.docx"), "");
    }

    #[test]
    fn test_extractor_trait_delegates() {
        let extractor = DocumentTextExtractor;
        assert_eq!(extractor.extract(b"  hello  ", "a.md"), "hello");
    }
}
