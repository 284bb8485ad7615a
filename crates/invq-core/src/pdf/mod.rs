//! Document sources: per-page text from PDF or plain-text invoices.

mod extractor;

pub use extractor::PdfExtractor;

use std::fs;
use std::path::Path;

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract text from a specific page (1-indexed).
    fn extract_page_text(&self, page: u32) -> Result<String>;

    /// Extract the text of every page, in page order.
    fn extract_pages(&self) -> Result<Vec<String>>;
}

/// Read a document from disk as per-page text.
///
/// `.pdf` files go through [`PdfExtractor`]; `.txt` files are a single page.
pub fn load_pages(path: &Path) -> crate::Result<Vec<String>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "pdf" => {
            let data = fs::read(path)?;
            let mut extractor = PdfExtractor::new();
            extractor.load(&data)?;
            Ok(extractor.extract_pages()?)
        }
        "txt" => Ok(vec![fs::read_to_string(path)?]),
        _ => Err(PdfError::UnsupportedFormat(path.display().to_string()).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvqError;

    #[test]
    fn test_load_text_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invoice.TXT");
        fs::write(&path, "From: Amazon\n").unwrap();

        assert_eq!(load_pages(&path).unwrap(), vec!["From: Amazon\n".to_string()]);
    }

    #[test]
    fn test_unsupported_extension() {
        let err = load_pages(Path::new("invoice.docx")).unwrap_err();
        assert!(matches!(err, InvqError::Pdf(PdfError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_pages(Path::new("missing/invoice.pdf")).unwrap_err();
        assert!(matches!(err, InvqError::Io(_)));
    }

    #[test]
    fn test_corrupt_pdf_is_pdf_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        fs::write(&path, b"%PDF-1.4 garbage").unwrap();

        let err = load_pages(&path).unwrap_err();
        assert!(matches!(err, InvqError::Pdf(_)));
    }
}
