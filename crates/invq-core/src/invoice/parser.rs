//! Rule-based invoice parser.

use std::path::Path;
use std::time::Instant;

use tracing::{debug, info};

use crate::models::invoice::Invoice;
use crate::pdf;

use super::rules::{
    AmountExtractor, DateExtractor, DateField, FieldExtractor, InvoiceNumberExtractor,
    VendorExtractor,
};

/// Result of invoice extraction.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Extracted invoice data.
    pub invoice: Invoice,
    /// One warning per field that could not be found.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Trait for invoice parsing.
pub trait InvoiceParser {
    /// Parse an invoice from document text. Missing fields are not errors.
    fn parse(&self, text: &str) -> ExtractionResult;
}

/// Parser for the single-column `Label: value` invoice layout.
pub struct RuleInvoiceParser {
    due_dates: DateExtractor,
    invoice_dates: DateExtractor,
    amounts: AmountExtractor,
}

impl RuleInvoiceParser {
    /// Create a new parser.
    pub fn new() -> Self {
        Self {
            due_dates: DateExtractor::new(DateField::Due),
            invoice_dates: DateExtractor::new(DateField::Invoice),
            amounts: AmountExtractor::new(),
        }
    }

    /// Parse a document given as per-page text.
    pub fn parse_pages<I, S>(&self, pages: I) -> ExtractionResult
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.parse(&join_pages(pages))
    }

    /// Read a document (PDF or plain text) and parse it.
    ///
    /// An unreadable document is an error; missing fields are not.
    pub fn parse_file(&self, path: &Path) -> crate::Result<ExtractionResult> {
        let pages = pdf::load_pages(path)?;
        debug!("Read {} pages from {}", pages.len(), path.display());
        Ok(self.parse_pages(&pages))
    }
}

impl Default for RuleInvoiceParser {
    fn default() -> Self {
        Self::new()
    }
}

impl InvoiceParser for RuleInvoiceParser {
    fn parse(&self, text: &str) -> ExtractionResult {
        let start = Instant::now();

        info!("Parsing invoice from {} characters of text", text.len());

        let invoice = Invoice {
            vendor: VendorExtractor.extract(text),
            invoice_number: InvoiceNumberExtractor.extract(text),
            invoice_date: self.invoice_dates.extract(text),
            due_date: self.due_dates.extract(text),
            total: self.amounts.extract(text),
        };

        let warnings: Vec<String> = invoice
            .missing_fields()
            .into_iter()
            .map(|field| format!("Could not extract {}", field))
            .collect();

        debug!(
            "Extracted invoice {:?} from {:?} with {} missing fields",
            invoice.invoice_number,
            invoice.vendor,
            warnings.len()
        );

        ExtractionResult {
            invoice,
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

/// Concatenate page texts, each non-empty page followed by a newline.
pub fn join_pages<I, S>(pages: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut text = String::new();
    for page in pages {
        let page = page.as_ref();
        if !page.is_empty() {
            text.push_str(page);
            text.push('\n');
        }
    }
    text
}
