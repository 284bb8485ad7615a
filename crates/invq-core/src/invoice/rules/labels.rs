//! Single-line labeled fields: vendor and invoice number.

use super::FieldExtractor;
use super::patterns::{INVOICE_NUMBER, VENDOR};

/// Vendor extractor (`From: <vendor>`).
pub struct VendorExtractor;

impl FieldExtractor for VendorExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let caps = VENDOR.captures(text)?;
        Some(caps[1].trim().to_string())
    }
}

/// Invoice number extractor (`Invoice Number: INV-0012`).
pub struct InvoiceNumberExtractor;

impl FieldExtractor for InvoiceNumberExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let caps = INVOICE_NUMBER.captures(text)?;
        Some(caps[1].to_string())
    }
}
