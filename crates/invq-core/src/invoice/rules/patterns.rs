//! Regex patterns for the supported invoice layout.
//!
//! Labels follow the `Label: value` lines of the sample invoices
//! (`From:`, `Invoice Number:`, `Invoice Date:`, `Due Date:`,
//! `Total Amount Due:`).

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Vendor: rest of the line after "From:"
    pub static ref VENDOR: Regex = Regex::new(
        r"From:\s*([^\n]+)"
    ).unwrap();

    // Invoice number: label is case-insensitive, the value is not
    pub static ref INVOICE_NUMBER: Regex = Regex::new(
        r"(?i:invoice\s*number)\s*[:#]?\s*([A-Z0-9-]+)"
    ).unwrap();

    // Labeled dates, strict ISO form first
    pub static ref INVOICE_DATE_ISO: Regex = Regex::new(
        r"Invoice\s*Date\s*[:#]?\s*([0-9]{4}-[0-9]{2}-[0-9]{2})"
    ).unwrap();

    pub static ref INVOICE_DATE_LOOSE: Regex = Regex::new(
        r"Invoice\s*Date\s*[:#]?\s*([0-9/]+)"
    ).unwrap();

    pub static ref DUE_DATE_ISO: Regex = Regex::new(
        r"Due\s*Date\s*[:#]?\s*([0-9]{4}-[0-9]{2}-[0-9]{2})"
    ).unwrap();

    pub static ref DUE_DATE_LOOSE: Regex = Regex::new(
        r"Due\s*Date\s*[:#]?\s*([0-9/]+)"
    ).unwrap();

    // Amount: optional $, digits with comma separators, exactly two decimals
    pub static ref AMOUNT: Regex = Regex::new(
        r"\$?\s*([0-9,]+\.[0-9]{2})"
    ).unwrap();
}

/// Return the first capture group of the first rule that matches.
pub fn first_capture<'t>(rules: &[&Regex], text: &'t str) -> Option<&'t str> {
    rules
        .iter()
        .find_map(|rule| rule.captures(text).and_then(|caps| caps.get(1)))
        .map(|m| m.as_str())
}
