//! Labeled date extraction.

use regex::Regex;

use super::FieldExtractor;
use super::patterns::{
    DUE_DATE_ISO, DUE_DATE_LOOSE, INVOICE_DATE_ISO, INVOICE_DATE_LOOSE, first_capture,
};

/// Which labeled date to look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    /// "Invoice Date"
    Invoice,
    /// "Due Date"
    Due,
}

impl DateField {
    fn rules(self) -> [&'static Regex; 2] {
        match self {
            DateField::Invoice => [&*INVOICE_DATE_ISO, &*INVOICE_DATE_LOOSE],
            DateField::Due => [&*DUE_DATE_ISO, &*DUE_DATE_LOOSE],
        }
    }
}

/// Date field extractor.
///
/// Returns the date text as written; a strict `YYYY-MM-DD` value wins over
/// the looser digits-and-slashes form.
pub struct DateExtractor {
    field: DateField,
}

impl DateExtractor {
    pub fn new(field: DateField) -> Self {
        Self { field }
    }
}

impl FieldExtractor for DateExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        first_capture(&self.field.rules(), text).map(str::to_string)
    }
}
