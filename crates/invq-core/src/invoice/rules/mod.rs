//! Rule-based field extractors.
//!
//! Each extractor tries its patterns in order and the first match wins.
//! A field with no match is simply absent.

pub mod amounts;
pub mod dates;
pub mod labels;
pub mod patterns;

pub use amounts::{AmountExtractor, format_amount, parse_amount};
pub use dates::{DateExtractor, DateField};
pub use labels::{InvoiceNumberExtractor, VendorExtractor};
pub use patterns::first_capture;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;
}
