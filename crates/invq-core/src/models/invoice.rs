//! Invoice record as produced by the field extractor and stored in the dataset.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Date format used for `invoice_date` and `due_date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single invoice record.
///
/// Every field is optional: extraction is best-effort and the persisted
/// dataset may carry `null` for anything the extractor missed. Dates are
/// kept as the text found on the document and parsed on demand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// Vendor (issuer) name.
    #[serde(default)]
    pub vendor: Option<String>,

    /// Invoice number/identifier.
    #[serde(default)]
    pub invoice_number: Option<String>,

    /// Issue date, normally `YYYY-MM-DD`.
    #[serde(default)]
    pub invoice_date: Option<String>,

    /// Payment due date, normally `YYYY-MM-DD`.
    #[serde(default)]
    pub due_date: Option<String>,

    /// Total amount due.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub total: Option<Decimal>,
}

impl Invoice {
    /// Vendor label, or the empty string when the vendor is unknown.
    pub fn vendor_label(&self) -> &str {
        self.vendor.as_deref().unwrap_or("")
    }

    /// Total amount, counting a missing total as zero.
    pub fn total_or_zero(&self) -> Decimal {
        self.total.unwrap_or(Decimal::ZERO)
    }

    /// Parse the due date, if present and in `YYYY-MM-DD` form.
    pub fn parsed_due_date(&self) -> Option<NaiveDate> {
        let due_date = self.due_date.as_deref()?;
        NaiveDate::parse_from_str(due_date, DATE_FORMAT).ok()
    }

    /// Fields that could not be extracted.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.vendor.is_none() {
            missing.push("vendor");
        }
        if self.invoice_number.is_none() {
            missing.push("invoice_number");
        }
        if self.invoice_date.is_none() {
            missing.push("invoice_date");
        }
        if self.due_date.is_none() {
            missing.push("due_date");
        }
        if self.total.is_none() {
            missing.push("total");
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_deserialize_with_nulls() {
        let json = r#"{
            "vendor": "Amazon",
            "invoice_number": null,
            "invoice_date": "2025-08-20",
            "due_date": null,
            "total": 2450.0
        }"#;

        let invoice: Invoice = serde_json::from_str(json).unwrap();
        assert_eq!(invoice.vendor.as_deref(), Some("Amazon"));
        assert!(invoice.invoice_number.is_none());
        assert!(invoice.due_date.is_none());
        assert_eq!(invoice.total, Some(Decimal::from_str("2450").unwrap()));
        assert_eq!(invoice.missing_fields(), vec!["invoice_number", "due_date"]);
    }

    #[test]
    fn test_deserialize_missing_keys() {
        let invoice: Invoice = serde_json::from_str(r#"{"vendor": "Google Cloud"}"#).unwrap();
        assert_eq!(invoice.vendor_label(), "Google Cloud");
        assert_eq!(invoice.total_or_zero(), Decimal::ZERO);
    }

    #[test]
    fn test_total_serializes_as_number() {
        let invoice = Invoice {
            total: Some(Decimal::from_str("3100.00").unwrap()),
            ..Invoice::default()
        };

        let value = serde_json::to_value(&invoice).unwrap();
        assert!(value["total"].is_number());
        assert!(value["vendor"].is_null());
    }

    #[test]
    fn test_parsed_due_date() {
        let mut invoice = Invoice {
            due_date: Some("2025-09-05".to_string()),
            ..Invoice::default()
        };
        assert_eq!(invoice.parsed_due_date(), NaiveDate::from_ymd_opt(2025, 9, 5));

        invoice.due_date = Some("09/05/2025".to_string());
        assert_eq!(invoice.parsed_due_date(), None);
    }
}
