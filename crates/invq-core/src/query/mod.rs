//! Deterministic queries over the invoice store.
//!
//! None of these fail: empty stores, missing fields and no matches all
//! produce empty or zero results.

mod format;

pub use format::{
    NO_DUE_INVOICES, NO_VENDORS_ABOVE, format_currency, format_due_date, format_due_invoices,
    format_vendor_total, format_vendors_above,
};

use chrono::{Days, NaiveDate};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::models::invoice::Invoice;
use crate::store::InvoiceStore;

/// An invoice whose due date falls in the requested window.
#[derive(Debug, Clone, PartialEq)]
pub struct DueInvoice<'a> {
    pub invoice: &'a Invoice,
    pub due_date: NaiveDate,
}

/// Summed invoice value for one vendor label.
#[derive(Debug, Clone, PartialEq)]
pub struct VendorTotal {
    pub vendor: String,
    pub total: Decimal,
}

/// Invoices due between `today` and `today + days`, both inclusive.
///
/// Invoices without a parseable `YYYY-MM-DD` due date are skipped with a
/// warning. Results keep store order.
pub fn invoices_due_within(
    store: &InvoiceStore,
    days: u32,
    today: NaiveDate,
) -> Vec<DueInvoice<'_>> {
    let horizon = today
        .checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MAX);

    let mut due_soon = Vec::new();
    for invoice in store {
        let Some(due_date) = invoice.parsed_due_date() else {
            warn!(
                invoice_number = invoice.invoice_number.as_deref().unwrap_or("<unknown>"),
                due_date = invoice.due_date.as_deref().unwrap_or("<missing>"),
                "could not parse due date, skipping invoice"
            );
            continue;
        };

        if today <= due_date && due_date <= horizon {
            due_soon.push(DueInvoice { invoice, due_date });
        }
    }

    debug!(days, %today, %horizon, found = due_soon.len(), "due-date query");
    due_soon
}

/// Sum of totals for a vendor, matched case-insensitively.
///
/// Only case is folded; surrounding whitespace must match exactly.
pub fn total_for_vendor(store: &InvoiceStore, vendor_name: &str) -> Decimal {
    let wanted = vendor_name.to_lowercase();

    store
        .iter()
        .filter(|invoice| invoice.vendor_label().to_lowercase() == wanted)
        .fold(Decimal::ZERO, add_total)
}

/// Vendors whose summed totals are strictly above `threshold`.
///
/// Grouping uses the exact, case-sensitive vendor label, unlike
/// [`total_for_vendor`]. Vendors appear in first-seen store order.
pub fn vendors_above(store: &InvoiceStore, threshold: Decimal) -> Vec<VendorTotal> {
    let mut totals: IndexMap<&str, Decimal> = IndexMap::new();
    for invoice in store {
        let sum = totals.entry(invoice.vendor_label()).or_insert(Decimal::ZERO);
        *sum = add_total(*sum, invoice);
    }

    totals
        .into_iter()
        .filter(|(_, total)| *total > threshold)
        .map(|(vendor, total)| VendorTotal {
            vendor: vendor.to_string(),
            total,
        })
        .collect()
}

/// Add an invoice's total to a running sum, saturating at the `Decimal` range.
fn add_total(sum: Decimal, invoice: &Invoice) -> Decimal {
    let total = invoice.total_or_zero();
    sum.checked_add(total).unwrap_or_else(|| {
        warn!(
            vendor = invoice.vendor_label(),
            invoice_number = invoice.invoice_number.as_deref().unwrap_or("<unknown>"),
            "invoice total overflows the running sum, saturating"
        );
        if total.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn invoice(vendor: &str, total: &str, due_date: &str) -> Invoice {
        Invoice {
            vendor: Some(vendor.to_string()),
            invoice_number: Some(format!("INV-{}", vendor.len())),
            invoice_date: None,
            due_date: Some(due_date.to_string()),
            total: Some(dec(total)),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()
    }

    fn sample_store() -> InvoiceStore {
        InvoiceStore::new(vec![
            invoice("Amazon", "2450.00", "2025-09-05"),
            invoice("Microsoft", "3100.00", "2025-09-10"),
            invoice("Google Cloud", "1200.00", "2025-09-14"),
        ])
    }

    #[test]
    fn test_due_within_window_is_inclusive() {
        let store = sample_store();

        let due = invoices_due_within(&store, 9, today());
        let vendors: Vec<_> = due.iter().map(|d| d.invoice.vendor_label()).collect();
        assert_eq!(vendors, vec!["Amazon", "Microsoft"]);

        let due = invoices_due_within(&store, 4, today());
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].due_date, NaiveDate::from_ymd_opt(2025, 9, 5).unwrap());
    }

    #[test]
    fn test_due_today_with_zero_days() {
        let store = InvoiceStore::new(vec![invoice("Amazon", "1.00", "2025-09-01")]);
        assert_eq!(invoices_due_within(&store, 0, today()).len(), 1);
    }

    #[test]
    fn test_due_excludes_past_invoices() {
        let store = InvoiceStore::new(vec![invoice("Amazon", "1.00", "2025-08-31")]);
        assert!(invoices_due_within(&store, 30, today()).is_empty());
    }

    #[test]
    fn test_due_results_stay_in_window() {
        let store = InvoiceStore::new(
            (0..40)
                .map(|offset| {
                    let due = today() + Days::new(offset) - Days::new(10);
                    invoice("Vendor", "10.00", &due.format("%Y-%m-%d").to_string())
                })
                .collect(),
        );

        for days in [0u32, 1, 7, 20, 365] {
            let horizon = today() + Days::new(u64::from(days));
            for due in invoices_due_within(&store, days, today()) {
                assert!(today() <= due.due_date && due.due_date <= horizon);
            }
        }
    }

    #[test]
    fn test_due_skips_unparseable_dates() {
        let mut missing = invoice("Nobody", "5.00", "");
        missing.due_date = None;
        let store = InvoiceStore::new(vec![
            invoice("Slash", "5.00", "09/05/2025"),
            missing,
            invoice("Amazon", "2450.00", "2025-09-02"),
        ]);

        let due = invoices_due_within(&store, 7, today());
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].invoice.vendor_label(), "Amazon");
    }

    #[test]
    fn test_due_with_huge_window() {
        let store = sample_store();
        assert_eq!(invoices_due_within(&store, u32::MAX, today()).len(), 3);
    }

    #[test]
    fn test_total_for_vendor_ignores_case() {
        let store = sample_store();

        assert_eq!(total_for_vendor(&store, "Amazon"), dec("2450.00"));
        assert_eq!(total_for_vendor(&store, "AMAZON"), dec("2450.00"));
        assert_eq!(total_for_vendor(&store, "amazon"), dec("2450.00"));
    }

    #[test]
    fn test_total_for_vendor_sums_and_defaults() {
        let mut no_total = invoice("Amazon", "0", "2025-09-01");
        no_total.total = None;
        let store = InvoiceStore::new(vec![
            invoice("Amazon", "0.10", "2025-09-01"),
            invoice("amazon", "0.20", "2025-09-01"),
            no_total,
        ]);

        assert_eq!(total_for_vendor(&store, "Amazon"), dec("0.30"));
        assert_eq!(total_for_vendor(&store, "Unknown"), Decimal::ZERO);
        assert_eq!(total_for_vendor(&store, " Amazon"), Decimal::ZERO);
        assert_eq!(total_for_vendor(&InvoiceStore::empty(), "Amazon"), Decimal::ZERO);
    }

    #[test]
    fn test_vendors_above_threshold() {
        let result = vendors_above(&sample_store(), dec("2000"));

        assert_eq!(
            result,
            vec![
                VendorTotal { vendor: "Amazon".to_string(), total: dec("2450.00") },
                VendorTotal { vendor: "Microsoft".to_string(), total: dec("3100.00") },
            ]
        );
    }

    #[test]
    fn test_vendors_above_is_strict_and_sums_groups() {
        let store = InvoiceStore::new(vec![
            invoice("Google Cloud", "1200.00", "2025-09-14"),
            invoice("Amazon", "2000.00", "2025-09-05"),
            invoice("Google Cloud", "1000.01", "2025-09-20"),
        ]);

        let result = vendors_above(&store, dec("2000"));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].vendor, "Google Cloud");
        assert_eq!(result[0].total, dec("2200.01"));

        for entry in vendors_above(&store, dec("1000")) {
            assert!(entry.total > dec("1000"));
        }
        assert!(vendors_above(&InvoiceStore::empty(), Decimal::ZERO).is_empty());
    }

    #[test]
    fn test_sums_saturate_instead_of_overflowing() {
        let huge = "60000000000000000000000000000";
        let store = InvoiceStore::new(vec![
            invoice("A", huge, "2025-09-02"),
            invoice("A", huge, "2025-09-03"),
            invoice("B", "10.00", "2025-09-04"),
        ]);

        assert_eq!(total_for_vendor(&store, "a"), Decimal::MAX);
        assert_eq!(
            vendors_above(&store, dec("1000")),
            vec![VendorTotal { vendor: "A".to_string(), total: Decimal::MAX }]
        );
    }

    // Totals by vendor fold case, grouping above a threshold does not.
    #[test]
    fn test_vendor_case_asymmetry() {
        let store = InvoiceStore::new(vec![
            invoice("Amazon", "1500.00", "2025-09-05"),
            invoice("AMAZON", "1500.00", "2025-09-06"),
        ]);

        assert_eq!(total_for_vendor(&store, "amazon"), dec("3000.00"));
        assert!(vendors_above(&store, dec("2000")).is_empty());
        assert_eq!(vendors_above(&store, dec("1000")).len(), 2);
    }
}
