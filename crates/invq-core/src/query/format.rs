//! Natural-language rendering of query results.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::{DueInvoice, VendorTotal};
use crate::invoice::rules::format_amount;

/// Answer for an empty due-date query.
pub const NO_DUE_INVOICES: &str = "0 invoices are due in the specified period.";

/// Answer for an empty vendors-above query.
pub const NO_VENDORS_ABOVE: &str = "No vendors found with total invoice value above the threshold.";

/// `$` followed by the amount with thousands separators and two decimals.
pub fn format_currency(amount: Decimal) -> String {
    format!("${}", format_amount(amount))
}

/// Abbreviated month and unpadded day, e.g. "Sep 5".
pub fn format_due_date(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// "2 invoices (Amazon (due Sep 5, $2,450.00), Microsoft (due Sep 10, $3,100.00))"
pub fn format_due_invoices(due: &[DueInvoice<'_>]) -> String {
    if due.is_empty() {
        return NO_DUE_INVOICES.to_string();
    }

    let items: Vec<String> = due
        .iter()
        .map(|d| {
            format!(
                "{} (due {}, {})",
                d.invoice.vendor_label(),
                format_due_date(d.due_date),
                format_currency(d.invoice.total_or_zero())
            )
        })
        .collect();

    let noun = if due.len() == 1 { "invoice" } else { "invoices" };
    format!("{} {} ({})", due.len(), noun, items.join(", "))
}

pub fn format_vendor_total(total: Decimal) -> String {
    format_currency(total)
}

/// "Amazon ($2,450.00), Microsoft ($3,100.00)"
pub fn format_vendors_above(vendors: &[VendorTotal]) -> String {
    if vendors.is_empty() {
        return NO_VENDORS_ABOVE.to_string();
    }

    vendors
        .iter()
        .map(|v| format!("{} ({})", v.vendor, format_currency(v.total)))
        .collect::<Vec<_>>()
        .join(", ")
}
