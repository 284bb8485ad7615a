//! In-memory invoice store.
//!
//! The store is filled once, from the extractor or the persisted JSON
//! dataset, and is read-only afterwards.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::error::DatasetError;
use crate::models::invoice::Invoice;

/// Ordered, immutable collection of invoice records.
#[derive(Debug, Clone, Default)]
pub struct InvoiceStore {
    invoices: Vec<Invoice>,
}

impl InvoiceStore {
    /// Create a store from records in source order.
    pub fn new(invoices: Vec<Invoice>) -> Self {
        Self { invoices }
    }

    /// A store with no records; every query over it yields an empty result.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load a JSON dataset, failing on I/O or decoding errors.
    pub fn try_load(path: &Path) -> Result<Self, DatasetError> {
        let content = fs::read_to_string(path).map_err(|source| DatasetError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let invoices: Vec<Invoice> =
            serde_json::from_str(&content).map_err(|source| DatasetError::Malformed {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::new(invoices))
    }

    /// Load a JSON dataset, falling back to an empty store.
    ///
    /// A missing or malformed file is logged, not fatal.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(store) => {
                info!(
                    "Successfully loaded {} invoices from {}",
                    store.len(),
                    path.display()
                );
                store
            }
            Err(DatasetError::Read { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                warn!(
                    "Dataset {} was not found; run `invq parse` first. Continuing with no invoices.",
                    path.display()
                );
                Self::empty()
            }
            Err(e) => {
                warn!("{}. Continuing with no invoices.", e);
                Self::empty()
            }
        }
    }

    /// Write the records as a pretty-printed JSON array.
    pub fn save(&self, path: &Path) -> Result<(), DatasetError> {
        let content = serde_json::to_string_pretty(&self.invoices).map_err(|source| {
            DatasetError::Malformed {
                path: path.to_path_buf(),
                source,
            }
        })?;
        fs::write(path, content).map_err(|source| DatasetError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn len(&self) -> usize {
        self.invoices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.invoices.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Invoice> {
        self.invoices.iter()
    }

    pub fn invoices(&self) -> &[Invoice] {
        &self.invoices
    }
}

impl FromIterator<Invoice> for InvoiceStore {
    fn from_iter<I: IntoIterator<Item = Invoice>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a InvoiceStore {
    type Item = &'a Invoice;
    type IntoIter = std::slice::Iter<'a, Invoice>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn sample() -> InvoiceStore {
        InvoiceStore::new(vec![
            Invoice {
                vendor: Some("Amazon".to_string()),
                invoice_number: Some("INV-0012".to_string()),
                invoice_date: Some("2025-08-20".to_string()),
                due_date: Some("2025-09-05".to_string()),
                total: Some(Decimal::from_str("2450.00").unwrap()),
            },
            Invoice {
                vendor: Some("Microsoft".to_string()),
                ..Invoice::default()
            },
        ])
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invoices.json");

        sample().save(&path).unwrap();
        let loaded = InvoiceStore::try_load(&path).unwrap();

        assert_eq!(loaded.invoices(), sample().invoices());
    }

    #[test]
    fn test_missing_file() {
        let path = Path::new("definitely/missing/invoices.json");

        assert!(matches!(
            InvoiceStore::try_load(path),
            Err(DatasetError::Read { .. })
        ));
        assert!(InvoiceStore::load_or_empty(path).is_empty());
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invoices.json");
        fs::write(&path, r#"{"vendor": "not an array"}"#).unwrap();

        assert!(matches!(
            InvoiceStore::try_load(&path),
            Err(DatasetError::Malformed { .. })
        ));
        assert!(InvoiceStore::load_or_empty(&path).is_empty());
    }

    #[test]
    fn test_preserves_source_order() {
        let store: InvoiceStore = sample().iter().rev().cloned().collect();
        let vendors: Vec<_> = store.iter().map(|i| i.vendor_label()).collect();
        assert_eq!(vendors, vec!["Microsoft", "Amazon"]);
    }
}
