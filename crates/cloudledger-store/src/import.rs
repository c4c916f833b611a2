//! # Catalog Import
//!
//! Bulk-loads a product catalog from imported records (the spreadsheet
//! upload path in the UI). Records carry no ids; the ledger assigns a UUID
//! to each as it converts them, then commits through the same
//! all-or-nothing bulk insert the store uses everywhere.

use tracing::{debug, info};
use uuid::Uuid;

use crate::store::Ledger;
use cloudledger_core::{CoreResult, ImportedProduct, Product};

impl Ledger {
    /// Imports a batch of catalog records.
    ///
    /// ## Atomicity
    /// Every record is validated before any is inserted; one bad record
    /// (negative price, blank name, ...) aborts the whole import with the
    /// catalog unchanged.
    ///
    /// ## Returns
    /// The committed products, ids assigned, in input order.
    pub fn import_catalog(&mut self, records: Vec<ImportedProduct>) -> CoreResult<Vec<Product>> {
        debug!(records = records.len(), "import_catalog");

        let products: Vec<Product> = records.into_iter().map(assign_id).collect();
        self.add_products(products.clone())?;

        info!(count = products.len(), "Catalog imported");
        Ok(products)
    }
}

/// Converts an import record into a catalog product with a fresh UUID.
fn assign_id(record: ImportedProduct) -> Product {
    Product {
        id: Uuid::new_v4().to_string(),
        name: record.name,
        category: record.category,
        price_paise: record.price_paise,
        stock: record.stock,
        reorder_point: record.reorder_point,
        gst_rate_bps: record.gst_rate_bps,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, price_paise: i64, stock: i64) -> ImportedProduct {
        ImportedProduct {
            name: name.to_string(),
            category: "General".to_string(),
            price_paise,
            stock,
            reorder_point: 5,
            gst_rate_bps: None,
        }
    }

    #[test]
    fn test_import_assigns_ids_and_inserts() {
        let mut ledger = Ledger::new();

        let imported = ledger
            .import_catalog(vec![record("Notebook A5", 10000, 20), record("Stapler", 25000, 8)])
            .unwrap();

        assert_eq!(imported.len(), 2);
        assert_eq!(ledger.product_count(), 2);
        assert_ne!(imported[0].id, imported[1].id);

        let stored = ledger.product(&imported[0].id).unwrap();
        assert_eq!(stored.name, "Notebook A5");
        assert_eq!(stored.stock, 20);
    }

    #[test]
    fn test_bad_record_aborts_whole_import() {
        let mut ledger = Ledger::new();

        let result = ledger.import_catalog(vec![
            record("Notebook A5", 10000, 20),
            record("", 25000, 8), // blank name
        ]);

        assert!(result.is_err());
        assert_eq!(ledger.product_count(), 0);
    }

    #[test]
    fn test_import_lands_alongside_existing_catalog() {
        let mut ledger = Ledger::new();
        ledger.import_catalog(vec![record("Notebook A5", 10000, 20)]).unwrap();
        ledger.import_catalog(vec![record("Stapler", 25000, 8)]).unwrap();

        assert_eq!(ledger.product_count(), 2);
    }
}
