//! # Ledger State
//!
//! The authoritative in-memory state: product catalog and bill history.
//!
//! ## Thread Safety
//! The ledger is wrapped in `Arc<Mutex<T>>` because:
//! 1. Multiple UI handlers may access/modify the ledger
//! 2. Only one handler should modify the ledger at a time
//! 3. A bill commit must decrement stock AND append the bill indivisibly
//!
//! ## Ledger Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Ledger State Operations                              │
//! │                                                                         │
//! │  Frontend Action          Operation                Ledger Change        │
//! │  ───────────────          ─────────                ─────────────        │
//! │                                                                         │
//! │  Save Product ───────────► add_product() ────────► products.insert     │
//! │                                                                         │
//! │  Edit Product ───────────► update_product() ─────► products[id] = p    │
//! │                                                                         │
//! │  Remove Product ─────────► delete_product() ─────► products.remove     │
//! │                                                                         │
//! │  Restock / Correct ──────► adjust_stock() ───────► stock += delta      │
//! │                                                                         │
//! │  Generate Bill ──────────► create_bill() ────────► stock -= qty        │
//! │                                       (billing.rs)  bills.push(bill)    │
//! │                                                                         │
//! │  Dashboard / Alerts ─────► dashboard_stats(), reorder_alerts()         │
//! │                                       (reports.rs, alerts.rs: reads)   │
//! │                                                                         │
//! │  NOTE: All write operations acquire the Mutex lock exclusively.         │
//! │        Read operations also acquire the lock but release it quickly.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use crate::config::{LedgerConfig, StockPolicy};
use cloudledger_core::validation::{
    validate_category, validate_gst_rate_bps, validate_price_paise, validate_product_name,
    validate_reorder_point, validate_stock,
};
use cloudledger_core::{Bill, CoreError, CoreResult, Product, ValidationError};

/// The ledger: product catalog plus append-only bill history.
///
/// ## Invariants
/// - Product ids are unique (insertion of a duplicate id fails)
/// - Bill numbers are unique across the history
/// - Bills are append-only and immutable once committed
/// - Stock decrements happen exactly once, inside the same `&mut self` call
///   that appends the bill
///
/// Fields are crate-private: every mutation goes through the operations
/// below (or `create_bill` in the billing module), never direct field
/// access from outside.
#[derive(Debug, Default)]
pub struct Ledger {
    /// Product catalog, keyed by product id.
    pub(crate) products: HashMap<String, Product>,

    /// Bill history, in commit order.
    pub(crate) bills: Vec<Bill>,

    /// Sequence for generated bill numbers.
    pub(crate) bill_seq: u64,
}

impl Ledger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Ledger::default()
    }

    // =========================================================================
    // Product Operations
    // =========================================================================

    /// Inserts a new product into the catalog.
    ///
    /// ## Behavior
    /// - Validates name, category, price, stock, reorder point and GST rate
    /// - An existing id fails with a `Duplicate` validation error; this
    ///   operation never overwrites (that is `update_product`'s job)
    pub fn add_product(&mut self, product: Product) -> CoreResult<()> {
        debug!(id = %product.id, name = %product.name, "Adding product");

        validate_product(&product)?;

        if self.products.contains_key(&product.id) {
            return Err(CoreError::Validation(ValidationError::Duplicate {
                field: "product id".to_string(),
                value: product.id,
            }));
        }

        self.products.insert(product.id.clone(), product);
        Ok(())
    }

    /// Bulk-inserts products (catalog import path).
    ///
    /// ## Atomicity
    /// Validates every product - including duplicate ids within the batch -
    /// BEFORE inserting any. A failing record leaves the catalog unchanged.
    pub fn add_products(&mut self, products: Vec<Product>) -> CoreResult<()> {
        debug!(count = products.len(), "Adding products");

        let mut batch_ids: Vec<&str> = Vec::with_capacity(products.len());
        for product in &products {
            validate_product(product)?;

            if self.products.contains_key(&product.id) || batch_ids.contains(&product.id.as_str())
            {
                return Err(CoreError::Validation(ValidationError::Duplicate {
                    field: "product id".to_string(),
                    value: product.id.clone(),
                }));
            }
            batch_ids.push(&product.id);
        }

        for product in products {
            self.products.insert(product.id.clone(), product);
        }
        Ok(())
    }

    /// Replaces the stored product matching `product.id`.
    ///
    /// ## Behavior
    /// An absent id signals `ProductNotFound` rather than silently doing
    /// nothing, so the UI can tell an edit from a race with a delete.
    pub fn update_product(&mut self, product: Product) -> CoreResult<()> {
        debug!(id = %product.id, "Updating product");

        validate_product(&product)?;

        match self.products.get_mut(&product.id) {
            Some(stored) => {
                *stored = product;
                Ok(())
            }
            None => Err(CoreError::ProductNotFound(product.id)),
        }
    }

    /// Removes a product from the catalog and returns it.
    ///
    /// Historical bills are untouched: their items carry price and quantity
    /// snapshots, so they stay accurate after the product is gone.
    pub fn delete_product(&mut self, id: &str) -> CoreResult<Product> {
        debug!(id = %id, "Deleting product");

        self.products
            .remove(id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))
    }

    /// Applies `stock += delta` (delta is negative for a sale or shrinkage
    /// correction).
    ///
    /// ## Stock Policy
    /// A result below zero follows the configured policy: `Reject` fails
    /// with `InsufficientStock` and leaves the stock unchanged;
    /// `AllowNegative` commits and warns.
    ///
    /// ## Returns
    /// The new stock level.
    pub fn adjust_stock(
        &mut self,
        product_id: &str,
        delta: i64,
        config: &LedgerConfig,
    ) -> CoreResult<i64> {
        debug!(id = %product_id, delta = %delta, "Adjusting stock");

        let product = self
            .products
            .get_mut(product_id)
            .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))?;

        let new_stock = product.stock + delta;
        if new_stock < 0 {
            match config.stock_policy {
                StockPolicy::Reject => {
                    return Err(CoreError::InsufficientStock {
                        name: product.name.clone(),
                        available: product.stock,
                        requested: -delta,
                    });
                }
                StockPolicy::AllowNegative => {
                    warn!(
                        id = %product_id,
                        name = %product.name,
                        stock = %new_stock,
                        "Stock adjusted below zero"
                    );
                }
            }
        }

        product.stock = new_stock;
        Ok(new_stock)
    }

    // =========================================================================
    // Read Operations
    // =========================================================================

    /// Looks up a product by id.
    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.get(id)
    }

    /// Returns all products, sorted by name (the catalog listing order).
    pub fn products(&self) -> Vec<&Product> {
        let mut products: Vec<&Product> = self.products.values().collect();
        products.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        products
    }

    /// Returns the number of catalog products.
    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    /// Returns the bill history in commit order.
    pub fn bills(&self) -> &[Bill] {
        &self.bills
    }

    /// Looks up a bill by id.
    pub fn bill(&self, id: &str) -> Option<&Bill> {
        self.bills.iter().find(|b| b.id == id)
    }

    /// Looks up a bill by its human-facing bill number.
    pub fn bill_by_number(&self, bill_number: &str) -> Option<&Bill> {
        self.bills.iter().find(|b| b.bill_number == bill_number)
    }
}

/// Field-level validation shared by insert, bulk-insert and update.
fn validate_product(product: &Product) -> CoreResult<()> {
    validate_product_name(&product.name)?;
    validate_category(&product.category)?;
    validate_price_paise(product.price_paise)?;
    validate_stock(product.stock)?;
    validate_reorder_point(product.reorder_point)?;
    if let Some(bps) = product.gst_rate_bps {
        validate_gst_rate_bps(bps)?;
    }
    Ok(())
}

// =============================================================================
// Shared Ledger State
// =============================================================================

/// Shared, thread-safe handle to the ledger.
///
/// ## Thread Safety
/// Uses `Arc<Mutex<Ledger>>` because:
/// - `Arc`: Allows shared ownership across threads
/// - `Mutex`: Ensures only one thread mutates the ledger at a time
///
/// ## Why Not RwLock?
/// Ledger operations are quick and the hot path (bill commit) is a write.
/// A RwLock would add complexity with minimal benefit.
#[derive(Debug, Clone, Default)]
pub struct LedgerState {
    ledger: Arc<Mutex<Ledger>>,
}

impl LedgerState {
    /// Creates a new empty ledger state.
    pub fn new() -> Self {
        LedgerState {
            ledger: Arc::new(Mutex::new(Ledger::new())),
        }
    }

    /// Executes a function with read access to the ledger.
    ///
    /// The closure observes a consistent snapshot: it can never see a bill's
    /// stock decrement without the bill itself.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let stats = state.with_ledger(|ledger| ledger.dashboard_stats(&config));
    /// ```
    pub fn with_ledger<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Ledger) -> R,
    {
        let ledger = self.ledger.lock().expect("Ledger mutex poisoned");
        f(&ledger)
    }

    /// Executes a function with write access to the ledger.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// state.with_ledger_mut(|ledger| ledger.create_bill(request, &config))?;
    /// ```
    pub fn with_ledger_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Ledger) -> R,
    {
        let mut ledger = self.ledger.lock().expect("Ledger mutex poisoned");
        f(&mut ledger)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
