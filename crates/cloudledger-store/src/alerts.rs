//! # Reorder Alert Evaluator
//!
//! Derives the set of products that need restocking. Pure and stateless:
//! nothing is persisted, each call re-evaluates the current inventory, so
//! an alert disappears the moment a restock lands.

use crate::store::Ledger;
use cloudledger_core::ReorderAlert;

impl Ledger {
    /// Returns a `ReorderAlert` for every product whose stock has fallen
    /// strictly below its reorder point, ordered by product id.
    ///
    /// The comparison is strict: a product sitting exactly AT its reorder
    /// point does not alert yet.
    pub fn reorder_alerts(&self) -> Vec<ReorderAlert> {
        let mut alerts: Vec<ReorderAlert> = self
            .products
            .values()
            .filter(|p| p.stock < p.reorder_point)
            .map(|p| ReorderAlert {
                product_id: p.id.clone(),
                current_stock: p.stock,
                reorder_point: p.reorder_point,
            })
            .collect();

        alerts.sort_by(|a, b| a.product_id.cmp(&b.product_id));
        alerts
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
