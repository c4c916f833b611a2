//! # Billing Engine
//!
//! Validates and commits a new sale against the ledger.
//!
//! ## Bill Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Bill Commit Pipeline                              │
//! │                                                                         │
//! │  1. VALIDATE SHAPE                                                     │
//! │     └── customer name, line count, quantities, price overrides         │
//! │                                                                         │
//! │  2. RESOLVE & PRICE                                                    │
//! │     └── every product resolved (ProductNotFound aborts)                │
//! │     └── unit price = override | current catalog price (frozen)         │
//! │     └── subtotal = price × qty; GST per line on GST bills              │
//! │                                                                         │
//! │  3. CHECK STOCK                                                        │
//! │     └── requested quantities aggregated per product across lines       │
//! │     └── policy: Reject → InsufficientStock | AllowNegative → warn      │
//! │                                                                         │
//! │  4. NUMBER                                                             │
//! │     └── caller-supplied → collision check (DuplicateBillNumber)        │
//! │     └── otherwise generated: INV-YYYYMMDD-NNNN                         │
//! │                                                                         │
//! │  5. COMMIT (all-or-nothing)                                            │
//! │     └── decrement stock per product, append immutable Bill             │
//! │                                                                         │
//! │  Steps 1-4 never mutate. Any failure leaves the ledger unchanged.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::{LedgerConfig, StockPolicy};
use crate::store::Ledger;
use cloudledger_core::validation::{
    validate_bill_items, validate_customer_name, validate_price_paise, validate_quantity,
};
use cloudledger_core::{Bill, BillItem, CoreError, CoreResult, Money, PaymentType};

// =============================================================================
// Request Types
// =============================================================================

/// One requested line of a proposed bill.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillLine {
    /// Product to sell.
    pub product_id: String,

    /// Quantity to sell (validated positive).
    pub quantity: i64,

    /// Manual unit price in paise, overriding the catalog price.
    /// Supports discounts and negotiated pricing.
    pub unit_price_override_paise: Option<i64>,
}

/// A proposed bill, as submitted by the billing form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillRequest {
    pub customer_name: String,
    pub customer_phone: String,
    pub payment_type: PaymentType,

    /// Charge GST per line using each product's rate.
    pub is_gst_bill: bool,

    /// Customer GSTIN, recorded on GST bills.
    pub gst_number: Option<String>,

    /// Caller-supplied bill number. `None` lets the ledger generate one;
    /// a supplied number that collides fails with `DuplicateBillNumber`
    /// and the caller must regenerate.
    pub bill_number: Option<String>,

    /// Requested lines, in invoice order.
    pub lines: Vec<BillLine>,
}

// =============================================================================
// Bill Creation
// =============================================================================

impl Ledger {
    /// Validates and atomically commits a new bill.
    ///
    /// On success the involved products' stock has been decremented by
    /// exactly the sold quantities and the finalized `Bill` (with frozen
    /// price snapshots) has been appended to the history. On any failure
    /// the ledger is completely unchanged.
    pub fn create_bill(&mut self, request: BillRequest, config: &LedgerConfig) -> CoreResult<Bill> {
        let BillRequest {
            customer_name,
            customer_phone,
            payment_type,
            is_gst_bill,
            gst_number,
            bill_number,
            lines,
        } = request;

        debug!(customer = %customer_name, lines = lines.len(), "create_bill");

        // ---- 1. Shape validation ------------------------------------------
        validate_customer_name(&customer_name)?;
        validate_bill_items(lines.len())?;
        for line in &lines {
            validate_quantity(line.quantity)?;
            if let Some(paise) = line.unit_price_override_paise {
                validate_price_paise(paise)?;
            }
        }

        // ---- 2. Resolve products, freeze prices, compute totals -----------
        let mut items: Vec<BillItem> = Vec::with_capacity(lines.len());
        let mut total = Money::zero();
        let mut total_gst = Money::zero();

        for line in &lines {
            let product = self
                .products
                .get(&line.product_id)
                .ok_or_else(|| CoreError::ProductNotFound(line.product_id.clone()))?;

            let unit_price = line
                .unit_price_override_paise
                .map(Money::from_paise)
                .unwrap_or_else(|| product.price());
            let subtotal = unit_price.multiply_quantity(line.quantity);
            let gst = is_gst_bill.then(|| subtotal.calculate_gst(product.gst_rate()));

            total += subtotal;
            if let Some(g) = gst {
                total_gst += g;
            }

            items.push(BillItem {
                product_id: line.product_id.clone(),
                quantity: line.quantity,
                unit_price_paise: unit_price.paise(),
                subtotal_paise: subtotal.paise(),
                gst_paise: gst.map(|g| g.paise()),
            });
        }

        if is_gst_bill {
            total += total_gst;
        }

        // ---- 3. Stock sufficiency, aggregated per product ------------------
        // Two lines selling the same product count jointly against its stock.
        let mut requested: BTreeMap<String, i64> = BTreeMap::new();
        for line in &lines {
            *requested.entry(line.product_id.clone()).or_insert(0) += line.quantity;
        }

        if config.stock_policy == StockPolicy::Reject {
            for (product_id, qty) in &requested {
                if let Some(product) = self.products.get(product_id) {
                    if *qty > product.stock {
                        return Err(CoreError::InsufficientStock {
                            name: product.name.clone(),
                            available: product.stock,
                            requested: *qty,
                        });
                    }
                }
            }
        }

        // ---- 4. Bill number -----------------------------------------------
        let bill_number = match bill_number {
            Some(number) => {
                if self.bills.iter().any(|b| b.bill_number == number) {
                    return Err(CoreError::DuplicateBillNumber(number));
                }
                number
            }
            None => self.next_bill_number(),
        };

        // ---- 5. Commit: decrement stock, append bill ----------------------
        for (product_id, qty) in &requested {
            if let Some(product) = self.products.get_mut(product_id) {
                product.stock -= *qty;
                if product.stock < 0 {
                    warn!(
                        id = %product_id,
                        name = %product.name,
                        stock = %product.stock,
                        "Bill took stock below zero"
                    );
                }
            }
        }

        let bill = Bill {
            id: Uuid::new_v4().to_string(),
            bill_number,
            customer_name,
            customer_phone,
            items,
            total_paise: total.paise(),
            date: Utc::now(),
            payment_type,
            is_gst_bill,
            gst_number,
            total_gst_paise: is_gst_bill.then(|| total_gst.paise()),
        };

        info!(
            bill_number = %bill.bill_number,
            total = %total,
            items = bill.items.len(),
            "Bill committed"
        );

        self.bills.push(bill.clone());
        Ok(bill)
    }

    /// Generates the next bill number: `INV-YYYYMMDD-NNNN`.
    ///
    /// The sequence is ledger-wide, so generated numbers never repeat; the
    /// collision loop only matters when a caller has supplied a number in
    /// the generated format ahead of the sequence.
    fn next_bill_number(&mut self) -> String {
        loop {
            self.bill_seq += 1;
            let candidate = format!("INV-{}-{:04}", Utc::now().format("%Y%m%d"), self.bill_seq);
            if !self.bills.iter().any(|b| b.bill_number == candidate) {
                return candidate;
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use cloudledger_core::Product;

    fn test_product(id: &str, price_paise: i64, stock: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            category: "General".to_string(),
            price_paise,
            stock,
            reorder_point: 5,
            gst_rate_bps: None,
        }
    }

    fn cash_request(lines: Vec<BillLine>) -> BillRequest {
        BillRequest {
            customer_name: "Asha Traders".to_string(),
            customer_phone: "9845000000".to_string(),
            payment_type: PaymentType::Cash,
            is_gst_bill: false,
            gst_number: None,
            bill_number: None,
            lines,
        }
    }

    fn line(product_id: &str, quantity: i64) -> BillLine {
        BillLine {
            product_id: product_id.to_string(),
            quantity,
            unit_price_override_paise: None,
        }
    }

    #[test]
    fn test_create_bill_decrements_stock_and_totals() {
        // Price ₹100, stock 10, sell 3 → stock 7, total ₹300
        let mut ledger = Ledger::new();
        let config = LedgerConfig::default();
        ledger.add_product(test_product("p1", 10000, 10)).unwrap();

        let bill = ledger.create_bill(cash_request(vec![line("p1", 3)]), &config).unwrap();

        assert_eq!(bill.total_paise, 30000);
        assert_eq!(bill.items.len(), 1);
        assert_eq!(bill.items[0].subtotal_paise, 30000);
        assert_eq!(ledger.product("p1").unwrap().stock, 7);
        assert_eq!(ledger.bills().len(), 1);
    }

    #[test]
    fn test_total_equals_sum_of_subtotals() {
        let mut ledger = Ledger::new();
        let config = LedgerConfig::default();
        ledger.add_product(test_product("p1", 10000, 10)).unwrap();
        ledger.add_product(test_product("p2", 2550, 20)).unwrap();

        let bill = ledger
            .create_bill(cash_request(vec![line("p1", 2), line("p2", 3)]), &config)
            .unwrap();

        let sum: i64 = bill.items.iter().map(|i| i.subtotal_paise).sum();
        assert_eq!(bill.total_paise, sum);
        assert_eq!(bill.total_paise, 20000 + 7650);
    }

    #[test]
    fn test_only_billed_products_change() {
        let mut ledger = Ledger::new();
        let config = LedgerConfig::default();
        ledger.add_product(test_product("p1", 10000, 10)).unwrap();
        ledger.add_product(test_product("p2", 5000, 8)).unwrap();

        ledger.create_bill(cash_request(vec![line("p1", 4)]), &config).unwrap();

        assert_eq!(ledger.product("p1").unwrap().stock, 6);
        assert_eq!(ledger.product("p2").unwrap().stock, 8);
    }

    #[test]
    fn test_gst_bill_totals() {
        let mut ledger = Ledger::new();
        let config = LedgerConfig::default();
        let mut taxed = test_product("p1", 100000, 10); // ₹1,000
        taxed.gst_rate_bps = Some(1800); // 18%
        ledger.add_product(taxed).unwrap();
        ledger.add_product(test_product("p2", 50000, 10)).unwrap(); // no GST rate

        let mut request = cash_request(vec![line("p1", 1), line("p2", 1)]);
        request.is_gst_bill = true;
        request.gst_number = Some("29ABCDE1234F1Z5".to_string());

        let bill = ledger.create_bill(request, &config).unwrap();

        // ₹1,000 at 18% → ₹180 GST; p2 has no rate → ₹0
        assert_eq!(bill.items[0].gst_paise, Some(18000));
        assert_eq!(bill.items[1].gst_paise, Some(0));
        assert_eq!(bill.total_gst_paise, Some(18000));
        assert_eq!(bill.total_paise, 100000 + 50000 + 18000);
        assert_eq!(bill.gst_number.as_deref(), Some("29ABCDE1234F1Z5"));
    }

    #[test]
    fn test_non_gst_bill_has_no_gst_fields() {
        let mut ledger = Ledger::new();
        let config = LedgerConfig::default();
        let mut taxed = test_product("p1", 100000, 10);
        taxed.gst_rate_bps = Some(1800);
        ledger.add_product(taxed).unwrap();

        let bill = ledger.create_bill(cash_request(vec![line("p1", 1)]), &config).unwrap();

        // A non-GST bill ignores the product's rate entirely
        assert_eq!(bill.items[0].gst_paise, None);
        assert_eq!(bill.total_gst_paise, None);
        assert_eq!(bill.total_paise, 100000);
    }

    #[test]
    fn test_price_override_freezes_override() {
        let mut ledger = Ledger::new();
        let config = LedgerConfig::default();
        ledger.add_product(test_product("p1", 10000, 10)).unwrap();

        let discounted = BillLine {
            product_id: "p1".to_string(),
            quantity: 2,
            unit_price_override_paise: Some(9000),
        };
        let bill = ledger.create_bill(cash_request(vec![discounted]), &config).unwrap();

        assert_eq!(bill.items[0].unit_price_paise, 9000);
        assert_eq!(bill.total_paise, 18000);
        // The catalog price is untouched
        assert_eq!(ledger.product("p1").unwrap().price_paise, 10000);
    }

    #[test]
    fn test_product_not_found_leaves_ledger_unchanged() {
        let mut ledger = Ledger::new();
        let config = LedgerConfig::default();
        ledger.add_product(test_product("p1", 10000, 10)).unwrap();

        let err = ledger
            .create_bill(cash_request(vec![line("p1", 2), line("ghost", 1)]), &config)
            .unwrap_err();

        assert!(matches!(err, CoreError::ProductNotFound(id) if id == "ghost"));
        assert_eq!(ledger.product("p1").unwrap().stock, 10);
        assert!(ledger.bills().is_empty());
    }

    #[test]
    fn test_insufficient_stock_rejected_before_mutation() {
        // Stock 10, request 15 → InsufficientStock, stock stays 10
        let mut ledger = Ledger::new();
        let config = LedgerConfig::default();
        ledger.add_product(test_product("p1", 10000, 10)).unwrap();

        let err = ledger.create_bill(cash_request(vec![line("p1", 15)]), &config).unwrap_err();

        assert!(matches!(
            err,
            CoreError::InsufficientStock { available: 10, requested: 15, .. }
        ));
        assert_eq!(ledger.product("p1").unwrap().stock, 10);
        assert!(ledger.bills().is_empty());
    }

    #[test]
    fn test_oversell_aggregates_across_lines() {
        // 6 + 6 of the same product against stock 10 must fail jointly
        let mut ledger = Ledger::new();
        let config = LedgerConfig::default();
        ledger.add_product(test_product("p1", 10000, 10)).unwrap();

        let err = ledger
            .create_bill(cash_request(vec![line("p1", 6), line("p1", 6)]), &config)
            .unwrap_err();

        assert!(matches!(
            err,
            CoreError::InsufficientStock { available: 10, requested: 12, .. }
        ));
        assert_eq!(ledger.product("p1").unwrap().stock, 10);
    }

    #[test]
    fn test_allow_negative_policy_commits_oversell() {
        let mut ledger = Ledger::new();
        let config = LedgerConfig {
            stock_policy: StockPolicy::AllowNegative,
            ..LedgerConfig::default()
        };
        ledger.add_product(test_product("p1", 10000, 10)).unwrap();

        let bill = ledger.create_bill(cash_request(vec![line("p1", 15)]), &config).unwrap();

        assert_eq!(bill.total_paise, 150000);
        assert_eq!(ledger.product("p1").unwrap().stock, -5);
        assert_eq!(ledger.bills().len(), 1);
    }

    #[test]
    fn test_duplicate_bill_number_rejected() {
        let mut ledger = Ledger::new();
        let config = LedgerConfig::default();
        ledger.add_product(test_product("p1", 10000, 10)).unwrap();

        let mut first = cash_request(vec![line("p1", 1)]);
        first.bill_number = Some("INV-CUSTOM-1".to_string());
        ledger.create_bill(first, &config).unwrap();

        let mut second = cash_request(vec![line("p1", 1)]);
        second.bill_number = Some("INV-CUSTOM-1".to_string());
        let err = ledger.create_bill(second, &config).unwrap_err();

        assert!(matches!(err, CoreError::DuplicateBillNumber(n) if n == "INV-CUSTOM-1"));
        // The failed attempt mutated nothing
        assert_eq!(ledger.product("p1").unwrap().stock, 9);
        assert_eq!(ledger.bills().len(), 1);
    }

    #[test]
    fn test_generated_bill_numbers_are_unique() {
        let mut ledger = Ledger::new();
        let config = LedgerConfig::default();
        ledger.add_product(test_product("p1", 10000, 10)).unwrap();

        let a = ledger.create_bill(cash_request(vec![line("p1", 1)]), &config).unwrap();
        let b = ledger.create_bill(cash_request(vec![line("p1", 1)]), &config).unwrap();

        assert!(a.bill_number.starts_with("INV-"));
        assert!(b.bill_number.starts_with("INV-"));
        assert_ne!(a.bill_number, b.bill_number);
    }

    #[test]
    fn test_rejects_malformed_requests() {
        let mut ledger = Ledger::new();
        let config = LedgerConfig::default();
        ledger.add_product(test_product("p1", 10000, 10)).unwrap();

        // Empty item list
        let err = ledger.create_bill(cash_request(vec![]), &config).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));

        // Non-positive quantity
        let err = ledger.create_bill(cash_request(vec![line("p1", 0)]), &config).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));

        // Negative price override
        let bad_override = BillLine {
            product_id: "p1".to_string(),
            quantity: 1,
            unit_price_override_paise: Some(-1),
        };
        let err = ledger.create_bill(cash_request(vec![bad_override]), &config).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));

        // Blank customer name
        let mut request = cash_request(vec![line("p1", 1)]);
        request.customer_name = "  ".to_string();
        let err = ledger.create_bill(request, &config).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));

        assert!(ledger.bills().is_empty());
        assert_eq!(ledger.product("p1").unwrap().stock, 10);
    }

    #[test]
    fn test_items_preserve_line_order() {
        let mut ledger = Ledger::new();
        let config = LedgerConfig::default();
        ledger.add_product(test_product("p1", 10000, 10)).unwrap();
        ledger.add_product(test_product("p2", 5000, 10)).unwrap();
        ledger.add_product(test_product("p3", 2000, 10)).unwrap();

        let bill = ledger
            .create_bill(
                cash_request(vec![line("p3", 1), line("p1", 1), line("p2", 1)]),
                &config,
            )
            .unwrap();

        let order: Vec<&str> = bill.items.iter().map(|i| i.product_id.as_str()).collect();
        assert_eq!(order, vec!["p3", "p1", "p2"]);
    }

    #[test]
    fn test_deleting_product_keeps_bill_snapshot() {
        let mut ledger = Ledger::new();
        let config = LedgerConfig::default();
        ledger.add_product(test_product("p1", 10000, 10)).unwrap();

        let bill = ledger.create_bill(cash_request(vec![line("p1", 3)]), &config).unwrap();
        ledger.delete_product("p1").unwrap();

        let stored = ledger.bill(&bill.id).unwrap();
        assert_eq!(stored.items[0].unit_price_paise, 10000);
        assert_eq!(stored.items[0].subtotal_paise, 30000);
        assert_eq!(stored.items[0].quantity, 3);
        assert_eq!(stored.total_paise, 30000);
    }
}
