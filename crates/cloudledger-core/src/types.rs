//! # Domain Types
//!
//! Core domain types used throughout CloudLedger.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Bill       │   │    BillItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  product_id     │       │
//! │  │  name           │   │  bill_number    │   │  quantity       │       │
//! │  │  price_paise    │   │  total_paise    │   │  unit_price     │       │
//! │  │  stock          │   │  items          │   │  subtotal       │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    GstRate      │   │  PaymentType    │   │  ReorderAlert   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  bps (u32)      │   │  Online         │   │  product_id     │       │
//! │  │  1800 = 18%     │   │  Cash           │   │  current_stock  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! A bill has:
//! - `id`: UUID v4 - immutable, used for internal references
//! - `bill_number`: human-readable, printed on the invoice and used as the
//!   PDF filename
//!
//! ## Wire Shape
//! Every type here crosses into the dashboard frontend, so serde renames to
//! camelCase and ts-rs exports a matching TypeScript definition.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// GST Rate
// =============================================================================

/// GST rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1800 bps = 18% (a common GST slab)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GstRate(u32);

impl GstRate {
    /// Creates a GST rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        GstRate(bps)
    }

    /// Creates a GST rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        GstRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero GST rate.
    #[inline]
    pub const fn zero() -> Self {
        GstRate(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for GstRate {
    fn default() -> Self {
        GstRate::zero()
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog product available for billing.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown in the catalog and on invoices.
    pub name: String,

    /// Catalog category (e.g. "Electronics").
    pub category: String,

    /// Price in paise (smallest currency unit).
    pub price_paise: i64,

    /// Current stock level. Expected non-negative; whether a sale may push
    /// it below zero is the store's stock policy, not a property of the
    /// product itself.
    pub stock: i64,

    /// Stock threshold below which a reorder alert fires.
    pub reorder_point: i64,

    /// Optional GST rate override in basis points (1800 = 18%).
    /// Products without a rate bill GST-free even on GST bills.
    pub gst_rate_bps: Option<u32>,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_paise(self.price_paise)
    }

    /// Returns the GST rate, zero when unset.
    #[inline]
    pub fn gst_rate(&self) -> GstRate {
        self.gst_rate_bps.map(GstRate::from_bps).unwrap_or_default()
    }
}

// =============================================================================
// Payment Type
// =============================================================================

/// How the customer settled a bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum PaymentType {
    /// UPI / card / bank transfer.
    Online,
    /// Physical cash payment.
    Cash,
}

// =============================================================================
// Bill Item
// =============================================================================

/// A line item on a bill.
/// Uses the snapshot pattern to freeze pricing at time of sale: the unit
/// price is copied from the product (or the caller's override) when the bill
/// commits, so later catalog edits or deletions never rewrite history.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BillItem {
    /// The product this line references. A reference, not ownership: the
    /// product may be edited or deleted later without touching this line.
    pub product_id: String,

    /// Quantity sold (always positive).
    pub quantity: i64,

    /// Unit price in paise at time of sale (frozen).
    pub unit_price_paise: i64,

    /// Line subtotal (unit_price × quantity).
    pub subtotal_paise: i64,

    /// GST charged on this line; present only on GST bills.
    pub gst_paise: Option<i64>,
}

impl BillItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_paise(self.unit_price_paise)
    }

    /// Returns the line subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_paise(self.subtotal_paise)
    }
}

// =============================================================================
// Bill
// =============================================================================

/// An immutable record of a completed sale.
///
/// A bill is created once, atomically, by the billing engine. There is no
/// edit or void operation; corrections are new bills.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Bill {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Human-facing bill number, unique across the ledger. Printed on the
    /// invoice and used as the PDF filename.
    pub bill_number: String,

    pub customer_name: String,
    pub customer_phone: String,

    /// Line items in insertion order; this is the line order on the invoice.
    pub items: Vec<BillItem>,

    /// Grand total: sum of line subtotals, plus GST on GST bills.
    pub total_paise: i64,

    /// When the bill was committed.
    #[ts(as = "String")]
    pub date: DateTime<Utc>,

    pub payment_type: PaymentType,

    /// Whether GST was charged on this bill.
    pub is_gst_bill: bool,

    /// Customer GSTIN, when provided on a GST bill.
    pub gst_number: Option<String>,

    /// Total GST collected; present only on GST bills.
    pub total_gst_paise: Option<i64>,
}

impl Bill {
    /// Returns the grand total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_paise(self.total_paise)
    }

    /// Returns the total GST as Money, zero for non-GST bills.
    #[inline]
    pub fn total_gst(&self) -> Money {
        Money::from_paise(self.total_gst_paise.unwrap_or(0))
    }
}

// =============================================================================
// Dashboard Stats
// =============================================================================

/// Derived dashboard summary. Never stored: recomputed from the bill
/// history on every request, so there is no cache to invalidate.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DashboardStats {
    /// Sum of all bill totals, in paise.
    pub total_sales_paise: i64,

    /// Number of bills in the history.
    pub total_bills: u64,

    /// Net profit margin as a percentage (0.0 for an empty history).
    pub net_profit_margin: f64,

    /// Products ranked by quantity sold, descending.
    pub top_products: Vec<TopProduct>,
}

/// One entry in the top-products ranking.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TopProduct {
    pub product_id: String,

    /// Name resolved against the current catalog; `None` when the product
    /// has since been deleted (its sales still count).
    pub name: Option<String>,

    pub quantity_sold: i64,
}

// =============================================================================
// Reorder Alert
// =============================================================================

/// A transient low-stock signal: `current_stock < reorder_point`.
/// Not a stored entity; just a query result over the current inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ReorderAlert {
    pub product_id: String,
    pub current_stock: i64,
    pub reorder_point: i64,
}

// =============================================================================
// Imported Product
// =============================================================================

/// A catalog-import record. Carries no id; the store assigns a UUID when
/// the import is committed.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ImportedProduct {
    pub name: String,
    pub category: String,
    pub price_paise: i64,
    pub stock: i64,
    pub reorder_point: i64,
    pub gst_rate_bps: Option<u32>,
}

// =============================================================================
// Unit Tests
// =============================================================================
