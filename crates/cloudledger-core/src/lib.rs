//! # cloudledger-core: Pure Business Logic for CloudLedger
//!
//! This crate is the **heart** of CloudLedger. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      CloudLedger Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Dashboard Frontend                           │   │
//! │  │   Inventory UI ──► Billing UI ──► Dashboard ──► Reorder Banner │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 cloudledger-store (state layer)                 │   │
//! │  │   add_product, create_bill, dashboard_stats, reorder_alerts    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ cloudledger-core (THIS CRATE) ★                 │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   error   │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │ CoreError │  │   rules   │  │   │
//! │  │   │   Bill    │  │  GstCalc  │  │ Validation│  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Bill, BillItem, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in paise (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use cloudledger_core::money::Money;
//! use cloudledger_core::types::GstRate;
//!
//! // Create money from paise (never from floats!)
//! let price = Money::from_paise(109900); // ₹1,099
//!
//! // Calculate GST with explicit rounding
//! let gst_rate = GstRate::from_bps(1800); // 18%
//! let gst = price.calculate_gst(gst_rate);
//!
//! // GST on ₹1,099 at 18% = ₹197.82
//! assert_eq!(gst.paise(), 19782);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use cloudledger_core::Money` instead of
// `use cloudledger_core::money::Money`

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum line items allowed on a single bill
///
/// ## Business Reason
/// Prevents runaway bills and keeps invoices printable on a single layout.
/// Can be made configurable per-business in future versions.
pub const MAX_BILL_ITEMS: usize = 100;

/// Maximum quantity of a single item on a bill
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10)
/// Configurable per-business in future versions.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Default cost ratio for net profit margin, in basis points (7000 = 70%)
///
/// ## Why a constant?
/// The margin model assumes cost is a fixed fraction of the sale price. It is
/// a placeholder, not a cost-accounting model, so the store layer exposes it
/// as configuration and only falls back to this default.
pub const DEFAULT_COST_RATIO_BPS: u32 = 7000;

/// Number of entries returned in the dashboard's top-products ranking
pub const TOP_PRODUCTS_LIMIT: usize = 5;
