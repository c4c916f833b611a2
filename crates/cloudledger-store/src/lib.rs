//! # cloudledger-store: State Layer for CloudLedger
//!
//! Owns the in-memory ledger - the authoritative product catalog plus the
//! append-only bill history - and every operation that reads or mutates it.
//!
//! ## Module Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       cloudledger-store                                 │
//! │                                                                         │
//! │  ┌───────────┐  write path   ┌───────────────────────────────────────┐ │
//! │  │  store    │◄──────────────│ billing   create_bill (atomic commit) │ │
//! │  │  Ledger   │               │ import    catalog bulk-load           │ │
//! │  │  products │               └───────────────────────────────────────┘ │
//! │  │  bills    │  read path    ┌───────────────────────────────────────┐ │
//! │  │           │◄──────────────│ reports   dashboard stats, series     │ │
//! │  └───────────┘               │ alerts    reorder evaluation          │ │
//! │        ▲                     │ invoice   printable document layout   │ │
//! │        │                     └───────────────────────────────────────┘ │
//! │  ┌───────────┐                                                         │
//! │  │LedgerState│  Arc<Mutex<Ledger>> - one critical section per write,  │
//! │  └───────────┘  consistent snapshots for reads                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Data Flow
//! Inventory Store → Billing Engine (reads stock/prices) → ledger mutation
//! (bill appended, stock decremented) → Dashboard Aggregator (reads bill
//! history) → Reorder Alerts (reads current stock against reorder points).

pub mod alerts;
pub mod billing;
pub mod config;
pub mod import;
pub mod invoice;
pub mod reports;
pub mod store;

pub use billing::{BillLine, BillRequest};
pub use config::{LedgerConfig, StockPolicy};
pub use invoice::{InvoiceDocument, InvoiceLine};
pub use reports::SalesPoint;
pub use store::{Ledger, LedgerState};
