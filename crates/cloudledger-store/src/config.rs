//! # Ledger Configuration
//!
//! Explicit, injected configuration for the ledger's policy decisions.
//! Nothing here is ambient: callers construct a `LedgerConfig` (or take the
//! defaults) and pass it to the operations that need one.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`CLOUDLEDGER_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use serde::{Deserialize, Serialize};

use cloudledger_core::DEFAULT_COST_RATIO_BPS;

/// Ledger configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerConfig {
    /// Business name printed in the invoice header.
    pub business_name: String,

    /// What happens when a bill would take stock below zero.
    pub stock_policy: StockPolicy,

    /// Cost ratio in basis points for the net-profit-margin model
    /// (7000 = cost is 70% of the sale price). A placeholder model, which
    /// is exactly why it is configuration and not a constant.
    pub cost_ratio_bps: u32,
}

/// Oversell policy for stock decrements.
///
/// The ledger applies ONE policy consistently, for bill commits and manual
/// stock adjustments alike; stock never goes negative undetected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockPolicy {
    /// Fail the operation with `InsufficientStock` before any mutation.
    #[default]
    Reject,

    /// Commit the operation and let stock go negative, emitting a
    /// `tracing::warn!` per affected product.
    AllowNegative,
}

impl Default for LedgerConfig {
    /// Returns the default configuration.
    ///
    /// ## Default Values
    /// - Business name: "CloudLedger"
    /// - Stock policy: reject oversells
    /// - Cost ratio: 70%
    fn default() -> Self {
        LedgerConfig {
            business_name: "CloudLedger".to_string(),
            stock_policy: StockPolicy::Reject,
            cost_ratio_bps: DEFAULT_COST_RATIO_BPS,
        }
    }
}

impl LedgerConfig {
    /// Creates a new LedgerConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `CLOUDLEDGER_BUSINESS_NAME`: Override the invoice header name
    /// - `CLOUDLEDGER_STOCK_POLICY`: "reject" or "allow_negative"
    /// - `CLOUDLEDGER_COST_RATIO`: Override the cost ratio (e.g., "70")
    pub fn from_env() -> Self {
        let mut config = LedgerConfig::default();

        if let Ok(name) = std::env::var("CLOUDLEDGER_BUSINESS_NAME") {
            config.business_name = name;
        }

        if let Ok(policy) = std::env::var("CLOUDLEDGER_STOCK_POLICY") {
            if policy.eq_ignore_ascii_case("allow_negative") {
                config.stock_policy = StockPolicy::AllowNegative;
            }
        }

        if let Ok(ratio_str) = std::env::var("CLOUDLEDGER_COST_RATIO") {
            if let Ok(pct) = ratio_str.parse::<f64>() {
                config.cost_ratio_bps = (pct * 100.0) as u32;
            }
        }

        config
    }
}
