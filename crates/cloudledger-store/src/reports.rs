//! # Dashboard Aggregator
//!
//! Pure read-side functions over the bill history.
//!
//! ## Recompute, Don't Cache
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Every call walks the bill history from scratch: O(bills × items).      │
//! │  There is no stored aggregate, so there is nothing to invalidate and   │
//! │  the numbers can never drift from the history that produced them.      │
//! │                                                                         │
//! │  If the history ever grows far beyond a small business's volume, the   │
//! │  replacement is incremental counters maintained inside create_bill's   │
//! │  critical section - not a cache bolted on here.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::LedgerConfig;
use crate::store::Ledger;
use cloudledger_core::{DashboardStats, TopProduct, TOP_PRODUCTS_LIMIT};

/// One bucket of a time-bucketed sales series, shaped for the sales chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesPoint {
    /// Bucket label: "Jan".."Dec" for monthly, "Week 1".. for weekly.
    pub label: String,

    /// Total sales committed in this bucket, in paise.
    pub sales_paise: i64,
}

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

impl Ledger {
    /// Computes the dashboard summary from the bill history.
    ///
    /// ## Cost Model
    /// `net_profit_margin` assumes cost is a fixed fraction of the sale
    /// price (`config.cost_ratio_bps`). That is a placeholder, not cost
    /// accounting; it exists so the dashboard has a number until real cost
    /// data exists.
    pub fn dashboard_stats(&self, config: &LedgerConfig) -> DashboardStats {
        let total_sales: i64 = self.bills.iter().map(|b| b.total_paise).sum();
        let total_costs: i64 = self
            .bills
            .iter()
            .map(|b| cost_share(b.total_paise, config.cost_ratio_bps))
            .sum();

        let net_profit_margin = if total_sales == 0 {
            0.0
        } else {
            (total_sales - total_costs) as f64 / total_sales as f64 * 100.0
        };

        DashboardStats {
            total_sales_paise: total_sales,
            total_bills: self.bills.len() as u64,
            net_profit_margin,
            top_products: self.top_products(),
        }
    }

    /// Products ranked by quantity sold across all bills, descending.
    /// Ties break by ascending product id so the ranking is deterministic.
    fn top_products(&self) -> Vec<TopProduct> {
        let mut sold: HashMap<&str, i64> = HashMap::new();
        for bill in &self.bills {
            for item in &bill.items {
                *sold.entry(item.product_id.as_str()).or_insert(0) += item.quantity;
            }
        }

        let mut ranked: Vec<(&str, i64)> = sold.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(TOP_PRODUCTS_LIMIT);

        ranked
            .into_iter()
            .map(|(product_id, quantity_sold)| TopProduct {
                product_id: product_id.to_string(),
                name: self.products.get(product_id).map(|p| p.name.clone()),
                quantity_sold,
            })
            .collect()
    }

    /// Sales series for one calendar year, bucketed by month.
    /// Always returns 12 points, zero-filled for empty months.
    pub fn monthly_sales(&self, year: i32) -> Vec<SalesPoint> {
        let mut buckets = [0i64; 12];
        for bill in &self.bills {
            if bill.date.year() == year {
                buckets[bill.date.month0() as usize] += bill.total_paise;
            }
        }

        MONTH_LABELS
            .iter()
            .zip(buckets)
            .map(|(label, sales_paise)| SalesPoint {
                label: (*label).to_string(),
                sales_paise,
            })
            .collect()
    }

    /// Sales series for one calendar month, bucketed into 7-day weeks
    /// (days 1-7 are "Week 1", 8-14 "Week 2", ...). A 31-day month yields
    /// five buckets, the last covering days 29-31.
    pub fn weekly_sales(&self, year: i32, month: u32) -> Vec<SalesPoint> {
        let weeks = (days_in_month(year, month) as usize + 6) / 7;
        let mut buckets = vec![0i64; weeks];

        for bill in &self.bills {
            if bill.date.year() == year && bill.date.month() == month {
                let week = (bill.date.day() as usize - 1) / 7;
                buckets[week] += bill.total_paise;
            }
        }

        buckets
            .into_iter()
            .enumerate()
            .map(|(i, sales_paise)| SalesPoint {
                label: format!("Week {}", i + 1),
                sales_paise,
            })
            .collect()
    }
}

/// Cost under the fixed-ratio model, rounded to the nearest paisa.
fn cost_share(total_paise: i64, cost_ratio_bps: u32) -> i64 {
    ((total_paise as i128 * cost_ratio_bps as i128 + 5000) / 10000) as i64
}

/// Number of days in a calendar month.
fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(30)
}

// =============================================================================
// Unit Tests
// =============================================================================
