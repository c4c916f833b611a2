//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  In many billing systems:                                               │
//! │    ₹10.00 / 3 = ₹3.33 (×3 = ₹9.99)  → Lost ₹0.01!                      │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise                                            │
//! │    1000 paise / 3 = 333 paise (×3 = 999 paise)                         │
//! │    We KNOW we lost 1 paisa, and handle it explicitly                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cloudledger_core::money::Money;
//!
//! // Create from paise (preferred)
//! let price = Money::from_paise(109950); // ₹1,099.50
//!
//! // Arithmetic operations
//! let doubled = price * 2;                       // ₹2,199
//! let total = price + Money::from_paise(50);     // ₹1,100
//!
//! // NEVER do this:
//! // let bad = Money::from_float(1099.50); // NO SUCH METHOD EXISTS!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::GstRate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (paise for INR).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for refunds, corrections
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## Where Money Flows
/// ```text
/// Product.price_paise ──► BillItem.unit_price_paise ──► BillItem.subtotal
///                                      │
///                                      ▼
///                  Bill.total ──► DashboardStats.total_sales
///
/// EVERY monetary value in the system flows through this type
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use cloudledger_core::money::Money;
    ///
    /// let price = Money::from_paise(109900); // Represents ₹1,099
    /// assert_eq!(price.paise(), 109900);
    /// ```
    ///
    /// ## Why Paise?
    /// Using the smallest unit eliminates all floating-point concerns.
    /// Storage, calculations, and the API all use paise.
    /// Only display formatting converts to rupees.
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from whole rupees.
    ///
    /// ## Example
    /// ```rust
    /// use cloudledger_core::money::Money;
    ///
    /// let price = Money::from_rupees(4500); // ₹4,500
    /// assert_eq!(price.paise(), 450000);
    /// ```
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees * 100)
    }

    /// Returns the value in paise (smallest currency unit).
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupee portion.
    ///
    /// ## Example
    /// ```rust
    /// use cloudledger_core::money::Money;
    ///
    /// let price = Money::from_paise(109950);
    /// assert_eq!(price.rupees(), 1099);
    /// ```
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the paise portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Calculates GST for this amount at the given rate.
    ///
    /// ## Implementation
    /// Integer math with explicit rounding: `(amount * bps + 5000) / 10000`.
    /// The +5000 rounds the half-paisa boundary up instead of truncating, so
    /// line-level GST never silently under-collects.
    ///
    /// ## Example
    /// ```rust
    /// use cloudledger_core::money::Money;
    /// use cloudledger_core::types::GstRate;
    ///
    /// let subtotal = Money::from_paise(100000); // ₹1,000
    /// let rate = GstRate::from_bps(1800);       // 18%
    ///
    /// let gst = subtotal.calculate_gst(rate);
    /// // ₹1,000 × 18% = ₹180
    /// assert_eq!(gst.paise(), 18000);
    /// ```
    pub fn calculate_gst(&self, rate: GstRate) -> Money {
        // Use i128 to prevent overflow on large amounts
        // rate.bps() is basis points: 1800 = 18%
        let gst_paise = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_paise(gst_paise as i64)
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use cloudledger_core::money::Money;
    ///
    /// let unit_price = Money::from_paise(29900); // ₹299
    /// let subtotal = unit_price.multiply_quantity(3);
    /// assert_eq!(subtotal.paise(), 89700); // ₹897
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation renders Indian Rupee with en-IN digit grouping.
///
/// The last three digits form one group and every group above that has two
/// digits (lakh/crore style): `450000` paise → `₹4,500`, `10000000` paise →
/// `₹1,00,000`. Paise are omitted when zero, matching how the invoices and
/// the dashboard display amounts.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let grouped = group_inr(self.rupees().unsigned_abs());
        if self.paise_part() == 0 {
            write!(f, "{}₹{}", sign, grouped)
        } else {
            write!(f, "{}₹{}.{:02}", sign, grouped, self.paise_part())
        }
    }
}

/// Groups a whole-rupee amount en-IN style: 1234567 → "12,34,567".
fn group_inr(rupees: u64) -> String {
    let digits = rupees.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i32) -> Self {
        Money(self.0 * qty as i64)
    }
}

/// Multiplication by i64.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_paise() {
        let money = Money::from_paise(109950);
        assert_eq!(money.paise(), 109950);
        assert_eq!(money.rupees(), 1099);
        assert_eq!(money.paise_part(), 50);
    }

    #[test]
    fn test_from_rupees() {
        let money = Money::from_rupees(4500);
        assert_eq!(money.paise(), 450000);
        assert_eq!(money.paise_part(), 0);
    }

    #[test]
    fn test_display_en_in_grouping() {
        assert_eq!(format!("{}", Money::from_rupees(500)), "₹500");
        assert_eq!(format!("{}", Money::from_rupees(4500)), "₹4,500");
        assert_eq!(format!("{}", Money::from_rupees(100000)), "₹1,00,000");
        assert_eq!(format!("{}", Money::from_rupees(1234567)), "₹12,34,567");
        assert_eq!(format!("{}", Money::from_rupees(12345678)), "₹1,23,45,678");
    }

    #[test]
    fn test_display_paise_and_sign() {
        assert_eq!(format!("{}", Money::from_paise(109950)), "₹1,099.50");
        assert_eq!(format!("{}", Money::from_paise(-55000)), "-₹550");
        assert_eq!(format!("{}", Money::from_paise(0)), "₹0");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_paise(1000);
        let b = Money::from_paise(500);

        assert_eq!((a + b).paise(), 1500);
        assert_eq!((a - b).paise(), 500);
        let result: Money = a * 3;
        assert_eq!(result.paise(), 3000);
    }

    #[test]
    fn test_gst_calculation_basic() {
        // ₹1,000 at 18% = ₹180
        let amount = Money::from_paise(100000);
        let rate = GstRate::from_bps(1800);
        let gst = amount.calculate_gst(rate);
        assert_eq!(gst.paise(), 18000);
    }

    #[test]
    fn test_gst_calculation_with_rounding() {
        // ₹9.99 at 12% = ₹1.1988 → 120 paise after rounding
        let amount = Money::from_paise(999);
        let rate = GstRate::from_bps(1200);
        let gst = amount.calculate_gst(rate);
        assert_eq!(gst.paise(), 120);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let positive = Money::from_paise(100);
        assert!(positive.is_positive());

        let negative = Money::from_paise(-100);
        assert!(negative.is_negative());
        assert_eq!(negative.abs().paise(), 100);
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_paise(29900);
        let subtotal = unit_price.multiply_quantity(3);
        assert_eq!(subtotal.paise(), 89700);
    }

    /// Verify that ₹10.00 / 3 × 3 behaves as expected.
    /// This documents the intentional precision loss.
    #[test]
    fn test_division_precision_loss_documented() {
        let ten_rupees = Money::from_paise(1000);
        let one_third = Money::from_paise(1000 / 3); // 333 paise
        let reconstructed: Money = one_third * 3; // 999 paise

        assert_eq!(reconstructed.paise(), 999);
        let lost = ten_rupees - reconstructed;
        assert_eq!(lost.paise(), 1);
    }
}
