//! # Money Module
//!
//! Provides the `Money` type for catalog prices and cart totals.
//!
//! ## Store Currency
//! NovaTime prices in Colombian pesos, which are quoted without a minor
//! unit: a watch costs `189900`, never `1899.00`. `Money` therefore wraps
//! a whole-unit `i64` and never touches floating point.
//!
//! Arithmetic saturates at the `i64` bounds, so a totals computation can
//! never panic or wrap.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Where Money is Used                                  │
//! │                                                                         │
//! │  Watch.price ──┬──► CartLineItem.line_total ──► Cart.total_price        │
//! │                │                                                        │
//! │                └──► Displayed as "$189.900" in the catalog              │
//! │                                                                         │
//! │  Watch.original_price ──► savings / discount badge                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use novatime_core::money::Money;
//!
//! let price = Money::from_amount(189_900);
//! let line = price.multiply_quantity(2);
//! assert_eq!(line.amount(), 379_800);
//! assert_eq!(line.to_string(), "$379.800");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole units of the store currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from a whole-unit amount.
    #[inline]
    pub const fn from_amount(amount: i64) -> Self {
        Money(amount)
    }

    /// Returns the whole-unit amount.
    #[inline]
    pub const fn amount(&self) -> i64 {
        self.0
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

    /// Multiplies money by a quantity, saturating on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use novatime_core::money::Money;
    ///
    /// let unit_price = Money::from_amount(199_900);
    /// assert_eq!(unit_price.multiply_quantity(3).amount(), 599_700);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }

    /// Percentage of `self` that `reduced` saves, rounded half up.
    ///
    /// Returns 0 when `self` is not positive or `reduced` is not lower.
    ///
    /// ## Example
    /// ```rust
    /// use novatime_core::money::Money;
    ///
    /// let original = Money::from_amount(249_900);
    /// let price = Money::from_amount(189_900);
    /// assert_eq!(original.percent_saved_by(price), 24);
    /// ```
    pub fn percent_saved_by(&self, reduced: Money) -> u32 {
        if self.0 <= 0 || reduced.0 >= self.0 {
            return 0;
        }

        let saved = self.0 as i128 - reduced.0 as i128;
        // (saved * 100 + original / 2) / original
        ((saved * 100 + self.0 as i128 / 2) / self.0 as i128) as u32
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money the way the storefront prints prices: `$` followed by the
/// amount grouped in thousands with `.` (es-CO style).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let digits = self.0.unsigned_abs().to_string();

        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }

        write!(f, "{}${}", sign, grouped)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

/// Multiplication by a cart quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_amount() {
        let money = Money::from_amount(189_900);
        assert_eq!(money.amount(), 189_900);
        assert!(money.is_positive());
        assert!(!money.is_zero());
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_amount(189_900).to_string(), "$189.900");
        assert_eq!(Money::from_amount(1_459_900).to_string(), "$1.459.900");
        assert_eq!(Money::from_amount(900).to_string(), "$900");
        assert_eq!(Money::from_amount(0).to_string(), "$0");
        assert_eq!(Money::from_amount(-60_000).to_string(), "-$60.000");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_amount(1000);
        let b = Money::from_amount(500);

        assert_eq!((a + b).amount(), 1500);
        assert_eq!((a - b).amount(), 500);
        assert_eq!((a * 3).amount(), 3000);

        let mut c = a;
        c += b;
        assert_eq!(c.amount(), 1500);
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 250, 650]
            .into_iter()
            .map(Money::from_amount)
            .sum();
        assert_eq!(total.amount(), 1000);

        let empty: Money = std::iter::empty().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_arithmetic_saturates() {
        let big = Money::from_amount(i64::MAX / 2 + 1);

        assert_eq!((big + big).amount(), i64::MAX);
        assert_eq!(big.multiply_quantity(u32::MAX).amount(), i64::MAX);
        assert_eq!(
            (Money::from_amount(i64::MIN) - Money::from_amount(1)).amount(),
            i64::MIN
        );

        let total: Money = [big, big, big].into_iter().sum();
        assert_eq!(total.amount(), i64::MAX);

        let mut acc = big;
        acc += big;
        assert_eq!(acc.amount(), i64::MAX);
    }

    #[test]
    fn test_percent_saved_by() {
        let original = Money::from_amount(599_900);
        assert_eq!(original.percent_saved_by(Money::from_amount(459_900)), 23);

        // Not discounted
        assert_eq!(original.percent_saved_by(original), 0);
        assert_eq!(original.percent_saved_by(Money::from_amount(700_000)), 0);

        // No original price recorded
        assert_eq!(Money::zero().percent_saved_by(Money::from_amount(10)), 0);

        // Extreme gap does not overflow
        assert_eq!(
            Money::from_amount(i64::MAX).percent_saved_by(Money::from_amount(i64::MIN)),
            200
        );
    }
}
