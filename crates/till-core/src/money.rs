//! # Money Module
//!
//! Provides the `Money` type for prices, line totals and invoice totals.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Float cart math:                                                       │
//! │    4.25 × 3 + 22.9 = 35.650000000000006   ❌                            │
//! │                                                                         │
//! │  Integer cents:                                                         │
//! │    425 × 3 + 2290 = 3565                  ✅ $35.65                     │
//! │                                                                         │
//! │  Tax is the only place a fraction of a cent appears, and it is         │
//! │  rounded once, on the subtotal.                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use till_core::money::Money;
//!
//! let price: Money = "7.50".parse().unwrap();
//! assert_eq!(price.cents(), 750);
//! assert_eq!((price * 2).to_string(), "$15.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents.
///
/// ## Where Money Flows
/// ```text
/// Product.unit_price ──► CartLineView.line_total ──► Totals.subtotal
///                                                        │
///                                      calculate_tax ◄───┘
///                                            │
///                                            ▼
///                              Totals.tax ──► Totals.total ──► InvoiceSnapshot
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole units and cents.
    ///
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(22, 90).cents(), 2290);
    /// ```
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-unit portion (truncated toward zero).
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion, always 0-99.
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Calculates tax on this amount, rounded half-up to the cent.
    ///
    /// ## Implementation
    /// `(amount × bps + 5000) / 10000` in i128. A result beyond `i64`
    /// (only possible with a rate above 100%) saturates.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    /// use till_core::types::TaxRate;
    ///
    /// // $15.00 at 13% = $1.95
    /// let tax = Money::from_cents(1500).calculate_tax(TaxRate::from_bps(1300));
    /// assert_eq!(tax.cents(), 195);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        let tax_cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        let tax_cents = i64::try_from(tax_cents)
            .unwrap_or(if tax_cents < 0 { i64::MIN } else { i64::MAX });
        Money::from_cents(tax_cents)
    }

    /// Multiplies a unit price by a quantity.
    ///
    /// Callers must keep `price × qty` within `i64`; validated catalogs do.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// `multiply_quantity`, or `None` on overflow.
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Addition, or `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses a decimal amount such as `"7.50"`, `"7.5"`, `"22"` or `"-1.25"`.
///
/// At most two fractional digits are accepted; anything finer than a cent
/// is rejected rather than rounded.
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: reason.to_string(),
        };

        let s = s.trim();
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let (whole, frac) = match digits.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (digits, ""),
        };

        if whole.is_empty() || !whole.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("expected a decimal amount like 7.50"));
        }
        if frac.len() > 2 || !frac.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("at most two decimal places"));
        }

        let major: i64 = whole
            .parse()
            .map_err(|_| invalid("amount is too large"))?;
        let minor: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| invalid("bad cents"))? * 10,
            _ => frac.parse().map_err(|_| invalid("bad cents"))?,
        };

        let cents = major
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor))
            .ok_or_else(|| invalid("amount is too large"))?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain `$12.34` rendering. The terminal app formats with its configured
/// currency symbol instead.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
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
    fn test_checked_arithmetic() {
        let price = Money::from_cents(100);
        assert_eq!(price.checked_multiply_quantity(3), Some(Money::from_cents(300)));
        assert_eq!(price.checked_multiply_quantity(i64::MAX), None);

        assert_eq!(price.checked_add(price), Some(Money::from_cents(200)));
        assert_eq!(Money::from_cents(i64::MAX).checked_add(price), None);
    }

    #[test]
    fn test_tax_saturates_instead_of_wrapping() {
        let tax = Money::from_cents(i64::MAX).calculate_tax(TaxRate::from_bps(20000));
        assert_eq!(tax.cents(), i64::MAX);
    }

    #[test]
    fn test_parts() {
        let money = Money::from_cents(2290);
        assert_eq!(money.dollars(), 22);
        assert_eq!(money.cents_part(), 90);
        assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(750).to_string(), "$7.50");
        assert_eq!(Money::from_cents(0).to_string(), "$0.00");
        assert_eq!(Money::from_cents(-105).to_string(), "-$1.05");
    }

    #[test]
    fn test_parse_decimal_amounts() {
        assert_eq!("7.50".parse::<Money>().unwrap().cents(), 750);
        assert_eq!("7.5".parse::<Money>().unwrap().cents(), 750);
        assert_eq!("22".parse::<Money>().unwrap().cents(), 2200);
        assert_eq!(" 4.25 ".parse::<Money>().unwrap().cents(), 425);
        assert_eq!("-1.25".parse::<Money>().unwrap().cents(), -125);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<Money>().is_err());
        assert!("abc".parse::<Money>().is_err());
        assert!(".50".parse::<Money>().is_err());
        assert!("7.505".parse::<Money>().is_err());
        assert!("7,50".parse::<Money>().is_err());
        assert!("99999999999999999999".parse::<Money>().is_err());
    }

    #[test]
    fn test_tax_rounding() {
        let rate = TaxRate::from_bps(1300);
        assert_eq!(Money::from_cents(1500).calculate_tax(rate).cents(), 195);
        // $4.25 × 13% = $0.5525 → $0.55
        assert_eq!(Money::from_cents(425).calculate_tax(rate).cents(), 55);
        // $0.50 × 13% = $0.065 → $0.07 (half rounds up)
        assert_eq!(Money::from_cents(50).calculate_tax(rate).cents(), 7);
        assert!(Money::zero().calculate_tax(rate).is_zero());
    }

    #[test]
    fn test_sum_of_line_totals() {
        let lines = [Money::from_cents(425) * 3, Money::from_cents(2290)];
        let subtotal: Money = lines.into_iter().sum();
        assert_eq!(subtotal.cents(), 3565);
    }
}
