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
//! │  Computing change as received - total in floats drifts on display.     │
//! │                                                                         │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Centavos                                         │
//! │    R$23.25 = 2325 centavos, change = 3000 - 2325 = 675 exactly          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Wire Boundary
//! The backend speaks two-decimal strings (`"23.25"`), so `Money` knows how
//! to parse and format that shape. Everything between the two wire edges is
//! integer arithmetic.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (centavos).
///
/// ## Design Decisions
/// - **i64 (signed)**: allows negative values for refunds and corrections
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Derives**: full serde support for JSON serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from centavos (the smallest currency unit).
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in centavos.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (reais) portion.
    #[inline]
    pub const fn reais(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (centavos) portion, always 0-99.
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero money value.
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

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use mercato_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(1000); // R$10.00
    /// assert_eq!(unit_price.multiply_quantity(2).cents(), 2000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Calculates tax on this amount, rounding half up.
    ///
    /// Integer math: `(amount * bps + 5000) / 10000`. The `+5000` provides
    /// the rounding (5000/10000 = 0.5). `i128` intermediate prevents
    /// overflow on large amounts.
    ///
    /// ## Example
    /// ```rust
    /// use mercato_core::money::Money;
    /// use mercato_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_cents(2500); // R$25.00
    /// let rate = TaxRate::from_bps(825);      // 8.25%
    /// // R$25.00 × 8.25% = R$2.0625 → rounds to R$2.06
    /// assert_eq!(subtotal.calculate_tax(rate).cents(), 206);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        let tax_cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(tax_cents as i64)
    }

    /// Parses a two-decimal currency string as sent by the backend.
    ///
    /// Accepts `"10"`, `"10.5"`, `"10.50"`, and a leading minus sign.
    /// Anything else (empty, extra dots, >2 decimals, non-digits) is an
    /// error - malformed prices must surface, not silently become zero.
    ///
    /// ## Example
    /// ```rust
    /// use mercato_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("23.25").unwrap().cents(), 2325);
    /// assert_eq!(Money::parse_decimal("5").unwrap().cents(), 500);
    /// assert!(Money::parse_decimal("1.2.3").is_err());
    /// ```
    pub fn parse_decimal(value: &str) -> Result<Self, CoreError> {
        let s = value.trim();
        let invalid = || CoreError::InvalidAmount {
            value: value.to_string(),
        };

        let (negative, s) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let (major_str, minor_str) = match s.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (s, ""),
        };

        if major_str.is_empty() || minor_str.len() > 2 {
            return Err(invalid());
        }
        if !major_str.chars().all(|c| c.is_ascii_digit())
            || !minor_str.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        let major: i64 = major_str.parse().map_err(|_| invalid())?;
        // "10.5" means 50 centavos, not 5
        let minor: i64 = match minor_str.len() {
            0 => 0,
            1 => minor_str.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => minor_str.parse().map_err(|_| invalid())?,
        };

        let cents = major * 100 + minor;
        Ok(Money(if negative { -cents } else { cents }))
    }

    /// Formats the value as a two-decimal string for the wire (`"23.25"`).
    ///
    /// This is the exact shape the payment endpoint expects in its `amount`
    /// field.
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.reais().abs(), self.cents_part())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money in a human-readable format (`R$23.25`).
///
/// For debugging and log output; any real UI formats on its own terms.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}R${}.{:02}", sign, self.reais().abs(), self.cents_part())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
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

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

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
    fn test_from_cents() {
        let money = Money::from_cents(2325);
        assert_eq!(money.cents(), 2325);
        assert_eq!(money.reais(), 23);
        assert_eq!(money.cents_part(), 25);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(2325)), "R$23.25");
        assert_eq!(format!("{}", Money::from_cents(500)), "R$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-R$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "R$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(3000);
        let b = Money::from_cents(2325);

        assert_eq!((a + b).cents(), 5325);
        assert_eq!((a - b).cents(), 675); // total 23.25, received 30.00
        assert_eq!((b * 2).cents(), 4650);
    }

    #[test]
    fn test_parse_decimal_full() {
        assert_eq!(Money::parse_decimal("23.25").unwrap().cents(), 2325);
        assert_eq!(Money::parse_decimal("0.99").unwrap().cents(), 99);
        assert_eq!(Money::parse_decimal("10.00").unwrap().cents(), 1000);
    }

    #[test]
    fn test_parse_decimal_short_forms() {
        assert_eq!(Money::parse_decimal("10").unwrap().cents(), 1000);
        assert_eq!(Money::parse_decimal("10.5").unwrap().cents(), 1050);
        assert_eq!(Money::parse_decimal(" 7.25 ").unwrap().cents(), 725);
    }

    #[test]
    fn test_parse_decimal_negative() {
        assert_eq!(Money::parse_decimal("-5.50").unwrap().cents(), -550);
    }

    #[test]
    fn test_parse_decimal_rejects_garbage() {
        assert!(Money::parse_decimal("").is_err());
        assert!(Money::parse_decimal("abc").is_err());
        assert!(Money::parse_decimal("1.2.3").is_err());
        assert!(Money::parse_decimal("1.234").is_err());
        assert!(Money::parse_decimal(".50").is_err());
        assert!(Money::parse_decimal("10,50").is_err());
    }

    #[test]
    fn test_decimal_string_round_trip() {
        assert_eq!(Money::from_cents(2325).to_decimal_string(), "23.25");
        assert_eq!(Money::from_cents(500).to_decimal_string(), "5.00");
        assert_eq!(Money::from_cents(-550).to_decimal_string(), "-5.50");
    }

    #[test]
    fn test_tax_calculation_with_rounding() {
        // R$25.00 at 8.25% = R$2.0625 → R$2.06
        let amount = Money::from_cents(2500);
        let rate = TaxRate::from_bps(825);
        assert_eq!(amount.calculate_tax(rate).cents(), 206);

        // R$10.00 at 8.25% = R$0.825 → R$0.83 (half rounds up)
        assert_eq!(Money::from_cents(1000).calculate_tax(rate).cents(), 83);
    }

    #[test]
    fn test_zero_tax_rate() {
        let amount = Money::from_cents(2500);
        assert!(amount.calculate_tax(TaxRate::zero()).is_zero());
    }
}
