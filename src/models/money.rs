//! Currency amounts in whole cents
//!
//! Costs, prices, order totals and profits are all kept as integer cents, so
//! `5 x (19.99 - 10.99)` is exactly `45.00` and never `44.999999`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub};

use crate::error::StorekeepError;

/// A signed amount of cents
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// ```
    /// use storekeep::models::Money;
    /// assert_eq!(Money::from_cents(1999).to_string(), "$19.99");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiply a unit amount by a quantity
    pub const fn times(&self, quantity: u32) -> Self {
        Self(self.0 * quantity as i64)
    }

    /// Amount as a floating-point number of currency units
    pub fn as_units(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Divide evenly across `count`, rounded to the nearest cent (zero when count is 0)
    pub fn average(&self, count: usize) -> Self {
        if count == 0 {
            return Self::zero();
        }
        Self((self.0 as f64 / count as f64).round() as i64)
    }

    /// `self` as a percentage of `whole` (zero when `whole` is zero)
    pub fn percent_of(&self, whole: Money) -> f64 {
        if whole.is_zero() {
            0.0
        } else {
            self.0 as f64 / whole.0 as f64 * 100.0
        }
    }

    /// Parse an amount typed by the user
    ///
    /// Accepts an optional leading `-`, an optional `$`, whole units and at
    /// most two fractional digits: `19.99`, `$5`, `-0.5`, `3.`.
    pub fn parse(input: &str) -> Result<Self, StorekeepError> {
        let invalid = || StorekeepError::Validation(format!("Invalid amount '{}'", input));
        let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());

        let text = input.trim();
        let (negative, text) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        let text = text.strip_prefix('$').unwrap_or(text);

        let (units, fraction) = text.split_once('.').unwrap_or((text, ""));
        if units.is_empty() || !is_digits(units) || !is_digits(fraction) || fraction.len() > 2 {
            return Err(invalid());
        }

        let units: i64 = units.parse().map_err(|_| invalid())?;
        let fraction: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse().map_err(|_| invalid())?,
        };

        let cents = units
            .checked_mul(100)
            .and_then(|c| c.checked_add(fraction))
            .ok_or_else(invalid)?;
        Ok(Self(if negative { -cents } else { cents }))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        let cents = self.0.unsigned_abs();
        write!(f, "{}${}.{:02}", sign, cents / 100, cents % 100)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1050).to_string(), "$10.50");
        assert_eq!(Money::zero().to_string(), "$0.00");
        assert_eq!(Money::from_cents(-1050).to_string(), "-$10.50");
        assert_eq!(Money::from_cents(-5).to_string(), "-$0.05");
        assert_eq!(Money::from_cents(i64::MIN).to_string(), "-$92233720368547758.08");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert!((b - a).is_negative());
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("$10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("-10.50").unwrap().cents(), -1050);
        assert_eq!(Money::parse("-$0.5").unwrap().cents(), -50);
        assert_eq!(Money::parse(" 10 ").unwrap().cents(), 1000);
        assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
        assert_eq!(Money::parse("3.").unwrap().cents(), 300);
        assert_eq!(Money::parse("0.05").unwrap().cents(), 5);
    }

    #[test]
    fn test_parse_rejects_non_ascii_fraction() {
        let err = Money::parse("1.5é").unwrap_err();
        assert!(err.is_validation());
        assert!(Money::parse("1.é").is_err());
        assert!(Money::parse("١.50").is_err());
    }

    #[test]
    fn test_parse_rejects_malformed_amounts() {
        for input in ["--5", "-$-5", "1.-5", "1.+5", "+5", "1.999", "1.2.3", "", "$", ".5", "abc"] {
            assert!(
                Money::parse(input).unwrap_err().is_validation(),
                "accepted '{}'",
                input
            );
        }
    }

    #[test]
    fn test_parse_rejects_overflow() {
        assert!(Money::parse("92233720368547758.08").is_err());
        assert!(Money::parse("99999999999999999999").is_err());
    }

    #[test]
    fn test_times() {
        let price = Money::parse("19.99").unwrap();
        assert_eq!(price.times(5).cents(), 9995);
        assert_eq!(price.times(0), Money::zero());
    }

    #[test]
    fn test_average_and_percent() {
        assert_eq!(Money::from_cents(25000).average(2).cents(), 12500);
        assert_eq!(Money::from_cents(100).average(3).cents(), 33);
        assert_eq!(Money::from_cents(500).average(0), Money::zero());

        assert_eq!(Money::from_cents(50).percent_of(Money::from_cents(100)), 50.0);
        assert_eq!(Money::from_cents(50).percent_of(Money::zero()), 0.0);
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 200, 300].into_iter().map(Money::from_cents).sum();
        assert_eq!(total.cents(), 600);
    }

    #[test]
    fn test_serialized_as_cents() {
        let m = Money::from_cents(1050);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "1050");
        assert_eq!(serde_json::from_str::<Money>(&json).unwrap(), m);
    }
}
