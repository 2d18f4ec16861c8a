//! Fixed-point money amounts
//!
//! Amounts are stored as integer minor units (cents) so that summing a month
//! of entries is exact.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use thiserror::Error;

const CURRENCY_SYMBOLS: &[char] = &['$', '€', '£', '¥', '₽', '₴'];

/// A monetary amount in cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Largest magnitude a single entry may carry: one billion units
    pub const MAX_ENTRY: Money = Money(100_000_000_000);

    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Whole currency units, e.g. `Money::from_major(2500)` is 2500.00
    pub const fn from_major(units: i64) -> Self {
        Self(units * 100)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whole units, truncated toward zero
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// The cents part, always 0..=99
    pub const fn minor_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Absolute value; entry amounts only ever contribute their magnitude
    pub const fn magnitude(&self) -> Self {
        Self(self.0.saturating_abs())
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// Parse a user-supplied amount
    ///
    /// Accepts an optional leading `-`, an optional currency symbol, thousands
    /// separators and at most two decimal places: `"1,234.5"`, `"$20"`, `"-0.75"`.
    /// Magnitudes above [`Money::MAX_ENTRY`] are rejected.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let invalid = || MoneyParseError::InvalidFormat(s.to_string());

        let trimmed = s.trim();
        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let digits: String = unsigned
            .trim_start_matches(CURRENCY_SYMBOLS)
            .chars()
            .filter(|c| *c != ',')
            .collect();

        let (whole, frac) = digits.split_once('.').unwrap_or((digits.as_str(), ""));
        if whole.is_empty() && frac.is_empty() {
            return Err(invalid());
        }
        if !whole.chars().chain(frac.chars()).all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        if frac.len() > 2 {
            return Err(MoneyParseError::TooPrecise(s.to_string()));
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| MoneyParseError::Overflow(s.to_string()))?
        };
        let frac: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => frac.parse().map_err(|_| invalid())?,
        };

        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac))
            .filter(|c| *c <= Self::MAX_ENTRY.0)
            .ok_or_else(|| MoneyParseError::Overflow(s.to_string()))?;

        Ok(Self(if negative { -cents } else { cents }))
    }

    /// Format with a currency symbol, e.g. `-$12.50`
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}{}{}.{:02}", sign, symbol, self.major().abs(), self.minor_part())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor_part())
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

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyParseError {
    #[error("Invalid money format: {0}")]
    InvalidFormat(String),

    #[error("At most two decimal places are allowed: {0}")]
    TooPrecise(String),

    #[error("Amount out of range: {0}")]
    Overflow(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parts() {
        let m = Money::from_cents(-1050);
        assert_eq!(m.major(), -10);
        assert_eq!(m.minor_part(), 50);
        assert_eq!(m.magnitude(), Money::from_cents(1050));
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(250000).to_string(), "2500.00");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(-5).to_string(), "-0.05");
        assert_eq!(Money::from_cents(-1205).format_with_symbol("$"), "-$12.05");
    }

    #[test]
    fn test_parse_accepted_forms() {
        assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("$10.5").unwrap().cents(), 1050);
        assert_eq!(Money::parse("1,234.56").unwrap().cents(), 123456);
        assert_eq!(Money::parse("-0.75").unwrap().cents(), -75);
        assert_eq!(Money::parse(".5").unwrap().cents(), 50);
        assert_eq!(Money::parse("€20").unwrap().cents(), 2000);
    }

    #[test]
    fn test_parse_rejected_forms() {
        assert!(matches!(Money::parse(""), Err(MoneyParseError::InvalidFormat(_))));
        assert!(matches!(Money::parse("12a"), Err(MoneyParseError::InvalidFormat(_))));
        assert!(matches!(Money::parse("1.2.3"), Err(MoneyParseError::InvalidFormat(_))));
        assert!(matches!(Money::parse("0.125"), Err(MoneyParseError::TooPrecise(_))));
        assert!(matches!(
            Money::parse("99999999999999999999"),
            Err(MoneyParseError::Overflow(_))
        ));
    }

    #[test]
    fn test_parse_caps_at_max_entry() {
        assert_eq!(Money::parse("1,000,000,000").unwrap(), Money::MAX_ENTRY);
        assert!(matches!(
            Money::parse("1000000000.01"),
            Err(MoneyParseError::Overflow(_))
        ));
        assert!(matches!(
            Money::parse("-90000000000000000"),
            Err(MoneyParseError::Overflow(_))
        ));
    }

    #[test]
    fn test_checked_arithmetic() {
        let big = Money::from_cents(i64::MAX);
        assert_eq!(big.checked_add(Money::from_cents(1)), None);
        assert_eq!(Money::from_cents(i64::MIN).checked_sub(Money::from_cents(1)), None);
        assert_eq!(
            Money::from_major(3).checked_sub(Money::from_major(5)),
            Some(Money::from_major(-2))
        );
        assert_eq!(Money::from_cents(i64::MIN).magnitude(), big);
    }

    #[test]
    fn test_repeated_sums_are_exact() {
        // 0.1 added a thousand times drifts in f64; cents do not
        let total: Money = std::iter::repeat(Money::from_cents(10)).take(1000).sum();
        assert_eq!(total, Money::from_major(100));
    }

    #[test]
    fn test_arithmetic() {
        let mut m = Money::from_major(1000);
        m += Money::from_major(2000);
        m -= Money::from_major(500);
        assert_eq!(m, Money::from_major(2500));
        assert_eq!(-m, Money::from_major(-2500));
    }
}
