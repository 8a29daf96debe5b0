//! Exact money arithmetic in integer cents.
//!
//! Bills must split without rounding leakage, so amounts are held as whole
//! cents and only rendered as decimals at the wire boundary. [`equal_split`]
//! distributes a total over `n` parts such that the parts always sum back to
//! the total, spare cents going to the earliest positions.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;

/// Largest absolute amount accepted from the wire, in whole currency units.
/// Far below the range where `f64` loses integer precision.
const MAX_WIRE_AMOUNT: f64 = 1e12;

/// An exact monetary amount, stored as whole cents.
///
/// Serialized as a JSON number in currency units (`33.34` for 3 334 cents);
/// deserialization rounds to the nearest cent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Self = Self(0);

    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    #[must_use]
    pub const fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::saturating_add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0 as f64 / 100.0)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        if !value.is_finite() || value.abs() > MAX_WIRE_AMOUNT {
            return Err(serde::de::Error::custom(format!("amount out of range: {value}")));
        }
        Ok(Self((value * 100.0).round() as i64))
    }
}

/// Splits `total` into `parts` amounts that sum to `total` exactly.
///
/// Each part receives `total / parts` floored to the cent; the remaining
/// cents are handed out one at a time from the first part onward, so no part
/// differs from another by more than one cent.
///
/// Returns an empty vector when `parts` is zero or `total` is negative; the
/// caller validates both before splitting.
#[must_use]
pub fn equal_split(total: Money, parts: usize) -> Vec<Money> {
    if parts == 0 || total.is_negative() {
        return Vec::new();
    }
    let n = parts as i64;
    let base = total.cents() / n;
    let remainder = total.cents() % n;

    (0..n).map(|i| Money::from_cents(base + i64::from(i < remainder))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_renders_cents() {
        assert_eq!(Money::from_cents(3334).to_string(), "33.34");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(-120).to_string(), "-1.20");
    }

    #[test]
    fn split_matches_worked_example() {
        let shares = equal_split(Money::from_cents(10_000), 3);
        assert_eq!(shares, vec![
            Money::from_cents(3334),
            Money::from_cents(3333),
            Money::from_cents(3333),
        ]);
    }

    #[test]
    fn split_of_zero_is_all_zero() {
        assert!(equal_split(Money::ZERO, 4).iter().all(|m| *m == Money::ZERO));
    }
}
