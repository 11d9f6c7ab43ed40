use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid amount: '{0}'")]
pub struct MoneyError(pub String);

/// Signed amount in the currency of record, kept exact as parsed from the export.
///
/// Only values that still fit a `Decimal` once scaled to two fractional digits
/// are accepted, so every `Money` has a two-digit ledger string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal")]
pub struct Money(Decimal);

impl Money {
    pub fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Strictly below zero. `-0.00` is not negative.
    pub fn is_negative(self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    pub fn magnitude(self) -> Self {
        Money(self.0.abs())
    }

    /// Two fractional digits, banker's rounding (`round_dp` uses
    /// MidpointNearestEven): `2.345` -> `"2.34"`, `2.355` -> `"2.36"`.
    pub fn to_ledger_string(self) -> String {
        let mut rounded = self.0.round_dp(2);
        rounded.rescale(2);
        if rounded.is_zero() {
            rounded.set_sign_positive(true);
        }
        rounded.to_string()
    }
}

impl TryFrom<Decimal> for Money {
    type Error = MoneyError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        // `rescale` stops short of the requested scale when the mantissa would overflow.
        let mut scaled = value.round_dp(2);
        scaled.rescale(2);
        if scaled.scale() != 2 {
            return Err(MoneyError(value.to_string()));
        }
        Ok(Money(value))
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let trimmed = trimmed.strip_prefix('+').unwrap_or(trimmed);
        let value = Decimal::from_str(trimmed).map_err(|_| MoneyError(s.to_string()))?;
        Money::try_from(value).map_err(|_| MoneyError(s.to_string()))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_ledger_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn money(s: &str) -> Money {
        s.parse().unwrap()
    }

    #[test]
    fn pads_to_two_fraction_digits() {
        assert_eq!(money("-123.4").magnitude().to_ledger_string(), "123.40");
        assert_eq!(money("42").to_ledger_string(), "42.00");
        assert_eq!(money("0.5").to_ledger_string(), "0.50");
    }

    #[test]
    fn rounds_half_to_even() {
        assert_eq!(money("2.345").to_ledger_string(), "2.34");
        assert_eq!(money("2.355").to_ledger_string(), "2.36");
        assert_eq!(money("0.125").to_ledger_string(), "0.12");
        assert_eq!(money("0.135").to_ledger_string(), "0.14");
        assert_eq!(money("1.006").to_ledger_string(), "1.01");
    }

    #[test]
    fn sign_is_kept_until_magnitude() {
        let m = money("-10.00");
        assert!(m.is_negative());
        assert_eq!(m.to_ledger_string(), "-10.00");
        assert_eq!(m.magnitude().to_ledger_string(), "10.00");
    }

    #[test]
    fn negative_zero_is_not_negative() {
        let m = money("-0.00");
        assert!(!m.is_negative());
        assert!(m.is_zero());
        assert_eq!(m.to_ledger_string(), "0.00");
    }

    #[test]
    fn parse_accepts_explicit_plus_and_whitespace() {
        assert_eq!(money(" +42.00 "), money("42"));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("abc".parse::<Money>().is_err());
        assert!("".parse::<Money>().is_err());
        assert!("1,50".parse::<Money>().is_err());
    }

    #[test]
    fn rejects_amounts_without_room_for_cents() {
        assert!("-10000000000000000000000000000".parse::<Money>().is_err());
        assert!("1000000000000000000000000000".parse::<Money>().is_err());
        assert_eq!(
            money("100000000000000000000000000").to_ledger_string(),
            "100000000000000000000000000.00"
        );
    }

    #[test]
    fn deserialize_applies_the_same_range_check() {
        let ok: Money = serde_json::from_str("\"12.5\"").unwrap();
        assert_eq!(ok.to_ledger_string(), "12.50");
        assert!(serde_json::from_str::<Money>("\"1000000000000000000000000000\"").is_err());
    }
}
