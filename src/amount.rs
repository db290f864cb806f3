//! Conversion between decimal strings and integer base units.
//!
//! Balances and thresholds are compared as integers at a fixed scale (number
//! of fractional digits) so no floating point is involved.

use std::cmp::Ordering;
use std::str::FromStr;

use num_bigint::BigUint;
use num_traits::Zero;

use crate::error::KrakenError;

/// Parse a decimal string into base units at `scale`.
///
/// Fractional digits beyond `scale` are dropped, not rounded. A missing
/// integer part counts as `0`.
///
/// ```
/// use kraken_cashout::amount::parse_units;
/// use num_bigint::BigUint;
///
/// assert_eq!(parse_units("366.14886400", 8).unwrap(), BigUint::from(36614886400u64));
/// assert_eq!(parse_units("10.50", 2).unwrap(), BigUint::from(1050u32));
/// ```
pub fn parse_units(value: &str, scale: u32) -> Result<BigUint, KrakenError> {
    let (integer, fraction) = value.split_once('.').unwrap_or((value, ""));
    let integer = if integer.is_empty() { "0" } else { integer };

    let scale = scale as usize;
    let mut digits = String::with_capacity(integer.len() + scale);
    digits.push_str(integer);
    digits.extend(fraction.chars().chain(std::iter::repeat('0')).take(scale));

    BigUint::from_str(&digits)
        .map_err(|e| KrakenError::InvalidAmount(format!("{value:?} at scale {scale}: {e}")))
}

/// Render base units as a decimal string with exactly `scale` fractional
/// digits.
///
/// At scale 0 there is no fractional part and no decimal point: `42`, not
/// `42.`.
///
/// ```
/// use kraken_cashout::amount::format_units;
///
/// assert_eq!(format_units(&36614886400u64.into(), 8), "366.14886400");
/// assert_eq!(format_units(&5u32.into(), 4), "0.0005");
/// assert_eq!(format_units(&42u32.into(), 0), "42");
/// ```
pub fn format_units(units: &BigUint, scale: u32) -> String {
    let scale = scale as usize;
    let digits = format!("{:0>width$}", units.to_string(), width = scale + 1);
    if scale == 0 {
        return digits;
    }
    let (integer, fraction) = digits.split_at(digits.len() - scale);
    format!("{integer}.{fraction}")
}

/// An amount in base units together with its scale.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Amount {
    units: BigUint,
    scale: u32,
}

impl Amount {
    /// Wrap raw base units.
    pub fn from_units(units: impl Into<BigUint>, scale: u32) -> Self {
        Self {
            units: units.into(),
            scale,
        }
    }

    /// Parse a decimal string at `scale`, see [`parse_units`].
    pub fn parse(value: &str, scale: u32) -> Result<Self, KrakenError> {
        Ok(Self {
            units: parse_units(value, scale)?,
            scale,
        })
    }

    /// Zero at the given scale.
    pub fn zero(scale: u32) -> Self {
        Self::from_units(BigUint::zero(), scale)
    }

    pub fn units(&self) -> &BigUint {
        &self.units
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn is_zero(&self) -> bool {
        self.units.is_zero()
    }

    /// Compare two amounts.
    ///
    /// Amounts at different scales are not comparable and yield an error.
    pub fn try_cmp(&self, other: &Self) -> Result<Ordering, KrakenError> {
        if self.scale != other.scale {
            return Err(KrakenError::InvalidAmount(format!(
                "cannot compare scale {} with scale {}",
                self.scale, other.scale
            )));
        }
        Ok(self.units.cmp(&other.units))
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format_units(&self.units, self.scale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(value: u64) -> BigUint {
        BigUint::from(value)
    }

    #[test]
    fn test_parse_known_values() {
        assert_eq!(parse_units("366.14886400", 8).unwrap(), units(36614886400));
        assert_eq!(parse_units("0.00000000", 8).unwrap(), units(0));
        assert_eq!(parse_units("10.50", 2).unwrap(), units(1050));
    }

    #[test]
    fn test_parse_pads_short_fraction() {
        assert_eq!(parse_units("10", 4).unwrap(), units(100000));
        assert_eq!(parse_units("50.5", 4).unwrap(), units(505000));
    }

    #[test]
    fn test_parse_truncates_long_fraction() {
        assert_eq!(parse_units("1.23456789", 4).unwrap(), units(12345));
        assert_eq!(parse_units("0.99999", 2).unwrap(), units(99));
    }

    #[test]
    fn test_parse_missing_integer_part() {
        assert_eq!(parse_units(".5", 2).unwrap(), units(50));
        assert_eq!(parse_units("", 2).unwrap(), units(0));
    }

    #[test]
    fn test_parse_beyond_u64() {
        let parsed = parse_units("123456789012345.12345678", 8).unwrap();
        assert_eq!(parsed.to_string(), "12345678901234512345678");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            parse_units("12a.00", 2),
            Err(KrakenError::InvalidAmount(_))
        ));
        assert!(parse_units("1.2.3", 4).is_err());
        assert!(parse_units("-1.00", 2).is_err());
    }

    #[test]
    fn test_format_known_values() {
        assert_eq!(format_units(&units(36614886400), 8), "366.14886400");
        assert_eq!(format_units(&units(1050), 2), "10.50");
        assert_eq!(format_units(&units(0), 8), "0.00000000");
        assert_eq!(format_units(&units(500000), 4), "50.0000");
    }

    #[test]
    fn test_format_scale_zero() {
        assert_eq!(format_units(&units(42), 0), "42");
        assert_eq!(format_units(&units(0), 0), "0");
    }

    #[test]
    fn test_round_trip() {
        let values = [0, 1, 9, 10, 99, 1050, 36614886400, u64::MAX];
        for scale in 0..=12 {
            for value in values {
                let formatted = format_units(&units(value), scale);
                assert_eq!(parse_units(&formatted, scale).unwrap(), units(value));
            }
        }
    }

    #[test]
    fn test_amount_comparison_same_scale() {
        let balance = Amount::parse("50.0000", 4).unwrap();
        let threshold = Amount::parse("10", 4).unwrap();
        assert_eq!(balance.try_cmp(&threshold).unwrap(), Ordering::Greater);
        assert_eq!(threshold.try_cmp(&threshold).unwrap(), Ordering::Equal);
        assert_eq!(balance.to_string(), "50.0000");
    }

    #[test]
    fn test_amount_comparison_scale_mismatch() {
        let a = Amount::parse("1", 4).unwrap();
        let b = Amount::parse("1", 8).unwrap();
        assert!(matches!(a.try_cmp(&b), Err(KrakenError::InvalidAmount(_))));
    }

    #[test]
    fn test_amount_zero() {
        assert!(Amount::zero(8).is_zero());
        assert!(Amount::parse("0.00000000", 8).unwrap().is_zero());
        assert!(!Amount::from_units(1u32, 8).is_zero());
    }
}
