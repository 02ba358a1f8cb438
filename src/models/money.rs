//! Money type for representing currency amounts
//!
//! Internally stores amounts as integer minor units (cents) so that sums never
//! drift. [`Money::parse`] is the single conversion boundary from an untrusted
//! decimal to cents: it multiplies by 100 using exact base-10 arithmetic and
//! rounds half away from zero. Every value that crosses that boundary, or is
//! produced by arithmetic on untrusted data, must stay within
//! [`MAX_SAFE_CENTS`].

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use crate::error::{FinanceError, FinanceResult};

/// Largest magnitude a cents value may have (2^53 - 1).
///
/// Amounts beyond this cannot be represented exactly by the floating point
/// numbers that display layers and JSON consumers use.
pub const MAX_SAFE_CENTS: i64 = 9_007_199_254_740_991;

/// Check that a raw cents value is within the safe integer range
pub const fn is_safe_cents(cents: i64) -> bool {
    cents >= -MAX_SAFE_CENTS && cents <= MAX_SAFE_CENTS
}

/// A monetary amount stored as cents (hundredths of the major currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents without range checking
    ///
    /// Intended for literals and values that are already known to be safe.
    /// Use [`Money::try_from_cents`] for anything coming from outside.
    ///
    /// # Examples
    /// ```
    /// use finance_core::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// assert_eq!(amount.cents(), 1050);
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from cents, rejecting values outside the safe range
    pub fn try_from_cents(cents: i64) -> FinanceResult<Self> {
        if is_safe_cents(cents) {
            Ok(Self(cents))
        } else {
            Err(FinanceError::out_of_range(cents))
        }
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole major units (truncated toward zero)
    pub const fn major_part(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn minor_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Check if the amount is within the safe integer range
    pub const fn is_safe(&self) -> bool {
        is_safe_cents(self.0)
    }

    /// Get the absolute value, saturating at `i64::MAX`
    pub const fn abs(&self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// Absolute value of a safe amount
    pub fn checked_abs(self) -> FinanceResult<Money> {
        Ok(self.ensure_safe()?.abs())
    }

    /// Return self if it is within the safe range
    pub fn ensure_safe(self) -> FinanceResult<Self> {
        Self::try_from_cents(self.0)
    }

    /// Checked addition, failing when the result leaves the safe range
    pub fn checked_add(self, rhs: Money) -> FinanceResult<Money> {
        self.0
            .checked_add(rhs.0)
            .ok_or_else(|| FinanceError::out_of_range(format!("{} + {}", self.0, rhs.0)))
            .and_then(Self::try_from_cents)
    }

    /// Checked subtraction, failing when the result leaves the safe range
    pub fn checked_sub(self, rhs: Money) -> FinanceResult<Money> {
        self.0
            .checked_sub(rhs.0)
            .ok_or_else(|| FinanceError::out_of_range(format!("{} - {}", self.0, rhs.0)))
            .and_then(Self::try_from_cents)
    }

    /// Checked multiplication by an integer factor
    pub fn checked_mul(self, factor: i64) -> FinanceResult<Money> {
        self.0
            .checked_mul(factor)
            .ok_or_else(|| FinanceError::out_of_range(format!("{} x {}", self.0, factor)))
            .and_then(Self::try_from_cents)
    }

    /// `self * numerator / denominator` in exact decimal arithmetic, rounded
    /// half away from zero to the cent
    pub fn mul_div_half_up(self, numerator: i64, denominator: i64) -> FinanceResult<Money> {
        if denominator == 0 {
            return Err(FinanceError::Validation("division by zero".to_string()));
        }
        let exact = Decimal::from(self.ensure_safe()?.0) * Decimal::from(numerator)
            / Decimal::from(denominator);
        let rounded = exact.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        let cents = rounded
            .to_i64()
            .ok_or_else(|| FinanceError::out_of_range(rounded))?;
        Self::try_from_cents(cents)
    }

    /// Parse a major-unit decimal string into cents
    ///
    /// Accepts plain decimals (`"19.99"`, `"-42.10"`, `"+3"`) and scientific
    /// notation (`"1.5e2"`). The value is multiplied by 100 exactly and
    /// rounded half away from zero, so `"0.005"` is 1 cent and `"0.0049"` is 0.
    /// Digit separators such as `_` or `,` are not part of the grammar.
    ///
    /// # Errors
    ///
    /// - [`FinanceError::InvalidAmount`] for empty, non-numeric, NaN or infinite input
    /// - [`FinanceError::AmountOutOfRange`] when the cents value is not a safe integer
    ///
    /// # Examples
    /// ```
    /// use finance_core::models::Money;
    /// assert_eq!(Money::parse("19.99").unwrap().cents(), 1999);
    /// assert!(Money::parse("abc").is_err());
    /// ```
    pub fn parse(input: &str) -> FinanceResult<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(FinanceError::InvalidAmount("amount is empty".to_string()));
        }

        let unsigned = trimmed.trim_start_matches(['+', '-']).to_ascii_lowercase();
        if matches!(unsigned.as_str(), "nan" | "inf" | "infinity") {
            return Err(FinanceError::InvalidAmount(format!(
                "'{}' is not a finite number",
                trimmed
            )));
        }

        DecimalLiteral::split(trimmed)
            .ok_or_else(|| FinanceError::InvalidAmount(format!("'{}' is not a number", trimmed)))?
            .to_cents(trimmed)
    }

    /// Parse an optional input, treating a missing value as invalid
    pub fn parse_optional(input: Option<&str>) -> FinanceResult<Self> {
        match input {
            Some(s) => Self::parse(s),
            None => Err(FinanceError::InvalidAmount("amount is missing".to_string())),
        }
    }

    /// Convert an exact major-unit decimal to cents with half-up rounding
    pub fn from_decimal(major_units: Decimal) -> FinanceResult<Self> {
        let scaled = major_units
            .checked_mul(Decimal::ONE_HUNDRED)
            .ok_or_else(|| FinanceError::out_of_range(format!("{} x 100", major_units)))?;
        let rounded = scaled.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        let cents = rounded
            .to_i64()
            .ok_or_else(|| FinanceError::out_of_range(rounded))?;
        Self::try_from_cents(cents)
    }

    /// Convert a native float in major units to cents
    ///
    /// The float goes through its shortest round-trip decimal rendering, so
    /// `19.99_f64` becomes exactly 1999 cents rather than 1998.9999...
    pub fn from_major_f64(major_units: f64) -> FinanceResult<Self> {
        if !major_units.is_finite() {
            return Err(FinanceError::InvalidAmount(format!(
                "{} is not a finite number",
                major_units
            )));
        }
        Self::parse(&major_units.to_string())
    }

    /// Exact major-unit value of this amount
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// Convert to major units for display
    ///
    /// The division happens in exact decimal arithmetic; only the final value
    /// is converted to a float. `Money::parse(&m.to_major_units()?.to_string())`
    /// reproduces `m` whenever the amount has at most 15 significant digits,
    /// which is the precision a float guarantees.
    pub fn to_major_units(&self) -> FinanceResult<f64> {
        let safe = self.ensure_safe()?;
        decimal_to_f64(safe.to_decimal())
    }
}

/// Nearest float to an exact decimal, via its base-10 rendering
pub(crate) fn decimal_to_f64(value: Decimal) -> FinanceResult<f64> {
    value
        .to_string()
        .parse::<f64>()
        .map_err(|e| FinanceError::AmountOutOfRange(format!("{}: {}", value, e)))
}

/// Sum a sequence of cent amounts with integer addition
///
/// Every input and every running total must be a safe integer. An empty
/// sequence sums to zero.
///
/// # Examples
/// ```
/// use finance_core::models::{money, Money};
/// let total = money::sum([Money::from_cents(1010), Money::from_cents(2020)]).unwrap();
/// assert_eq!(total.cents(), 3030);
/// ```
pub fn sum<I>(values: I) -> FinanceResult<Money>
where
    I: IntoIterator<Item = Money>,
{
    values.into_iter().try_fold(Money::zero(), |acc, value| {
        value.ensure_safe()?;
        acc.checked_add(value)
    })
}

/// A decimal literal: optional sign, digits with at most one `.`, optional
/// exponent. Nothing else is accepted; `_` and repeated signs are rejected.
struct DecimalLiteral<'a> {
    negative: bool,
    integral: &'a str,
    fraction: &'a str,
    exponent: Option<&'a str>,
}

impl<'a> DecimalLiteral<'a> {
    fn split(s: &'a str) -> Option<Self> {
        let (negative, body) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };
        let (mantissa, exponent) = match body.find(['e', 'E']) {
            Some(idx) => (&body[..idx], Some(&body[idx + 1..])),
            None => (body, None),
        };
        let (integral, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (integral.is_empty() && fraction.is_empty())
            || !all_digits(integral)
            || !all_digits(fraction)
        {
            return None;
        }
        if let Some(exp) = exponent {
            let unsigned = exp.strip_prefix(['+', '-']).unwrap_or(exp);
            if unsigned.is_empty() || !all_digits(unsigned) {
                return None;
            }
        }

        Some(Self {
            negative,
            integral,
            fraction,
            exponent,
        })
    }

    /// Exact value times 100, rounded half away from zero
    fn to_cents(&self, input: &str) -> FinanceResult<Money> {
        let digits = format!("{}{}", self.integral, self.fraction);
        let significant = digits.trim_start_matches('0');
        if significant.is_empty() {
            return Ok(Money::zero());
        }

        let exponent = match self.exponent {
            None => 0,
            Some(exp) => match exp.parse::<i64>() {
                Ok(value) => value,
                // Exponent too large for i64: either vanishingly small or huge
                Err(_) if exp.starts_with('-') => return Ok(Money::zero()),
                Err(_) => return Err(FinanceError::out_of_range(input)),
            },
        };
        // cents = significant x 10^shift
        let shift = exponent
            .saturating_add(2)
            .saturating_sub(self.fraction.len() as i64);

        let magnitude = if shift >= 0 {
            let width = (significant.len() as i64).saturating_add(shift);
            if width > SAFE_CENTS_DIGITS {
                return Err(FinanceError::out_of_range(input));
            }
            let scale = 10_i64.pow(shift as u32);
            parse_digits(significant, input)?
                .checked_mul(scale)
                .ok_or_else(|| FinanceError::out_of_range(input))?
        } else {
            let dropped = shift.unsigned_abs();
            if dropped > significant.len() as u64 {
                return Ok(Money::zero());
            }
            let (kept, rest) = significant.split_at(significant.len() - dropped as usize);
            if kept.len() as i64 > SAFE_CENTS_DIGITS {
                return Err(FinanceError::out_of_range(input));
            }
            let whole = if kept.is_empty() {
                0
            } else {
                parse_digits(kept, input)?
            };
            let round_up = rest.as_bytes().first().is_some_and(|&d| d >= b'5');
            whole + i64::from(round_up)
        };

        let cents = if self.negative { -magnitude } else { magnitude };
        Money::try_from_cents(cents)
    }
}

/// Digits in `MAX_SAFE_CENTS`
const SAFE_CENTS_DIGITS: i64 = 16;

fn parse_digits(digits: &str, input: &str) -> FinanceResult<i64> {
    digits
        .parse::<i64>()
        .map_err(|_| FinanceError::out_of_range(input))
}

impl FromStr for Money {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-${}.{:02}", self.major_part().abs(), self.minor_part())
        } else {
            write!(f, "${}.{:02}", self.major_part(), self.minor_part())
        }
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
        Self(self.0.saturating_neg())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_from_cents() {
        let m = Money::from_cents(1050);
        assert_eq!(m.cents(), 1050);
        assert_eq!(m.major_part(), 10);
        assert_eq!(m.minor_part(), 50);
    }

    #[test]
    fn test_try_from_cents_range() {
        assert!(Money::try_from_cents(MAX_SAFE_CENTS).is_ok());
        assert!(Money::try_from_cents(-MAX_SAFE_CENTS).is_ok());
        assert!(Money::try_from_cents(MAX_SAFE_CENTS + 1)
            .unwrap_err()
            .is_out_of_range());
        assert!(Money::try_from_cents(i64::MIN).unwrap_err().is_out_of_range());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1050)), "$10.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
        assert_eq!(format!("{}", Money::from_cents(-1050)), "-$10.50");
        assert_eq!(format!("{}", Money::from_cents(5)), "$0.05");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((-a).cents(), -1000);
    }

    #[test]
    fn test_checked_arithmetic() {
        let max = Money::from_cents(MAX_SAFE_CENTS);
        assert!(max.checked_add(Money::from_cents(1)).is_err());
        assert!(Money::from_cents(-MAX_SAFE_CENTS)
            .checked_sub(Money::from_cents(1))
            .is_err());
        assert_eq!(
            Money::from_cents(10000).checked_mul(52).unwrap().cents(),
            520000
        );
        assert!(max.checked_mul(2).is_err());
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("19.99").unwrap().cents(), 1999);
        assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
        assert_eq!(Money::parse("10").unwrap().cents(), 1000);
        assert_eq!(Money::parse("  0.05 ").unwrap().cents(), 5);
        assert_eq!(Money::parse("+3").unwrap().cents(), 300);
        assert_eq!(Money::parse("1.5e2").unwrap().cents(), 15000);
    }

    #[test]
    fn test_parse_negative_and_large() {
        assert_eq!(Money::parse("-42.10").unwrap().cents(), -4210);
        let large = Money::parse("987654321.99").unwrap();
        assert_eq!(large.cents(), 98765432199);
        let major = large.to_major_units().unwrap();
        assert_eq!(Money::parse(&major.to_string()).unwrap(), large);
    }

    #[test]
    fn test_parse_half_up_boundary() {
        assert_eq!(Money::parse("0.005").unwrap().cents(), 1);
        assert_eq!(Money::parse("0.0049").unwrap().cents(), 0);
        assert_eq!(Money::parse("-0.005").unwrap().cents(), -1);
        assert_eq!(Money::parse("1.235").unwrap().cents(), 124);
        assert_eq!(Money::parse("1.225").unwrap().cents(), 123);
    }

    #[test]
    fn test_parse_invalid() {
        for input in [
            "abc", "", "   ", "NaN", "nan", "Infinity", "-Infinity", "inf", "12.3.4", "1,000",
            "1_000", "1__0.5_0", "+-5", "--5", "12abc", ".", "-", "e5", "1e", "1e+", "1.5e2.5",
        ] {
            let err = Money::parse(input).unwrap_err();
            assert!(err.is_invalid_amount(), "expected InvalidAmount for {:?}", input);
        }
        assert!(Money::parse_optional(None).unwrap_err().is_invalid_amount());
        assert_eq!(Money::parse_optional(Some("1.00")).unwrap().cents(), 100);
    }

    #[test]
    fn test_parse_out_of_range() {
        // 2^53 cents
        assert!(Money::parse("90071992547409.92").unwrap_err().is_out_of_range());
        assert!(Money::parse("90071992547409.91").is_ok());
        assert!(Money::parse("100000000000000000").unwrap_err().is_out_of_range());
    }

    #[test]
    fn test_parse_scientific() {
        assert_eq!(Money::parse("1.5E+2").unwrap().cents(), 15000);
        assert_eq!(Money::parse("-2.5e-1").unwrap().cents(), -25);
        assert_eq!(Money::parse("5e-3").unwrap().cents(), 1);
        assert_eq!(Money::parse("1e-40").unwrap().cents(), 0);
        assert_eq!(Money::parse("1e-99999999999999999999").unwrap().cents(), 0);
        assert!(Money::parse("1e30").unwrap_err().is_out_of_range());
        assert!(Money::parse("1e99999999999999999999").unwrap_err().is_out_of_range());
        assert_eq!(Money::parse("0e99999999999999999999").unwrap().cents(), 0);
    }

    #[test]
    fn test_from_major_f64() {
        assert_eq!(Money::from_major_f64(19.99).unwrap().cents(), 1999);
        assert_eq!(Money::from_major_f64(0.1 + 0.2).unwrap().cents(), 30);
        assert!(Money::from_major_f64(f64::NAN).unwrap_err().is_invalid_amount());
        assert!(Money::from_major_f64(f64::INFINITY)
            .unwrap_err()
            .is_invalid_amount());
        assert!(Money::from_major_f64(1e17).unwrap_err().is_out_of_range());
    }

    #[test]
    fn test_from_decimal() {
        assert_eq!(Money::from_decimal(dec!(19.99)).unwrap().cents(), 1999);
        assert_eq!(Money::from_decimal(dec!(0.005)).unwrap().cents(), 1);
        assert_eq!(Money::from_decimal(dec!(-0.0049)).unwrap().cents(), 0);
    }

    #[test]
    fn test_to_major_units() {
        assert_eq!(Money::from_cents(3060).to_major_units().unwrap(), 30.6);
        assert_eq!(Money::from_cents(-4210).to_major_units().unwrap(), -42.1);
        assert_eq!(Money::from_cents(1).to_major_units().unwrap(), 0.01);
        assert!(Money::from_cents(MAX_SAFE_CENTS + 1)
            .to_major_units()
            .unwrap_err()
            .is_out_of_range());
        assert_eq!(Money::from_cents(1999).to_decimal(), dec!(19.99));
    }

    #[test]
    fn test_round_trip_through_major_units() {
        for cents in [
            0,
            1,
            -1,
            99,
            1999,
            3060,
            -4210,
            98765432199,
            999_999_999_999_999,
            -123_456_789_012_345,
        ] {
            let major = Money::from_cents(cents).to_major_units().unwrap();
            assert_eq!(Money::parse(&major.to_string()).unwrap().cents(), cents);
        }
    }

    #[test]
    fn test_sum_has_no_drift() {
        let amounts = ["10.10", "20.20", "0.30"].map(|s| Money::parse(s).unwrap());
        let total = sum(amounts).unwrap();
        assert_eq!(total.cents(), 3060);
        assert_eq!(total.to_major_units().unwrap(), 30.6);

        let tenths = sum(std::iter::repeat(Money::parse("0.1").unwrap()).take(1000)).unwrap();
        assert_eq!(tenths, Money::parse("100").unwrap());
    }

    #[test]
    fn test_sum_empty_and_range() {
        assert_eq!(sum(Vec::<Money>::new()).unwrap(), Money::zero());
        assert!(sum([Money::from_cents(MAX_SAFE_CENTS), Money::from_cents(1)])
            .unwrap_err()
            .is_out_of_range());
        assert!(sum([Money::from_cents(MAX_SAFE_CENTS + 5), Money::from_cents(-10)])
            .unwrap_err()
            .is_out_of_range());
    }

    #[test]
    fn test_mul_div_half_up() {
        assert_eq!(Money::from_cents(10000).mul_div_half_up(3, 100).unwrap().cents(), 300);
        assert_eq!(Money::from_cents(150).mul_div_half_up(3, 100).unwrap().cents(), 5);
        assert_eq!(Money::from_cents(-150).mul_div_half_up(3, 100).unwrap().cents(), -5);
        assert_eq!(Money::from_cents(100).mul_div_half_up(1, 3).unwrap().cents(), 33);
        assert!(Money::from_cents(100).mul_div_half_up(1, 0).is_err());
    }

    #[test]
    fn test_comparison() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert!(a > b);
        assert!(b < a);
        assert_eq!(a, Money::from_cents(1000));
    }

    #[test]
    fn test_serialization() {
        let m = Money::from_cents(1050);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "1050");

        let deserialized: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, deserialized);
    }
}
