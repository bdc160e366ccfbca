//! Exact integer money representation.
//!
//! All monetary values in the engine are an exact integer count of the
//! smallest currency subunit (kobo for naira). No amount is ever held as a
//! floating-point value at any stage of computation; rates and percentages
//! are [`Decimal`] and every multiplication or division rounds half-up
//! exactly once, so identical inputs always produce identical subunit
//! results.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use std::str::FromStr;

use crate::error::{EngineError, EngineResult};

/// Number of subunits in one major currency unit (kobo per naira).
pub const SUBUNITS_PER_MAJOR: i64 = 100;

/// An exact monetary amount in integer currency subunits.
///
/// `Money` is a thin newtype over `i64` so arithmetic is exact and
/// serialization is a plain integer. Negative values are representable
/// (refunds, adjustments); operations that require non-negative amounts
/// validate at their own boundary.
///
/// # Example
///
/// ```
/// use taxcore::money::Money;
///
/// let gross = Money::from_major(250_000); // ₦250,000.00
/// let pension = gross.mul_rate("0.08".parse().unwrap());
/// assert_eq!(pension, Money::from_major(20_000));
/// assert_eq!(gross.to_string(), "250000.00");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Money(i64);

impl Money {
    /// Zero amount.
    pub const ZERO: Money = Money(0);

    /// Creates a `Money` value from a count of subunits.
    pub const fn from_subunits(subunits: i64) -> Self {
        Money(subunits)
    }

    /// Creates a `Money` value from whole major units (naira).
    pub const fn from_major(major: i64) -> Self {
        Money(major * SUBUNITS_PER_MAJOR)
    }

    /// Returns the amount as a count of subunits.
    pub const fn subunits(self) -> i64 {
        self.0
    }

    /// Returns the amount as a `Decimal` count of subunits.
    ///
    /// Used internally wherever an exact ratio of two amounts is needed.
    pub fn to_decimal(self) -> Decimal {
        Decimal::from(self.0)
    }

    /// Parses a decimal string in major units into an exact subunit amount.
    ///
    /// The input is multiplied by the subunit factor (100) and rounded
    /// half-up to the nearest integer subunit.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidAmount`] when the input is not numeric
    /// or overflows the subunit range.
    ///
    /// # Example
    ///
    /// ```
    /// use taxcore::money::Money;
    ///
    /// assert_eq!(Money::parse("1234.56").unwrap(), Money::from_subunits(123_456));
    /// assert_eq!(Money::parse("0.005").unwrap(), Money::from_subunits(1));
    /// assert!(Money::parse("12,5").is_err());
    /// ```
    pub fn parse(input: &str) -> EngineResult<Self> {
        let trimmed = input.trim();
        let parsed = Decimal::from_str(trimmed).map_err(|_| EngineError::InvalidAmount {
            value: input.to_string(),
            message: "not a numeric amount".to_string(),
        })?;
        Self::from_decimal_major(parsed).ok_or_else(|| EngineError::InvalidAmount {
            value: input.to_string(),
            message: "amount exceeds the representable range".to_string(),
        })
    }

    /// Parses a decimal string that must not be negative.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidAmount`] when the input is not numeric,
    /// overflows, or is negative.
    pub fn parse_non_negative(input: &str) -> EngineResult<Self> {
        let amount = Self::parse(input)?;
        if amount.is_negative() {
            return Err(EngineError::InvalidAmount {
                value: input.to_string(),
                message: "amount must not be negative".to_string(),
            });
        }
        Ok(amount)
    }

    /// Converts a `Decimal` amount in major units, rounding half-up to the
    /// nearest subunit. Returns `None` on overflow.
    pub fn from_decimal_major(major: Decimal) -> Option<Self> {
        let subunits = (major * Decimal::from(SUBUNITS_PER_MAJOR))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        subunits.to_i64().map(Money)
    }

    /// Converts a `Decimal` count of subunits, rounding half-up to the
    /// nearest integer subunit. Saturates at the numeric range boundary.
    pub fn from_decimal_subunits(subunits: Decimal) -> Self {
        let rounded = subunits.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        Money(rounded.to_i64().unwrap_or(if rounded.is_sign_negative() {
            i64::MIN
        } else {
            i64::MAX
        }))
    }

    /// Multiplies the amount by a rate, rounding half-up once.
    ///
    /// This is the single documented rounding point for every percentage
    /// applied in the engine: the exact product is formed in `Decimal` and
    /// rounded to an integer subunit exactly once.
    ///
    /// # Example
    ///
    /// ```
    /// use taxcore::money::Money;
    /// use rust_decimal::Decimal;
    /// use std::str::FromStr;
    ///
    /// let base = Money::from_subunits(101);
    /// // 101 × 0.5 = 50.5 → 51 (half-up)
    /// assert_eq!(base.mul_rate(Decimal::from_str("0.5").unwrap()), Money::from_subunits(51));
    /// ```
    pub fn mul_rate(self, rate: Decimal) -> Money {
        Self::from_decimal_subunits(self.to_decimal() * rate)
    }

    /// Divides the amount by an integer divisor, rounding half-up once.
    ///
    /// Used for annual-to-monthly conversion, which the engine rounds
    /// independently of every other step.
    pub fn div_round(self, divisor: i64) -> Money {
        debug_assert!(divisor != 0);
        Self::from_decimal_subunits(self.to_decimal() / Decimal::from(divisor))
    }

    /// Returns `true` when the amount is below zero.
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Returns the amount, or zero when the amount is negative.
    ///
    /// Taxable bases are clamped rather than rejected because reliefs can
    /// legitimately exceed gross income.
    pub fn clamp_non_negative(self) -> Money {
        if self.0 < 0 { Money::ZERO } else { self }
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Mul<i64> for Money {
    type Output = Money;

    /// Exact integer scaling (annualization); no rounding involved.
    fn mul(self, rhs: i64) -> Money {
        Money(self.0 * rhs)
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    /// Renders major units with two subunit digits (`"1234.56"`).
    ///
    /// Locale concerns (currency symbol, thousands separators) belong to
    /// the presentation layer, not here.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(
            f,
            "{}{}.{:02}",
            sign,
            abs / SUBUNITS_PER_MAJOR as u64,
            abs % SUBUNITS_PER_MAJOR as u64
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_from_major_scales_by_subunit_factor() {
        assert_eq!(Money::from_major(1).subunits(), 100);
        assert_eq!(Money::from_major(800_000).subunits(), 80_000_000);
    }

    #[test]
    fn test_parse_plain_amount() {
        assert_eq!(Money::parse("1500").unwrap(), Money::from_major(1500));
        assert_eq!(Money::parse("1500.25").unwrap(), Money::from_subunits(150_025));
    }

    #[test]
    fn test_parse_rounds_half_up_to_nearest_subunit() {
        assert_eq!(Money::parse("0.005").unwrap(), Money::from_subunits(1));
        assert_eq!(Money::parse("0.004").unwrap(), Money::from_subunits(0));
        assert_eq!(Money::parse("10.995").unwrap(), Money::from_subunits(1100));
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        let err = Money::parse("twelve").unwrap_err();
        match err {
            EngineError::InvalidAmount { value, .. } => assert_eq!(value, "twelve"),
            other => panic!("Expected InvalidAmount, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_non_negative_rejects_negative() {
        assert!(Money::parse_non_negative("-1.00").is_err());
        assert!(Money::parse_non_negative("0.00").is_ok());
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(Money::parse("  42.50 ").unwrap(), Money::from_subunits(4250));
    }

    #[test]
    fn test_mul_rate_rounds_half_up_once() {
        // 101 × 0.5 = 50.5 → 51
        assert_eq!(Money::from_subunits(101).mul_rate(dec("0.5")), Money::from_subunits(51));
        // 103 × 0.075 = 7.725 → 8
        assert_eq!(Money::from_subunits(103).mul_rate(dec("0.075")), Money::from_subunits(8));
    }

    #[test]
    fn test_mul_rate_zero_rate_yields_zero() {
        assert_eq!(Money::from_major(1_000_000).mul_rate(Decimal::ZERO), Money::ZERO);
    }

    #[test]
    fn test_div_round_half_up() {
        // 125 / 12 = 10.41… → 10; 126 / 12 = 10.5 → 11
        assert_eq!(Money::from_subunits(125).div_round(12), Money::from_subunits(10));
        assert_eq!(Money::from_subunits(126).div_round(12), Money::from_subunits(11));
    }

    #[test]
    fn test_arithmetic_operators() {
        let a = Money::from_subunits(250);
        let b = Money::from_subunits(100);
        assert_eq!(a + b, Money::from_subunits(350));
        assert_eq!(a - b, Money::from_subunits(150));
        assert_eq!(-a, Money::from_subunits(-250));

        let mut c = a;
        c += b;
        assert_eq!(c, Money::from_subunits(350));
        c -= a;
        assert_eq!(c, b);
    }

    #[test]
    fn test_integer_scaling_is_exact() {
        assert_eq!(Money::from_subunits(12_345) * 12, Money::from_subunits(148_140));
    }

    #[test]
    fn test_sum_over_iterator() {
        let total: Money = [10, 20, 30].iter().map(|&s| Money::from_subunits(s)).sum();
        assert_eq!(total, Money::from_subunits(60));
    }

    #[test]
    fn test_clamp_non_negative() {
        assert_eq!(Money::from_subunits(-5).clamp_non_negative(), Money::ZERO);
        assert_eq!(Money::from_subunits(5).clamp_non_negative(), Money::from_subunits(5));
    }

    #[test]
    fn test_display_two_subunit_digits() {
        assert_eq!(Money::from_subunits(123_456).to_string(), "1234.56");
        assert_eq!(Money::from_subunits(5).to_string(), "0.05");
        assert_eq!(Money::from_subunits(-150).to_string(), "-1.50");
        assert_eq!(Money::ZERO.to_string(), "0.00");
    }

    #[test]
    fn test_serde_round_trips_as_integer_subunits() {
        let amount = Money::from_subunits(4321);
        let json = serde_json::to_string(&amount).unwrap();
        assert_eq!(json, "4321");
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back, amount);
    }
}
