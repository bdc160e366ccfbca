//! Salary structure derivation.
//!
//! This module splits gross pay into its configured components
//! (basic/housing/transport/other) by fixed percentages.

use rust_decimal::Decimal;

use crate::config::SalarySplit;
use crate::models::EarningsBreakdown;
use crate::money::Money;

/// Splits gross pay into salary components by the configured percentages.
///
/// Basic, housing and transport are each rounded half-up once; the residual
/// against gross is folded into the `other` component, so the four
/// components always sum exactly to gross.
///
/// # Example
///
/// ```
/// use taxcore::calculation::split_gross;
/// use taxcore::config::SalarySplit;
/// use taxcore::money::Money;
/// use rust_decimal::Decimal;
///
/// let split = SalarySplit {
///     basic_percent: Decimal::from(50),
///     housing_percent: Decimal::from(25),
///     transport_percent: Decimal::from(15),
///     other_percent: Decimal::from(10),
/// };
/// let earnings = split_gross(Money::from_major(200_000), &split);
/// assert_eq!(earnings.basic, Money::from_major(100_000));
/// assert_eq!(earnings.basic + earnings.housing + earnings.transport + earnings.other, earnings.gross);
/// ```
pub fn split_gross(gross: Money, split: &SalarySplit) -> EarningsBreakdown {
    let hundred = Decimal::from(100);
    let basic = gross.mul_rate(split.basic_percent / hundred);
    let housing = gross.mul_rate(split.housing_percent / hundred);
    let transport = gross.mul_rate(split.transport_percent / hundred);
    // The residual keeps the components summing exactly to gross.
    let other = gross - basic - housing - transport;

    EarningsBreakdown {
        gross,
        basic,
        housing,
        transport,
        other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fifty_twenty_five_fifteen_ten() -> SalarySplit {
        SalarySplit {
            basic_percent: Decimal::from(50),
            housing_percent: Decimal::from(25),
            transport_percent: Decimal::from(15),
            other_percent: Decimal::from(10),
        }
    }

    #[test]
    fn test_even_split() {
        let earnings = split_gross(Money::from_major(100_000), &fifty_twenty_five_fifteen_ten());
        assert_eq!(earnings.basic, Money::from_major(50_000));
        assert_eq!(earnings.housing, Money::from_major(25_000));
        assert_eq!(earnings.transport, Money::from_major(15_000));
        assert_eq!(earnings.other, Money::from_major(10_000));
    }

    #[test]
    fn test_components_always_sum_to_gross() {
        let split = fifty_twenty_five_fifteen_ten();
        for subunits in [1, 3, 7, 101, 1_003, 99_999_999] {
            let gross = Money::from_subunits(subunits);
            let earnings = split_gross(gross, &split);
            assert_eq!(
                earnings.basic + earnings.housing + earnings.transport + earnings.other,
                gross,
                "split does not reconcile for {subunits} subunits"
            );
        }
    }

    #[test]
    fn test_indivisible_gross_folds_remainder_into_other() {
        // 101 subunits: basic 50.5 → 51, housing 25.25 → 25, transport 15.15 → 15.
        let earnings = split_gross(Money::from_subunits(101), &fifty_twenty_five_fifteen_ten());
        assert_eq!(earnings.basic, Money::from_subunits(51));
        assert_eq!(earnings.housing, Money::from_subunits(25));
        assert_eq!(earnings.transport, Money::from_subunits(15));
        assert_eq!(earnings.other, Money::from_subunits(10));
    }

    #[test]
    fn test_zero_gross() {
        let earnings = split_gross(Money::ZERO, &fifty_twenty_five_fifteen_ten());
        assert_eq!(earnings.gross, Money::ZERO);
        assert_eq!(earnings.basic, Money::ZERO);
        assert_eq!(earnings.other, Money::ZERO);
    }
}
