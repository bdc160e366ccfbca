//! Rent relief calculation.
//!
//! Relief is the lesser of a configured fraction of annual rent paid and a
//! configured cap. It reduces the annual taxable base before bracket tax is
//! applied.

use crate::config::ReliefRules;
use crate::money::Money;

/// The result of a rent relief calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RentReliefResult {
    /// The annual relief granted.
    pub relief: Money,
    /// Whether the configured cap limited the relief.
    pub cap_applied: bool,
}

/// Calculates annual rent relief.
///
/// The uncapped relief is `annual_rent × rent_fraction`, rounded half-up
/// once; the granted relief is the lesser of that and the configured cap.
/// Missing rent is the caller's concern and arrives here as zero.
///
/// # Example
///
/// ```
/// use taxcore::calculation::calculate_rent_relief;
/// use taxcore::config::ReliefRules;
/// use taxcore::money::Money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rules = ReliefRules {
///     rent_fraction: Decimal::from_str("0.2").unwrap(),
///     rent_cap: Money::from_major(500_000),
/// };
/// // 20% of ₦1,200,000 = ₦240,000, under the cap.
/// let result = calculate_rent_relief(Money::from_major(1_200_000), &rules);
/// assert_eq!(result.relief, Money::from_major(240_000));
/// assert!(!result.cap_applied);
/// ```
pub fn calculate_rent_relief(annual_rent: Money, rules: &ReliefRules) -> RentReliefResult {
    let uncapped = annual_rent.mul_rate(rules.rent_fraction);
    if uncapped > rules.rent_cap {
        RentReliefResult {
            relief: rules.rent_cap,
            cap_applied: true,
        }
    } else {
        RentReliefResult {
            relief: uncapped,
            cap_applied: false,
        }
    }
}
