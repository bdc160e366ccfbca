//! Progressive bracket tax calculation.
//!
//! This module implements the generic progressive-bracket tax engine: for
//! each bracket in ascending order, tax `rate × min(remaining base, bracket
//! width)`, decrement the remaining base by the amount taxed, and stop once
//! it reaches zero. Each per-bracket amount is rounded half-up
//! independently before summation, which reproduces historical figures
//! bit-for-bit.

use rust_decimal::Decimal;

use crate::config::BracketTable;
use crate::money::Money;

/// Tax computed within a single bracket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketTaxLine {
    /// Lower edge of the bracket (inclusive).
    pub min: Money,
    /// Upper edge of the bracket (exclusive), `None` for the final bracket.
    pub max: Option<Money>,
    /// The marginal rate applied within the bracket.
    pub rate: Decimal,
    /// The portion of the taxable base that fell in this bracket.
    pub taxed_amount: Money,
    /// The tax due for this bracket, rounded half-up independently.
    pub tax: Money,
}

/// The result of a progressive bracket tax calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketTaxResult {
    /// The taxable base the calculation ran over (after clamping at zero).
    pub taxable: Money,
    /// Total tax across all brackets.
    pub total: Money,
    /// Per-bracket breakdown for the brackets the base reached.
    pub lines: Vec<BracketTaxLine>,
}

/// Computes progressive bracket tax over a taxable base.
///
/// A zero or negative base yields zero tax; negative bases are clamped, not
/// rejected, because reliefs can legitimately exceed gross income.
///
/// # Arguments
///
/// * `table` - The validated, ascending bracket table
/// * `taxable` - The taxable base (annual, subunits)
///
/// # Example
///
/// ```
/// use taxcore::calculation::calculate_bracket_tax;
/// use taxcore::config::{BracketTable, TaxBracket};
/// use taxcore::money::Money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let table = BracketTable::new(vec![
///     TaxBracket { min: Money::ZERO, max: Some(Money::from_major(800_000)), rate: Decimal::ZERO },
///     TaxBracket { min: Money::from_major(800_000), max: None, rate: Decimal::from_str("0.15").unwrap() },
/// ]).unwrap();
///
/// let result = calculate_bracket_tax(&table, Money::from_major(1_000_000));
/// assert_eq!(result.total, Money::from_major(30_000));
/// ```
pub fn calculate_bracket_tax(table: &BracketTable, taxable: Money) -> BracketTaxResult {
    let taxable = taxable.clamp_non_negative();
    let mut remaining = taxable;
    let mut total = Money::ZERO;
    let mut lines = Vec::new();

    for bracket in table.brackets() {
        if remaining == Money::ZERO {
            break;
        }
        let taxed_amount = match bracket.width() {
            Some(width) => remaining.min(width),
            None => remaining,
        };
        let tax = taxed_amount.mul_rate(bracket.rate);
        total += tax;
        remaining -= taxed_amount;
        lines.push(BracketTaxLine {
            min: bracket.min,
            max: bracket.max,
            rate: bracket.rate,
            taxed_amount,
            tax,
        });
    }

    BracketTaxResult {
        taxable,
        total,
        lines,
    }
}
