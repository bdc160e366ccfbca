//! Statutory deduction and contribution lines.
//!
//! Each configured statutory obligation (pension, housing fund, health
//! insurance, ...) yields one line carrying the employee-side deduction and
//! the employer-side contribution, both computed as a configured percentage
//! of gross or of the basic-salary component.

use rust_decimal::Decimal;

use crate::config::{DeductionBase, StatutoryDeductionRule};
use crate::models::EarningsBreakdown;
use crate::money::Money;

/// One computed statutory obligation line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatutoryLine {
    /// Short stable code for the obligation.
    pub code: String,
    /// Human-readable obligation name.
    pub name: String,
    /// Employee-side periodic deduction.
    pub employee_amount: Money,
    /// Employer-side periodic contribution.
    pub employer_amount: Money,
    /// The receiving authority.
    pub authority: String,
    /// Human-readable remittance deadline.
    pub deadline: String,
    /// Explanatory note for the remittance schedule.
    pub note: String,
}

impl StatutoryLine {
    /// Total obligation for the period: employee plus employer portions.
    pub fn total(&self) -> Money {
        self.employee_amount + self.employer_amount
    }
}

/// Computes all statutory obligation lines in rule order.
///
/// Each percentage is applied to its configured base with a single half-up
/// rounding per amount.
pub fn calculate_statutory_lines(
    earnings: &EarningsBreakdown,
    rules: &[StatutoryDeductionRule],
) -> Vec<StatutoryLine> {
    let hundred = Decimal::from(100);
    rules
        .iter()
        .map(|rule| {
            let base = match rule.base {
                DeductionBase::Gross => earnings.gross,
                DeductionBase::Basic => earnings.basic,
            };
            StatutoryLine {
                code: rule.code.clone(),
                name: rule.name.clone(),
                employee_amount: base.mul_rate(rule.employee_percent / hundred),
                employer_amount: base.mul_rate(rule.employer_percent / hundred),
                authority: rule.authority.clone(),
                deadline: rule.deadline.clone(),
                note: rule.note.clone(),
            }
        })
        .collect()
}
