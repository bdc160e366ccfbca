//! Payroll input and result models.
//!
//! This module contains the [`PayrollInput`] request type and the
//! [`PayrollResult`] snapshot with its line-item structures: earnings
//! breakdown, deductions breakdown, employer contributions and the
//! remittance schedule.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::Money;

/// A single payroll computation request.
///
/// Constructed per computation, immutable, never persisted by the engine.
///
/// # Example
///
/// ```
/// use taxcore::models::PayrollInput;
/// use taxcore::money::Money;
///
/// let input = PayrollInput {
///     employee_id: "emp_001".to_string(),
///     gross: Money::from_major(500_000),
///     annual_rent: Some(Money::from_major(1_200_000)),
///     jurisdiction: None,
///     period: "2023-04".to_string(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollInput {
    /// The employee this computation is for.
    pub employee_id: String,
    /// Periodic (monthly) gross pay.
    pub gross: Money,
    /// Annual rent paid, if any; feeds the rent relief. Missing rent means
    /// zero relief.
    pub annual_rent: Option<Money>,
    /// Jurisdiction label; when absent the rule set's jurisdiction is the
    /// documented default.
    pub jurisdiction: Option<String>,
    /// Pay period identifier (e.g., "2023-04").
    pub period: String,
}

/// Gross pay split into its salary components.
///
/// The components always sum exactly to gross.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarningsBreakdown {
    /// The periodic gross pay.
    pub gross: Money,
    /// Basic salary component.
    pub basic: Money,
    /// Housing component.
    pub housing: Money,
    /// Transport component.
    pub transport: Money,
    /// Residual component (absorbs the rounding remainder of the split).
    pub other: Money,
}

/// One named deduction or contribution line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionLine {
    /// Short stable code for the obligation (e.g., "pension").
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Periodic amount.
    pub amount: Money,
}

/// All employee-side deductions for the period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionsBreakdown {
    /// Monthly income tax (annual bracket tax divided by twelve).
    pub income_tax: Money,
    /// Statutory deduction lines in rule order.
    pub statutory: Vec<DeductionLine>,
    /// Sum of income tax and all statutory lines.
    pub total: Money,
}

/// All employer-side contributions for the period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerContributions {
    /// Contribution lines in rule order.
    pub lines: Vec<DeductionLine>,
    /// Sum of all contribution lines.
    pub total: Money,
}

/// One entry of the remittance schedule.
///
/// There is one entry per distinct statutory obligation: employee and
/// employer portions of the same obligation are merged into a single entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemittanceEntry {
    /// The obligation name (e.g., "PAYE Income Tax", "Pension").
    pub name: String,
    /// Total periodic amount due (employee plus employer portions).
    pub amount: Money,
    /// The receiving authority, as supplied by configuration.
    pub authority: String,
    /// Human-readable remittance deadline.
    pub deadline: String,
    /// Explanatory note for the entry.
    pub note: String,
}

/// The complete result of a payroll computation.
///
/// A derived, immutable snapshot produced fresh on every call. The
/// `calculation_id` and `computed_at` envelope fields are unique per call;
/// every financial field is a pure function of the input and rule set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollResult {
    /// Unique identifier for this computation.
    pub calculation_id: Uuid,
    /// When the computation was performed.
    pub computed_at: DateTime<Utc>,
    /// The engine version that produced this result.
    pub engine_version: String,
    /// The rule set version the result was computed under.
    pub rule_set_version: String,
    /// The employee the result is for.
    pub employee_id: String,
    /// The pay period identifier.
    pub period: String,
    /// The jurisdiction the computation was performed under (input value or
    /// the rule set's documented default).
    pub jurisdiction: String,
    /// Gross pay split into salary components.
    pub earnings: EarningsBreakdown,
    /// Annual rent relief applied to the taxable base.
    pub annual_relief: Money,
    /// Annual taxable base fed to the bracket calculator (already clamped
    /// at zero).
    pub annual_taxable: Money,
    /// Annual income tax across all brackets.
    pub annual_tax: Money,
    /// Employee-side deductions for the period.
    pub deductions: DeductionsBreakdown,
    /// Net pay: gross minus all employee-side deductions.
    pub net_pay: Money,
    /// Employer-side contributions for the period.
    pub employer: EmployerContributions,
    /// Total employer cost: gross plus employer contributions.
    pub total_employer_cost: Money,
    /// Ordered remittance schedule, income tax first, then statutory
    /// obligations in rule order.
    pub remittance: Vec<RemittanceEntry>,
}
