//! Full payroll computation.
//!
//! This module orchestrates the payslip derivation: salary split, rent
//! relief, statutory deductions, annual bracket tax, net pay, employer cost
//! and the merged remittance schedule.

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::calculation::bracket::calculate_bracket_tax;
use crate::calculation::relief::calculate_rent_relief;
use crate::calculation::salary_split::split_gross;
use crate::calculation::statutory::calculate_statutory_lines;
use crate::config::RuleSet;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    DeductionLine, DeductionsBreakdown, EmployerContributions, PayrollInput, PayrollResult,
    RemittanceEntry,
};
use crate::money::Money;

/// Annualization factor between the monthly pay period and the annual
/// bracket table.
const MONTHS_PER_YEAR: i64 = 12;

/// Computes a full payslip and remittance schedule for one payroll input.
///
/// The derivation, in order:
/// 1. gross is split into salary components by the configured percentages;
/// 2. rent relief is the lesser of `annual_rent × fraction` and the cap
///    (missing rent means zero relief);
/// 3. statutory deductions are configured percentages of gross or basic;
/// 4. the annual taxable base is annualized gross minus relief minus the
///    annualized employee statutory deductions, clamped at zero;
/// 5. annual bracket tax is divided by twelve, rounded independently;
/// 6. net pay is gross minus all employee-side deductions; employer cost is
///    gross plus the employer contributions;
/// 7. the remittance schedule lists income tax first, then one merged entry
///    per statutory obligation, in rule order.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] when gross or the supplied rent is
/// negative. A missing jurisdiction defaults to the rule set's
/// jurisdiction; this is the only defaulted field besides rent.
///
/// # Example
///
/// ```no_run
/// use taxcore::calculation::compute_payroll;
/// use taxcore::config::ConfigLoader;
/// use taxcore::models::PayrollInput;
/// use taxcore::money::Money;
///
/// let loader = ConfigLoader::load("./config/ng-paye-2023").unwrap();
/// let input = PayrollInput {
///     employee_id: "emp_001".to_string(),
///     gross: Money::from_major(500_000),
///     annual_rent: Some(Money::from_major(1_200_000)),
///     jurisdiction: None,
///     period: "2023-04".to_string(),
/// };
/// let result = compute_payroll(&input, loader.rules()).unwrap();
/// assert_eq!(result.net_pay + result.deductions.total, result.earnings.gross);
/// ```
pub fn compute_payroll(input: &PayrollInput, rules: &RuleSet) -> EngineResult<PayrollResult> {
    if input.gross.is_negative() {
        return Err(EngineError::InvalidInput {
            field: "gross".to_string(),
            message: "gross pay cannot be negative".to_string(),
        });
    }
    if input.annual_rent.is_some_and(Money::is_negative) {
        return Err(EngineError::InvalidInput {
            field: "annual_rent".to_string(),
            message: "annual rent cannot be negative".to_string(),
        });
    }

    debug!(
        employee_id = %input.employee_id,
        period = %input.period,
        gross = %input.gross,
        "computing payroll"
    );

    let payroll_rules = rules.payroll();
    let earnings = split_gross(input.gross, &payroll_rules.salary_split);

    let relief = calculate_rent_relief(
        input.annual_rent.unwrap_or(Money::ZERO),
        &payroll_rules.relief,
    );

    let statutory_lines = calculate_statutory_lines(&earnings, &payroll_rules.statutory);

    let annual_gross = input.gross * MONTHS_PER_YEAR;
    let annual_statutory: Money = statutory_lines
        .iter()
        .map(|line| line.employee_amount * MONTHS_PER_YEAR)
        .sum();
    let annual_taxable = (annual_gross - relief.relief - annual_statutory).clamp_non_negative();

    let tax = calculate_bracket_tax(&payroll_rules.brackets, annual_taxable);
    let monthly_tax = tax.total.div_round(MONTHS_PER_YEAR);

    let statutory_deductions: Vec<DeductionLine> = statutory_lines
        .iter()
        .map(|line| DeductionLine {
            code: line.code.clone(),
            name: line.name.clone(),
            amount: line.employee_amount,
        })
        .collect();
    let deductions_total =
        monthly_tax + statutory_deductions.iter().map(|line| line.amount).sum::<Money>();
    let deductions = DeductionsBreakdown {
        income_tax: monthly_tax,
        statutory: statutory_deductions,
        total: deductions_total,
    };

    let employer_lines: Vec<DeductionLine> = statutory_lines
        .iter()
        .filter(|line| line.employer_amount > Money::ZERO)
        .map(|line| DeductionLine {
            code: line.code.clone(),
            name: line.name.clone(),
            amount: line.employer_amount,
        })
        .collect();
    let employer_total: Money = employer_lines.iter().map(|line| line.amount).sum();
    let employer = EmployerContributions {
        lines: employer_lines,
        total: employer_total,
    };

    // Income tax first, then one merged entry per statutory obligation.
    let mut remittance = vec![RemittanceEntry {
        name: payroll_rules.tax_name.clone(),
        amount: monthly_tax,
        authority: payroll_rules.tax_authority.clone(),
        deadline: payroll_rules.tax_deadline.clone(),
        note: payroll_rules.tax_note.clone(),
    }];
    for line in &statutory_lines {
        if line.total() > Money::ZERO {
            remittance.push(RemittanceEntry {
                name: line.name.clone(),
                amount: line.total(),
                authority: line.authority.clone(),
                deadline: line.deadline.clone(),
                note: line.note.clone(),
            });
        }
    }

    let jurisdiction = input
        .jurisdiction
        .clone()
        .unwrap_or_else(|| rules.metadata().jurisdiction.clone());

    Ok(PayrollResult {
        calculation_id: Uuid::new_v4(),
        computed_at: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        rule_set_version: rules.metadata().version.clone(),
        employee_id: input.employee_id.clone(),
        period: input.period.clone(),
        jurisdiction,
        net_pay: input.gross - deductions.total,
        total_employer_cost: input.gross + employer.total,
        earnings,
        annual_relief: relief.relief,
        annual_taxable,
        annual_tax: tax.total,
        deductions,
        employer,
        remittance,
    })
}
