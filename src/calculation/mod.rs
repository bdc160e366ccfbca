//! Tax and payroll calculation logic.
//!
//! This module contains the progressive bracket tax engine, the salary
//! split, rent relief and statutory deduction rules, and the payroll
//! orchestrator that assembles a complete payslip and remittance schedule.

mod bracket;
mod payroll;
mod relief;
mod salary_split;
mod statutory;

pub use bracket::{BracketTaxLine, BracketTaxResult, calculate_bracket_tax};
pub use payroll::compute_payroll;
pub use relief::{RentReliefResult, calculate_rent_relief};
pub use salary_split::split_gross;
pub use statutory::{StatutoryLine, calculate_statutory_lines};
