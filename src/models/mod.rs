//! Core data models for the tax computation and reconciliation engine.
//!
//! This module contains all the domain models used throughout the engine.

mod matching;
mod payroll;

pub use matching::{Confidence, MatchResult, TransactionForMatch, WhtCertificate};
pub use payroll::{
    DeductionLine, DeductionsBreakdown, EarningsBreakdown, EmployerContributions, PayrollInput,
    PayrollResult, RemittanceEntry,
};
