//! Deterministic tax computation and WHT reconciliation engine.
//!
//! This crate provides the algorithmic core of a tax-compliance product:
//! progressive-bracket tax and payroll computation over exact integer
//! currency units, and fuzzy reconciliation of withholding-tax certificates
//! against financial transactions. Every result is explainable,
//! reproducible, and free of floating-point drift.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod matching;
pub mod models;
pub mod money;
