//! Rule configuration loading and validation.
//!
//! This module provides the versioned rule-set types consumed by the
//! calculation and matching engines, plus a loader that reads them from
//! YAML files and fails fast on any structural violation. Nothing in the
//! engine is hard-coded: bracket tables, salary splits, relief caps,
//! statutory percentages and scorer weights all arrive through here so
//! historical calculations stay reproducible against the rule version in
//! effect at calculation time.
//!
//! # Example
//!
//! ```no_run
//! use taxcore::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/ng-paye-2023").unwrap();
//! println!("Loaded rule set: {}", config.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AmountTiers, BracketTable, DateTiers, DeductionBase, MatchConfig, NameThresholds, PayrollRules,
    ReliefRules, RuleSet, RuleSetMetadata, SalarySplit, ScorerWeights, StatutoryDeductionRule,
    TaxBracket,
};
