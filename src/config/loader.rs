//! Rule-set loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading a versioned
//! rule set from a directory of YAML files.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{
    BracketTable, MatchConfig, PayrollRules, ReliefRules, RuleSet, RuleSetMetadata, SalarySplit,
    StatutoryDeductionRule, TaxBracket,
};

/// Raw shape of `rules.yaml` before validation.
#[derive(Debug, Deserialize)]
struct RulesFile {
    metadata: RuleSetMetadata,
    salary_split: SalarySplit,
    relief: ReliefRules,
    statutory: Vec<StatutoryDeductionRule>,
    income_tax: IncomeTaxSection,
}

/// The income-tax remittance section of `rules.yaml`.
#[derive(Debug, Deserialize)]
struct IncomeTaxSection {
    name: String,
    authority: String,
    deadline: String,
    note: String,
}

/// Raw shape of `brackets.yaml` before validation.
#[derive(Debug, Deserialize)]
struct BracketsFile {
    brackets: Vec<TaxBracket>,
}

/// Loads and provides access to a versioned rule set.
///
/// The `ConfigLoader` reads YAML rule files from a directory and validates
/// every structural invariant before any computation can use them.
///
/// # Directory Structure
///
/// ```text
/// config/ng-paye-2023/
/// ├── rules.yaml     # Metadata, salary split, relief, statutory obligations
/// ├── brackets.yaml  # Progressive tax bracket table (annual, subunits)
/// └── matching.yaml  # Match scorer weights, tiers and thresholds
/// ```
///
/// # Example
///
/// ```no_run
/// use taxcore::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/ng-paye-2023").unwrap();
/// println!("Loaded rule set: {}", loader.metadata().name);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    rules: RuleSet,
}

impl ConfigLoader {
    /// Loads a rule set from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the rule-set directory (e.g., "./config/ng-paye-2023")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML (`ConfigParseError`)
    /// - Any table fails its structural invariants (`ConfigurationError`)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use taxcore::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/ng-paye-2023")?;
    /// # Ok::<(), taxcore::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let rules_file = Self::load_yaml::<RulesFile>(&path.join("rules.yaml"))?;
        let brackets_file = Self::load_yaml::<BracketsFile>(&path.join("brackets.yaml"))?;
        let matching = Self::load_yaml::<MatchConfig>(&path.join("matching.yaml"))?;

        let payroll = PayrollRules {
            salary_split: rules_file.salary_split,
            relief: rules_file.relief,
            statutory: rules_file.statutory,
            brackets: BracketTable::new(brackets_file.brackets)?,
            tax_name: rules_file.income_tax.name,
            tax_authority: rules_file.income_tax.authority,
            tax_deadline: rules_file.income_tax.deadline,
            tax_note: rules_file.income_tax.note,
        };

        let rules = RuleSet::new(rules_file.metadata, payroll, matching)?;

        Ok(Self { rules })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying validated rule set.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Returns the rule set metadata.
    pub fn metadata(&self) -> &RuleSetMetadata {
        self.rules.metadata()
    }

    /// Returns the payroll rules.
    pub fn payroll(&self) -> &PayrollRules {
        self.rules.payroll()
    }

    /// Returns the match configuration.
    pub fn matching(&self) -> &MatchConfig {
        self.rules.matching()
    }
}
