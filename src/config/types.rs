//! Configuration types for the tax computation and reconciliation engine.
//!
//! This module contains the strongly-typed rule structures that are
//! deserialized from YAML rule files. Every table validates its structural
//! invariants before any computation proceeds, so a malformed rule set fails
//! fast at load time instead of producing silently wrong figures.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::money::Money;

/// Metadata about a versioned rule set.
///
/// Historical calculations must remain reproducible against the rule version
/// in effect at calculation time, so every rule set carries identifying
/// information that results can cite.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleSetMetadata {
    /// A short code for the rule set (e.g., "ng-paye-2023").
    pub code: String,
    /// The human-readable name of the rule set.
    pub name: String,
    /// The version or effective date of the rules.
    pub version: String,
    /// The jurisdiction label these rules apply to; also the documented
    /// default when a payroll input omits its jurisdiction.
    pub jurisdiction: String,
}

/// A single progressive tax bracket.
///
/// Brackets are half-open annual income ranges `[min, max)` taxed at one
/// flat marginal rate; the final bracket has no upper edge. Bounds are in
/// integer subunits, rates are fractions (`0.15` for 15%).
#[derive(Debug, Clone, Deserialize)]
pub struct TaxBracket {
    /// Lower edge of the bracket (inclusive), in subunits.
    pub min: Money,
    /// Upper edge of the bracket (exclusive), in subunits. `None` marks the
    /// final, unbounded bracket.
    pub max: Option<Money>,
    /// The marginal rate applied within this bracket.
    pub rate: Decimal,
}

impl TaxBracket {
    /// Returns the width of the bracket, or `None` for the unbounded final
    /// bracket.
    pub fn width(&self) -> Option<Money> {
        self.max.map(|max| max - self.min)
    }
}

/// An ordered, validated progressive bracket table.
///
/// Construction enforces the structural invariants: brackets are non-empty,
/// start at zero, are contiguous and sorted ascending, carry non-negative
/// rates, and end with a single unbounded bracket, so their union covers
/// `[0, ∞)`.
///
/// # Example
///
/// ```
/// use taxcore::config::{BracketTable, TaxBracket};
/// use taxcore::money::Money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let table = BracketTable::new(vec![
///     TaxBracket { min: Money::ZERO, max: Some(Money::from_major(800_000)), rate: Decimal::ZERO },
///     TaxBracket { min: Money::from_major(800_000), max: None, rate: Decimal::from_str("0.15").unwrap() },
/// ]).unwrap();
/// assert_eq!(table.brackets().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct BracketTable {
    brackets: Vec<TaxBracket>,
}

impl BracketTable {
    /// Validates and constructs a bracket table.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ConfigurationError`] when any structural
    /// invariant is violated.
    pub fn new(brackets: Vec<TaxBracket>) -> EngineResult<Self> {
        fn invalid(message: impl Into<String>) -> EngineError {
            EngineError::ConfigurationError {
                rule: "brackets".to_string(),
                message: message.into(),
            }
        }

        if brackets.is_empty() {
            return Err(invalid("bracket table must contain at least one bracket"));
        }
        if brackets[0].min != Money::ZERO {
            return Err(invalid("first bracket must start at zero"));
        }
        for (index, bracket) in brackets.iter().enumerate() {
            if bracket.rate.is_sign_negative() {
                return Err(invalid(format!("bracket {index} has a negative rate")));
            }
            let is_last = index == brackets.len() - 1;
            match bracket.max {
                None if !is_last => {
                    return Err(invalid(format!(
                        "bracket {index} is unbounded but is not the final bracket"
                    )));
                }
                Some(max) if !is_last => {
                    if max <= bracket.min {
                        return Err(invalid(format!(
                            "bracket {index} has an empty or inverted range"
                        )));
                    }
                    if brackets[index + 1].min != max {
                        return Err(invalid(format!(
                            "bracket {} does not start where bracket {index} ends",
                            index + 1
                        )));
                    }
                }
                Some(_) if is_last => {
                    return Err(invalid("final bracket must be unbounded"));
                }
                _ => {}
            }
        }
        Ok(Self { brackets })
    }

    /// Returns the validated brackets in ascending order.
    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }
}

/// Fixed percentage split of gross pay into salary components.
///
/// Percentages are whole-number style (`50` for 50%) and must sum to 100.
#[derive(Debug, Clone, Deserialize)]
pub struct SalarySplit {
    /// Basic salary percentage of gross.
    pub basic_percent: Decimal,
    /// Housing component percentage of gross.
    pub housing_percent: Decimal,
    /// Transport component percentage of gross.
    pub transport_percent: Decimal,
    /// Residual component percentage of gross.
    pub other_percent: Decimal,
}

impl SalarySplit {
    /// Validates that the component percentages sum to exactly 100.
    pub fn validate(&self) -> EngineResult<()> {
        let total =
            self.basic_percent + self.housing_percent + self.transport_percent + self.other_percent;
        if total != Decimal::from(100) {
            return Err(EngineError::ConfigurationError {
                rule: "salary_split".to_string(),
                message: format!("component percentages must sum to 100, got {total}"),
            });
        }
        if [
            self.basic_percent,
            self.housing_percent,
            self.transport_percent,
            self.other_percent,
        ]
        .iter()
        .any(|p| p.is_sign_negative())
        {
            return Err(EngineError::ConfigurationError {
                rule: "salary_split".to_string(),
                message: "component percentages must not be negative".to_string(),
            });
        }
        Ok(())
    }
}

/// Rent relief rules: a fraction of annual rent paid, capped.
#[derive(Debug, Clone, Deserialize)]
pub struct ReliefRules {
    /// Fraction of annual rent allowed as relief (`0.2` for 20%).
    pub rent_fraction: Decimal,
    /// Annual cap on the rent relief, in subunits.
    pub rent_cap: Money,
}

impl ReliefRules {
    /// Validates that the fraction is in `[0, 1]` and the cap non-negative.
    pub fn validate(&self) -> EngineResult<()> {
        if self.rent_fraction.is_sign_negative() || self.rent_fraction > Decimal::ONE {
            return Err(EngineError::ConfigurationError {
                rule: "relief".to_string(),
                message: format!("rent_fraction must be within [0, 1], got {}", self.rent_fraction),
            });
        }
        if self.rent_cap.is_negative() {
            return Err(EngineError::ConfigurationError {
                rule: "relief".to_string(),
                message: "rent_cap must not be negative".to_string(),
            });
        }
        Ok(())
    }
}

/// The pay component a statutory deduction percentage applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionBase {
    /// Percentage of the full gross pay.
    Gross,
    /// Percentage of the basic-salary component only.
    Basic,
}

/// One statutory obligation (pension, housing fund, health insurance, ...).
///
/// Each rule carries both the employee-side and employer-side percentages;
/// the two portions remit to the same authority and are merged into a single
/// remittance schedule entry. Authority names and deadline wording are
/// boundary-supplied configuration, never hard-coded in the engine.
#[derive(Debug, Clone, Deserialize)]
pub struct StatutoryDeductionRule {
    /// A short stable code for the obligation (e.g., "pension").
    pub code: String,
    /// The human-readable obligation name.
    pub name: String,
    /// The pay component the percentages apply to.
    pub base: DeductionBase,
    /// Employee-side percentage of the base (whole-number style, `8` = 8%).
    pub employee_percent: Decimal,
    /// Employer-side percentage of the base.
    pub employer_percent: Decimal,
    /// The authority the obligation is remitted to.
    pub authority: String,
    /// Human-readable remittance deadline description.
    pub deadline: String,
    /// Explanatory note carried onto the remittance schedule entry.
    pub note: String,
}

impl StatutoryDeductionRule {
    /// Validates that both percentages are non-negative.
    pub fn validate(&self) -> EngineResult<()> {
        if self.employee_percent.is_sign_negative() || self.employer_percent.is_sign_negative() {
            return Err(EngineError::ConfigurationError {
                rule: format!("statutory.{}", self.code),
                message: "deduction percentages must not be negative".to_string(),
            });
        }
        Ok(())
    }
}

/// The complete payroll rule set for one jurisdiction and period.
#[derive(Debug, Clone)]
pub struct PayrollRules {
    /// Gross pay split percentages.
    pub salary_split: SalarySplit,
    /// Rent relief rules.
    pub relief: ReliefRules,
    /// Statutory obligations in remittance-schedule order.
    pub statutory: Vec<StatutoryDeductionRule>,
    /// The progressive income tax bracket table (annual, subunits).
    pub brackets: BracketTable,
    /// Display name for the income tax remittance entry.
    pub tax_name: String,
    /// Authority receiving the income tax remittance.
    pub tax_authority: String,
    /// Human-readable income tax remittance deadline.
    pub tax_deadline: String,
    /// Explanatory note for the income tax remittance entry.
    pub tax_note: String,
}

impl PayrollRules {
    /// Validates every component table.
    ///
    /// The bracket table validates at construction; this checks the rest.
    pub fn validate(&self) -> EngineResult<()> {
        self.salary_split.validate()?;
        self.relief.validate()?;
        for rule in &self.statutory {
            rule.validate()?;
        }
        Ok(())
    }
}

/// Maximum weight each match signal can contribute to the composite score.
///
/// The four weights must sum to exactly 1.
#[derive(Debug, Clone, Deserialize)]
pub struct ScorerWeights {
    /// Weight of an exact tax-identifier match.
    pub identifier: Decimal,
    /// Weight of the amount-proximity signal.
    pub amount: Decimal,
    /// Weight of the date-proximity signal.
    pub date: Decimal,
    /// Weight of the name-similarity signal.
    pub name: Decimal,
}

impl ScorerWeights {
    /// Validates that all weights are non-negative and sum to exactly 1.
    pub fn validate(&self) -> EngineResult<()> {
        let total = self.identifier + self.amount + self.date + self.name;
        if total != Decimal::ONE {
            return Err(EngineError::ConfigurationError {
                rule: "weights".to_string(),
                message: format!("signal weights must sum to 1, got {total}"),
            });
        }
        if [self.identifier, self.amount, self.date, self.name]
            .iter()
            .any(|w| w.is_sign_negative())
        {
            return Err(EngineError::ConfigurationError {
                rule: "weights".to_string(),
                message: "signal weights must not be negative".to_string(),
            });
        }
        Ok(())
    }
}

/// Tiered relative-difference bands for the amount-proximity signal.
///
/// A relative difference below `full_within` earns the full amount weight;
/// below `reduced_within` earns `reduced_weight`; below `minimal_within`
/// earns `minimal_weight`; anything wider earns nothing.
#[derive(Debug, Clone, Deserialize)]
pub struct AmountTiers {
    /// Relative difference below which the full weight is awarded.
    pub full_within: Decimal,
    /// Relative difference below which the reduced weight is awarded.
    pub reduced_within: Decimal,
    /// Weight awarded within the reduced band.
    pub reduced_weight: Decimal,
    /// Relative difference below which the minimal weight is awarded.
    pub minimal_within: Decimal,
    /// Weight awarded within the minimal band.
    pub minimal_weight: Decimal,
}

impl AmountTiers {
    /// Validates tier ordering and that partial weights fit under `full`.
    pub fn validate(&self, full_weight: Decimal) -> EngineResult<()> {
        if !(Decimal::ZERO < self.full_within
            && self.full_within < self.reduced_within
            && self.reduced_within < self.minimal_within)
        {
            return Err(EngineError::ConfigurationError {
                rule: "amount_tiers".to_string(),
                message: "tier boundaries must be strictly increasing".to_string(),
            });
        }
        if self.reduced_weight > full_weight || self.minimal_weight > self.reduced_weight {
            return Err(EngineError::ConfigurationError {
                rule: "amount_tiers".to_string(),
                message: "tier weights must descend from the full signal weight".to_string(),
            });
        }
        Ok(())
    }
}

/// Tiered day-difference bands for the date-proximity signal.
#[derive(Debug, Clone, Deserialize)]
pub struct DateTiers {
    /// Day difference below which the full weight is awarded.
    pub full_within_days: i64,
    /// Day difference below which the reduced weight is awarded.
    pub reduced_within_days: i64,
    /// Weight awarded within the reduced band.
    pub reduced_weight: Decimal,
    /// Day difference below which the minimal weight is awarded.
    pub minimal_within_days: i64,
    /// Weight awarded within the minimal band.
    pub minimal_weight: Decimal,
}

impl DateTiers {
    /// Validates tier ordering and that partial weights fit under `full`.
    pub fn validate(&self, full_weight: Decimal) -> EngineResult<()> {
        if !(0 < self.full_within_days
            && self.full_within_days < self.reduced_within_days
            && self.reduced_within_days < self.minimal_within_days)
        {
            return Err(EngineError::ConfigurationError {
                rule: "date_tiers".to_string(),
                message: "tier boundaries must be strictly increasing".to_string(),
            });
        }
        if self.reduced_weight > full_weight || self.minimal_weight > self.reduced_weight {
            return Err(EngineError::ConfigurationError {
                rule: "date_tiers".to_string(),
                message: "tier weights must descend from the full signal weight".to_string(),
            });
        }
        Ok(())
    }
}

/// Similarity thresholds for the name signal.
#[derive(Debug, Clone, Deserialize)]
pub struct NameThresholds {
    /// Similarity at or above which the full name weight is awarded.
    pub high_similarity: Decimal,
    /// Similarity at or above which the medium weight is awarded.
    pub medium_similarity: Decimal,
    /// Weight awarded in the medium band.
    pub medium_weight: Decimal,
    /// Similarity assigned when one name fully contains the other.
    pub containment_similarity: Decimal,
}

impl NameThresholds {
    /// Validates that thresholds are ordered fractions in `[0, 1]`.
    pub fn validate(&self, full_weight: Decimal) -> EngineResult<()> {
        let in_unit = |v: Decimal| !v.is_sign_negative() && v <= Decimal::ONE;
        if !in_unit(self.high_similarity)
            || !in_unit(self.medium_similarity)
            || !in_unit(self.containment_similarity)
        {
            return Err(EngineError::ConfigurationError {
                rule: "name_thresholds".to_string(),
                message: "similarity thresholds must be within [0, 1]".to_string(),
            });
        }
        if self.medium_similarity >= self.high_similarity {
            return Err(EngineError::ConfigurationError {
                rule: "name_thresholds".to_string(),
                message: "medium_similarity must be below high_similarity".to_string(),
            });
        }
        if self.medium_weight > full_weight {
            return Err(EngineError::ConfigurationError {
                rule: "name_thresholds".to_string(),
                message: "medium_weight must not exceed the full name weight".to_string(),
            });
        }
        Ok(())
    }
}

/// The complete configuration for the certificate match scorer and ranker.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchConfig {
    /// Per-signal maximum weights.
    pub weights: ScorerWeights,
    /// Amount-proximity tier bands.
    pub amount_tiers: AmountTiers,
    /// Date-proximity tier bands.
    pub date_tiers: DateTiers,
    /// Name-similarity thresholds.
    pub name_thresholds: NameThresholds,
    /// Minimum composite score a ranked candidate must reach.
    pub min_score: Decimal,
    /// Stricter threshold the single best match must clear.
    pub best_match_threshold: Decimal,
    /// Composite score at or above which a match is labelled high
    /// confidence.
    pub high_confidence: Decimal,
    /// Composite score at or above which a match is labelled medium
    /// confidence.
    pub medium_confidence: Decimal,
}

impl MatchConfig {
    /// Validates the weight table, all tier bands, and the thresholds.
    pub fn validate(&self) -> EngineResult<()> {
        self.weights.validate()?;
        self.amount_tiers.validate(self.weights.amount)?;
        self.date_tiers.validate(self.weights.date)?;
        self.name_thresholds.validate(self.weights.name)?;

        let in_unit = |v: Decimal| !v.is_sign_negative() && v <= Decimal::ONE;
        if !in_unit(self.min_score) || !in_unit(self.best_match_threshold) {
            return Err(EngineError::ConfigurationError {
                rule: "thresholds".to_string(),
                message: "score thresholds must be within [0, 1]".to_string(),
            });
        }
        if self.min_score > self.best_match_threshold {
            return Err(EngineError::ConfigurationError {
                rule: "thresholds".to_string(),
                message: "min_score must not exceed best_match_threshold".to_string(),
            });
        }
        if self.medium_confidence >= self.high_confidence {
            return Err(EngineError::ConfigurationError {
                rule: "thresholds".to_string(),
                message: "medium_confidence must be below high_confidence".to_string(),
            });
        }
        Ok(())
    }
}

/// A complete validated rule set: metadata, payroll rules, match config.
#[derive(Debug, Clone)]
pub struct RuleSet {
    /// Identifying metadata for this rule version.
    metadata: RuleSetMetadata,
    /// Payroll computation rules.
    payroll: PayrollRules,
    /// Certificate matching configuration.
    matching: MatchConfig,
}

impl RuleSet {
    /// Validates and assembles a rule set from its component parts.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ConfigurationError`] when any component table
    /// fails its structural invariants.
    pub fn new(
        metadata: RuleSetMetadata,
        payroll: PayrollRules,
        matching: MatchConfig,
    ) -> EngineResult<Self> {
        payroll.validate()?;
        matching.validate()?;
        Ok(Self {
            metadata,
            payroll,
            matching,
        })
    }

    /// Returns the rule set metadata.
    pub fn metadata(&self) -> &RuleSetMetadata {
        &self.metadata
    }

    /// Returns the payroll rules.
    pub fn payroll(&self) -> &PayrollRules {
        &self.payroll
    }

    /// Returns the match configuration.
    pub fn matching(&self) -> &MatchConfig {
        &self.matching
    }
}
