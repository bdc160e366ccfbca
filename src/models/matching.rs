//! Withholding-tax reconciliation models.
//!
//! This module contains the read-only [`WhtCertificate`] and
//! [`TransactionForMatch`] inputs and the computed [`MatchResult`] pairing.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::Money;

/// A withholding-tax certificate to be reconciled against transactions.
///
/// Treated as read-only input; the engine only consumes already-structured
/// certificate data (OCR extraction is upstream and out of scope).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhtCertificate {
    /// The issuing counterparty's name as printed on the certificate.
    pub issuer_name: String,
    /// The issuer's tax identifier, when present.
    pub issuer_tax_id: Option<String>,
    /// The certificate amount (the tax withheld when a withholding rate is
    /// present, otherwise the gross amount).
    pub amount: Money,
    /// The withholding rate applied at source (`0.05` for 5%), when known.
    /// Disambiguates whether `amount` needs grossing up before comparison.
    pub withholding_rate: Option<Decimal>,
    /// The certificate issue date, when known.
    pub issue_date: Option<NaiveDate>,
    /// The tax year the certificate belongs to.
    pub tax_year: i32,
}

/// A candidate transaction the certificate may have originated from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionForMatch {
    /// Free-text transaction description.
    pub description: String,
    /// The transaction amount.
    pub amount: Money,
    /// The transaction date, when known.
    pub date: Option<NaiveDate>,
    /// The counterparty name, when known.
    pub counterparty_name: Option<String>,
    /// The counterparty tax identifier, when known.
    pub counterparty_tax_id: Option<String>,
}

/// Confidence band for a computed match, derived from configured score
/// thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    /// Score at or above the high-confidence threshold.
    High,
    /// Score at or above the medium-confidence threshold.
    Medium,
    /// Score below the medium-confidence threshold.
    Possible,
}

/// A computed, non-persisted pairing of one certificate to one transaction.
///
/// Owned by the caller; the engine only constructs and returns it. The
/// `reasons` list carries one human-readable string per contributing signal
/// in the fixed evaluation order (identifier, amount, date, name), so reason
/// ordering is deterministic regardless of input ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Index of the transaction in the caller's candidate set.
    pub transaction_index: usize,
    /// Composite similarity score in `[0, 1]`.
    pub score: Decimal,
    /// Confidence band derived from the configured thresholds.
    pub confidence: Confidence,
    /// One explanatory reason per contributing signal, in evaluation order.
    pub reasons: Vec<String>,
}
