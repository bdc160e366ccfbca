//! Certificate match scoring.
//!
//! This module computes a weighted similarity score in `[0, 1]` between one
//! withholding-tax certificate and one candidate transaction from four
//! independent signals: identifier equality, amount proximity, date
//! proximity and name similarity. Signals are evaluated in that fixed
//! order and each contributing signal appends one explanatory reason, so
//! the result is deterministic and reproducible regardless of input
//! ordering. The function is pure: no side effects, identical inputs
//! always yield identical outputs.

use rust_decimal::Decimal;

use crate::config::MatchConfig;
use crate::matching::similarity::name_similarity;
use crate::models::{Confidence, MatchResult, TransactionForMatch, WhtCertificate};
use crate::money::Money;

/// Scores one certificate against one candidate transaction.
///
/// # Arguments
///
/// * `certificate` - The withholding-tax certificate being reconciled
/// * `transaction` - The candidate transaction
/// * `transaction_index` - The candidate's index in the caller's set,
///   carried onto the result so ranked results stay relatable
/// * `config` - Scorer weights, tier bands and thresholds
///
/// # Example
///
/// ```
/// use taxcore::matching::score_match;
/// # use taxcore::config::{AmountTiers, DateTiers, MatchConfig, NameThresholds, ScorerWeights};
/// use taxcore::models::{TransactionForMatch, WhtCertificate};
/// use taxcore::money::Money;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// # fn config() -> MatchConfig {
/// #     let dec = |s: &str| Decimal::from_str(s).unwrap();
/// #     MatchConfig {
/// #         weights: ScorerWeights { identifier: dec("0.35"), amount: dec("0.30"), date: dec("0.20"), name: dec("0.15") },
/// #         amount_tiers: AmountTiers { full_within: dec("0.01"), reduced_within: dec("0.05"), reduced_weight: dec("0.25"), minimal_within: dec("0.10"), minimal_weight: dec("0.15") },
/// #         date_tiers: DateTiers { full_within_days: 7, reduced_within_days: 30, reduced_weight: dec("0.15"), minimal_within_days: 90, minimal_weight: dec("0.10") },
/// #         name_thresholds: NameThresholds { high_similarity: dec("0.8"), medium_similarity: dec("0.5"), medium_weight: dec("0.10"), containment_similarity: dec("0.9") },
/// #         min_score: dec("0.30"), best_match_threshold: dec("0.75"),
/// #         high_confidence: dec("0.85"), medium_confidence: dec("0.60"),
/// #     }
/// # }
/// let certificate = WhtCertificate {
///     issuer_name: "Acme Ltd".to_string(),
///     issuer_tax_id: Some("12345678-0001".to_string()),
///     amount: Money::from_major(50_000),
///     withholding_rate: Some(Decimal::from_str("0.05").unwrap()),
///     issue_date: NaiveDate::from_ymd_opt(2023, 4, 12),
///     tax_year: 2023,
/// };
/// let transaction = TransactionForMatch {
///     description: "Invoice settlement Acme Ltd".to_string(),
///     amount: Money::from_major(1_000_000),
///     date: NaiveDate::from_ymd_opt(2023, 4, 10),
///     counterparty_name: Some("Acme Ltd".to_string()),
///     counterparty_tax_id: Some("12345678-0001".to_string()),
/// };
/// let result = score_match(&certificate, &transaction, 0, &config());
/// assert_eq!(result.score, Decimal::ONE);
/// assert_eq!(result.reasons.len(), 4);
/// ```
pub fn score_match(
    certificate: &WhtCertificate,
    transaction: &TransactionForMatch,
    transaction_index: usize,
    config: &MatchConfig,
) -> MatchResult {
    let mut score = Decimal::ZERO;
    let mut reasons = Vec::new();

    // Signal 1: exact identifier equality, byte-for-byte, no normalization.
    if let (Some(cert_id), Some(txn_id)) = (
        certificate.issuer_tax_id.as_deref(),
        transaction.counterparty_tax_id.as_deref(),
    ) && cert_id == txn_id
    {
        score += config.weights.identifier;
        reasons.push(format!(
            "Issuer tax ID '{cert_id}' exactly matches the transaction counterparty"
        ));
    }

    // Signal 2: amount proximity over the grossed-up certificate amount.
    let expected = estimate_gross_amount(certificate);
    let relative_diff = relative_difference(expected, transaction.amount);
    let tiers = &config.amount_tiers;
    let amount_weight = if relative_diff < tiers.full_within {
        config.weights.amount
    } else if relative_diff < tiers.reduced_within {
        tiers.reduced_weight
    } else if relative_diff < tiers.minimal_within {
        tiers.minimal_weight
    } else {
        Decimal::ZERO
    };
    if amount_weight > Decimal::ZERO {
        score += amount_weight;
        reasons.push(format!(
            "Expected gross amount {} is within {}% of the transaction amount {}",
            expected,
            percent(relative_diff),
            transaction.amount
        ));
    }

    // Signal 3: date proximity. A missing date on either side is an
    // effectively infinite distance.
    if let (Some(issue_date), Some(txn_date)) = (certificate.issue_date, transaction.date) {
        let days = (issue_date - txn_date).num_days().abs();
        let tiers = &config.date_tiers;
        let date_weight = if days < tiers.full_within_days {
            config.weights.date
        } else if days < tiers.reduced_within_days {
            tiers.reduced_weight
        } else if days < tiers.minimal_within_days {
            tiers.minimal_weight
        } else {
            Decimal::ZERO
        };
        if date_weight > Decimal::ZERO {
            score += date_weight;
            reasons.push(format!(
                "Certificate issued {days} day(s) from the transaction date"
            ));
        }
    }

    // Signal 4: best name similarity across counterparty name and the
    // free-text description.
    let containment = config.name_thresholds.containment_similarity;
    let mut best_similarity = name_similarity(
        &certificate.issuer_name,
        &transaction.description,
        containment,
    );
    if let Some(counterparty) = transaction.counterparty_name.as_deref() {
        best_similarity = best_similarity.max(name_similarity(
            &certificate.issuer_name,
            counterparty,
            containment,
        ));
    }
    let thresholds = &config.name_thresholds;
    let name_weight = if best_similarity >= thresholds.high_similarity {
        config.weights.name
    } else if best_similarity >= thresholds.medium_similarity {
        thresholds.medium_weight
    } else {
        Decimal::ZERO
    };
    if name_weight > Decimal::ZERO {
        score += name_weight;
        reasons.push(format!(
            "Issuer name '{}' is {}% similar to the transaction counterparty text",
            certificate.issuer_name,
            percent(best_similarity)
        ));
    }

    let confidence = if score >= config.high_confidence {
        Confidence::High
    } else if score >= config.medium_confidence {
        Confidence::Medium
    } else {
        Confidence::Possible
    };

    MatchResult {
        transaction_index,
        score,
        confidence,
        reasons,
    }
}

/// Estimates the original transaction amount from the certificate.
///
/// When the certificate carries a positive withholding rate the certificate
/// amount is the tax withheld, so the original amount is the certificate
/// amount divided by that rate, rounded half-up once. With a zero or absent
/// rate the certificate amount is compared raw; it never divides by zero.
fn estimate_gross_amount(certificate: &WhtCertificate) -> Money {
    match certificate.withholding_rate {
        Some(rate) if rate > Decimal::ZERO => {
            Money::from_decimal_subunits(certificate.amount.to_decimal() / rate)
        }
        _ => certificate.amount,
    }
}

/// Relative difference of two amounts: `|a − b| / max(|a|, |b|)`.
///
/// Zero when both amounts are zero, so the comparison never divides by
/// zero.
fn relative_difference(a: Money, b: Money) -> Decimal {
    let a = a.to_decimal();
    let b = b.to_decimal();
    let denominator = a.abs().max(b.abs());
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    (a - b).abs() / denominator
}

/// Formats a fraction as a percentage with two decimal places for reasons.
fn percent(fraction: Decimal) -> Decimal {
    (fraction * Decimal::from(100)).round_dp(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    use crate::config::{AmountTiers, DateTiers, NameThresholds, ScorerWeights};

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_config() -> MatchConfig {
        MatchConfig {
            weights: ScorerWeights {
                identifier: dec("0.35"),
                amount: dec("0.30"),
                date: dec("0.20"),
                name: dec("0.15"),
            },
            amount_tiers: AmountTiers {
                full_within: dec("0.01"),
                reduced_within: dec("0.05"),
                reduced_weight: dec("0.25"),
                minimal_within: dec("0.10"),
                minimal_weight: dec("0.15"),
            },
            date_tiers: DateTiers {
                full_within_days: 7,
                reduced_within_days: 30,
                reduced_weight: dec("0.15"),
                minimal_within_days: 90,
                minimal_weight: dec("0.10"),
            },
            name_thresholds: NameThresholds {
                high_similarity: dec("0.8"),
                medium_similarity: dec("0.5"),
                medium_weight: dec("0.10"),
                containment_similarity: dec("0.9"),
            },
            min_score: dec("0.30"),
            best_match_threshold: dec("0.75"),
            high_confidence: dec("0.85"),
            medium_confidence: dec("0.60"),
        }
    }

    fn certificate() -> WhtCertificate {
        WhtCertificate {
            issuer_name: "Acme Ltd".to_string(),
            issuer_tax_id: Some("12345678-0001".to_string()),
            amount: Money::from_major(50_000),
            withholding_rate: Some(dec("0.05")),
            issue_date: NaiveDate::from_ymd_opt(2023, 4, 12),
            tax_year: 2023,
        }
    }

    fn matching_transaction() -> TransactionForMatch {
        TransactionForMatch {
            description: "Invoice settlement Acme Ltd".to_string(),
            amount: Money::from_major(1_000_000),
            date: NaiveDate::from_ymd_opt(2023, 4, 10),
            counterparty_name: Some("Acme Ltd".to_string()),
            counterparty_tax_id: Some("12345678-0001".to_string()),
        }
    }

    #[test]
    fn test_perfect_match_scores_one_with_four_reasons() {
        let result = score_match(&certificate(), &matching_transaction(), 0, &create_test_config());
        assert_eq!(result.score, Decimal::ONE);
        assert_eq!(result.confidence, Confidence::High);
        assert_eq!(result.reasons.len(), 4);
        // Evaluation order is fixed: identifier, amount, date, name.
        assert!(result.reasons[0].contains("tax ID"));
        assert!(result.reasons[1].contains("amount"));
        assert!(result.reasons[2].contains("day(s)"));
        assert!(result.reasons[3].contains("similar"));
    }

    #[test]
    fn test_unrelated_pair_scores_zero() {
        let certificate = WhtCertificate {
            issuer_name: "Zenith Logistics".to_string(),
            issuer_tax_id: Some("99999999-0001".to_string()),
            amount: Money::from_major(75_000),
            withholding_rate: None,
            issue_date: NaiveDate::from_ymd_opt(2022, 4, 10),
            tax_year: 2022,
        };
        let transaction = TransactionForMatch {
            description: "Quarry equipment maintenance".to_string(),
            amount: Money::from_major(150_000),
            date: NaiveDate::from_ymd_opt(2023, 4, 10),
            counterparty_name: Some("Dangote Cement Plc".to_string()),
            counterparty_tax_id: Some("11111111-0001".to_string()),
        };
        let result = score_match(&certificate, &transaction, 0, &create_test_config());
        assert_eq!(result.score, Decimal::ZERO);
        assert_eq!(result.confidence, Confidence::Possible);
        assert!(result.reasons.is_empty());
    }

    #[test]
    fn test_identifier_mismatch_contributes_nothing() {
        let mut transaction = matching_transaction();
        transaction.counterparty_tax_id = Some("12345678-0002".to_string());
        let result = score_match(&certificate(), &transaction, 0, &create_test_config());
        assert_eq!(result.score, dec("0.65"));
        assert!(!result.reasons.iter().any(|r| r.contains("tax ID")));
    }

    #[test]
    fn test_identifier_requires_byte_equality() {
        // Case differs: no normalization is applied to identifiers.
        let mut transaction = matching_transaction();
        transaction.counterparty_tax_id = Some("12345678-0001 ".to_string());
        let result = score_match(&certificate(), &transaction, 0, &create_test_config());
        assert!(!result.reasons.iter().any(|r| r.contains("tax ID")));
    }

    #[test]
    fn test_amount_gross_up_divides_by_rate() {
        // ₦50,000 withheld at 5% implies a ₦1,000,000 original amount.
        assert_eq!(estimate_gross_amount(&certificate()), Money::from_major(1_000_000));
    }

    #[test]
    fn test_amount_without_rate_compares_raw() {
        let certificate = WhtCertificate {
            withholding_rate: None,
            ..certificate()
        };
        assert_eq!(estimate_gross_amount(&certificate), Money::from_major(50_000));
    }

    #[test]
    fn test_amount_with_zero_rate_never_divides() {
        let certificate = WhtCertificate {
            withholding_rate: Some(Decimal::ZERO),
            ..certificate()
        };
        assert_eq!(estimate_gross_amount(&certificate), Money::from_major(50_000));
    }

    #[test]
    fn test_amount_tiers() {
        let config = create_test_config();
        let base = certificate();

        // 3% off: reduced tier.
        let mut transaction = matching_transaction();
        transaction.amount = Money::from_major(1_030_000);
        let result = score_match(&base, &transaction, 0, &config);
        assert_eq!(result.score, dec("0.35") + dec("0.25") + dec("0.20") + dec("0.15"));

        // 8% off: minimal tier.
        transaction.amount = Money::from_major(1_080_000);
        let result = score_match(&base, &transaction, 0, &config);
        assert_eq!(result.score, dec("0.35") + dec("0.15") + dec("0.20") + dec("0.15"));

        // 50% off: no amount contribution.
        transaction.amount = Money::from_major(1_500_000);
        let result = score_match(&base, &transaction, 0, &config);
        assert_eq!(result.score, dec("0.35") + dec("0.20") + dec("0.15"));
    }

    #[test]
    fn test_relative_difference_is_symmetric_and_zero_safe() {
        assert_eq!(
            relative_difference(Money::from_major(100), Money::from_major(110)),
            relative_difference(Money::from_major(110), Money::from_major(100))
        );
        assert_eq!(relative_difference(Money::ZERO, Money::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_date_tiers() {
        let config = create_test_config();
        let base = certificate();
        let mut transaction = matching_transaction();

        // 20 days out: reduced tier.
        transaction.date = NaiveDate::from_ymd_opt(2023, 3, 23);
        let result = score_match(&base, &transaction, 0, &config);
        assert_eq!(result.score, dec("0.35") + dec("0.30") + dec("0.15") + dec("0.15"));

        // 60 days out: minimal tier.
        transaction.date = NaiveDate::from_ymd_opt(2023, 2, 11);
        let result = score_match(&base, &transaction, 0, &config);
        assert_eq!(result.score, dec("0.35") + dec("0.30") + dec("0.10") + dec("0.15"));

        // A year out: nothing.
        transaction.date = NaiveDate::from_ymd_opt(2022, 4, 10);
        let result = score_match(&base, &transaction, 0, &config);
        assert_eq!(result.score, dec("0.35") + dec("0.30") + dec("0.15"));
    }

    #[test]
    fn test_missing_date_contributes_nothing() {
        let mut transaction = matching_transaction();
        transaction.date = None;
        let result = score_match(&certificate(), &transaction, 0, &create_test_config());
        assert_eq!(result.score, dec("0.35") + dec("0.30") + dec("0.15"));
        assert!(!result.reasons.iter().any(|r| r.contains("day(s)")));
    }

    #[test]
    fn test_name_signal_uses_best_of_counterparty_and_description() {
        // Counterparty name is unrelated but the description contains the
        // issuer, so the containment short-circuit still clears the high
        // threshold.
        let mut transaction = matching_transaction();
        transaction.counterparty_name = Some("Unrelated Holdings".to_string());
        transaction.description = "TRF Acme Ltd invoice 004".to_string();
        let result = score_match(&certificate(), &transaction, 0, &create_test_config());
        assert_eq!(result.score, Decimal::ONE);
    }

    #[test]
    fn test_scoring_is_pure() {
        let config = create_test_config();
        let first = score_match(&certificate(), &matching_transaction(), 3, &config);
        let second = score_match(&certificate(), &matching_transaction(), 3, &config);
        assert_eq!(first, second);
    }
}
