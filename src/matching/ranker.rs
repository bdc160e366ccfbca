//! Reconciliation ranking.
//!
//! This module applies the match scorer across a candidate transaction set,
//! filters by a minimum score, and orders the survivors deterministically.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::MatchConfig;
use crate::matching::scorer::score_match;
use crate::models::{MatchResult, TransactionForMatch, WhtCertificate};

/// The outcome of a best-match lookup.
///
/// Finding no candidate above the threshold is a normal, reportable
/// outcome of reconciliation, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// The single highest-scoring candidate above the best-match threshold.
    Match(MatchResult),
    /// No candidate reached the best-match threshold.
    NoMatch,
}

impl MatchOutcome {
    /// Returns the match result, if any.
    pub fn into_match(self) -> Option<MatchResult> {
        match self {
            MatchOutcome::Match(result) => Some(result),
            MatchOutcome::NoMatch => None,
        }
    }
}

/// Scores every candidate and returns the survivors ranked by descending
/// score.
///
/// Candidates scoring strictly below `min_score` are discarded. The sort is
/// stable, so candidates with equal scores keep their original input order;
/// no secondary tie-break is applied — callers may impose their own.
///
/// # Example
///
/// ```no_run
/// use taxcore::config::ConfigLoader;
/// use taxcore::matching::rank_matches;
/// # use taxcore::models::{TransactionForMatch, WhtCertificate};
/// # fn demo(certificate: &WhtCertificate, transactions: &[TransactionForMatch]) {
/// let config = ConfigLoader::load("./config/ng-paye-2023").unwrap();
/// let matching = config.matching();
/// let ranked = rank_matches(certificate, transactions, matching, matching.min_score);
/// for result in &ranked {
///     println!("txn #{}: {}", result.transaction_index, result.score);
/// }
/// # }
/// ```
pub fn rank_matches(
    certificate: &WhtCertificate,
    transactions: &[TransactionForMatch],
    config: &MatchConfig,
    min_score: Decimal,
) -> Vec<MatchResult> {
    let mut results: Vec<MatchResult> = transactions
        .iter()
        .enumerate()
        .map(|(index, transaction)| score_match(certificate, transaction, index, config))
        .filter(|result| result.score >= min_score)
        .collect();

    // Stable sort: equal scores preserve candidate input order.
    results.sort_by(|a, b| b.score.cmp(&a.score));

    debug!(
        issuer = %certificate.issuer_name,
        candidates = transactions.len(),
        survivors = results.len(),
        "ranked certificate candidates"
    );

    results
}

/// Returns the single highest-scoring candidate above the configured
/// best-match threshold, or [`MatchOutcome::NoMatch`] when none qualifies.
///
/// An empty candidate set always yields `NoMatch`, never an error.
pub fn best_match(
    certificate: &WhtCertificate,
    transactions: &[TransactionForMatch],
    config: &MatchConfig,
) -> MatchOutcome {
    rank_matches(certificate, transactions, config, config.best_match_threshold)
        .into_iter()
        .next()
        .map_or(MatchOutcome::NoMatch, MatchOutcome::Match)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    use crate::config::{AmountTiers, DateTiers, NameThresholds, ScorerWeights};
    use crate::money::Money;

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

    fn transaction(
        description: &str,
        amount_major: i64,
        date: Option<NaiveDate>,
        tax_id: Option<&str>,
    ) -> TransactionForMatch {
        TransactionForMatch {
            description: description.to_string(),
            amount: Money::from_major(amount_major),
            date,
            counterparty_name: None,
            counterparty_tax_id: tax_id.map(str::to_string),
        }
    }

    fn strong_candidate() -> TransactionForMatch {
        TransactionForMatch {
            description: "Invoice settlement Acme Ltd".to_string(),
            amount: Money::from_major(1_000_000),
            date: NaiveDate::from_ymd_opt(2023, 4, 10),
            counterparty_name: Some("Acme Ltd".to_string()),
            counterparty_tax_id: Some("12345678-0001".to_string()),
        }
    }

    #[test]
    fn test_ranked_descending_with_threshold_filter() {
        let config = create_test_config();
        let transactions = vec![
            transaction("Unrelated haulage", 40_000, NaiveDate::from_ymd_opt(2021, 1, 1), None),
            strong_candidate(),
            // Same identifier only: 0.35.
            transaction("Misc payment", 10, None, Some("12345678-0001")),
        ];

        let ranked = rank_matches(&certificate(), &transactions, &config, config.min_score);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].transaction_index, 1);
        assert_eq!(ranked[0].score, Decimal::ONE);
        assert_eq!(ranked[1].transaction_index, 2);
        assert_eq!(ranked[1].score, dec("0.35"));
    }

    #[test]
    fn test_threshold_is_strict_below() {
        let config = create_test_config();
        let transactions = vec![transaction("Misc payment", 10, None, Some("12345678-0001"))];
        // A candidate exactly at the threshold survives.
        let ranked = rank_matches(&certificate(), &transactions, &config, dec("0.35"));
        assert_eq!(ranked.len(), 1);
        // One notch above and it is discarded.
        let ranked = rank_matches(&certificate(), &transactions, &config, dec("0.36"));
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_equal_scores_preserve_input_order() {
        let config = create_test_config();
        // Two byte-identical candidates necessarily score the same.
        let first = transaction("Misc payment A", 10, None, Some("12345678-0001"));
        let second = transaction("Misc payment B", 10, None, Some("12345678-0001"));
        let ranked = rank_matches(
            &certificate(),
            &[first.clone(), second.clone()],
            &config,
            config.min_score,
        );
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].transaction_index, 0);
        assert_eq!(ranked[1].transaction_index, 1);

        // Swapping the listing order swaps the tie order but not the
        // individually computed scores.
        let swapped = rank_matches(&certificate(), &[second, first], &config, config.min_score);
        assert_eq!(swapped[0].transaction_index, 0);
        assert_eq!(swapped[0].score, ranked[0].score);
        assert_eq!(swapped[1].score, ranked[1].score);
    }

    #[test]
    fn test_best_match_returns_highest_scorer() {
        let config = create_test_config();
        let transactions = vec![
            transaction("Misc payment", 10, None, Some("12345678-0001")),
            strong_candidate(),
        ];
        let outcome = best_match(&certificate(), &transactions, &config);
        let result = outcome.into_match().unwrap();
        assert_eq!(result.transaction_index, 1);
        assert_eq!(result.score, Decimal::ONE);
    }

    #[test]
    fn test_best_match_below_threshold_is_no_match() {
        let config = create_test_config();
        // Identifier-only candidate scores 0.35, under the 0.75 threshold.
        let transactions = vec![transaction("Misc payment", 10, None, Some("12345678-0001"))];
        assert_eq!(best_match(&certificate(), &transactions, &config), MatchOutcome::NoMatch);
    }

    #[test]
    fn test_best_match_over_empty_candidates_is_no_match() {
        let config = create_test_config();
        assert_eq!(best_match(&certificate(), &[], &config), MatchOutcome::NoMatch);
    }
}
