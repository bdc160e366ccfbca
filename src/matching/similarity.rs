//! Text similarity for the name-matching signal.
//!
//! Similarity is `1 − (edit distance / max length)` over case-folded,
//! trimmed strings. A containment relationship (one string fully contains
//! the other) short-circuits to a configured high similarity without
//! computing edit distance. Certificate and transaction text fields are
//! short, so the classic dynamic-programming table is kept to two rows:
//! O(len_a × len_b) time, O(min(len_a, len_b)) space.

use rust_decimal::Decimal;

/// Canonical form used for all name comparisons: trimmed and case-folded.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Levenshtein edit distance over characters, two-row dynamic programming.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    // Keep the rows as short as the shorter string.
    let (longer, shorter) = if a.len() >= b.len() { (&a, &b) } else { (&b, &a) };

    if shorter.is_empty() {
        return longer.len();
    }

    let mut prev: Vec<usize> = (0..=shorter.len()).collect();
    let mut curr: Vec<usize> = vec![0; shorter.len() + 1];

    for (i, &ch_long) in longer.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &ch_short) in shorter.iter().enumerate() {
            let substitution = if ch_long == ch_short { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1)
                .min(curr[j] + 1)
                .min(prev[j] + substitution);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[shorter.len()]
}

/// Normalized similarity between two name strings in `[0, 1]`.
///
/// Both inputs are normalized first. Two empty strings carry no evidence
/// and score zero. When one non-empty string fully contains the other the
/// result is `containment_similarity` without computing edit distance;
/// otherwise it is `1 − distance / max(len_a, len_b)`.
///
/// # Example
///
/// ```
/// use taxcore::matching::name_similarity;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let contained = Decimal::from_str("0.9").unwrap();
/// assert_eq!(name_similarity("Acme Ltd", "ACME LTD", contained), Decimal::ONE);
/// assert_eq!(name_similarity("Acme", "Payment to Acme Ltd", contained), contained);
/// ```
pub fn name_similarity(a: &str, b: &str, containment_similarity: Decimal) -> Decimal {
    let a = normalize(a);
    let b = normalize(b);

    if a.is_empty() || b.is_empty() {
        return Decimal::ZERO;
    }
    if a == b {
        return Decimal::ONE;
    }
    if a.contains(&b) || b.contains(&a) {
        return containment_similarity;
    }

    let distance = edit_distance(&a, &b);
    let max_len = a.chars().count().max(b.chars().count());
    Decimal::ONE - Decimal::from(distance) / Decimal::from(max_len)
}
