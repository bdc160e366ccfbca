//! Withholding-tax certificate reconciliation.
//!
//! This module links WHT certificates to the financial transactions they
//! originated from using multi-signal scored matching: the scorer weighs
//! identifier equality, amount proximity, date proximity and name
//! similarity for one certificate/transaction pair, and the ranker applies
//! it across a candidate set with threshold filtering and deterministic
//! ordering.

mod ranker;
mod scorer;
mod similarity;

pub use ranker::{MatchOutcome, best_match, rank_matches};
pub use scorer::score_match;
pub use similarity::{edit_distance, name_similarity, normalize};
