//! Statutory priority model for teacher candidates.
//!
//! Ranks teachers by contract category first and current load second.
//! Rules are composable: the [`RuleEngine`] applies them in sequence and
//! consults the next rule only on ties.
//!
//! # Usage
//!
//! ```
//! use u_allocate::dispatching::{rules, RuleEngine};
//!
//! let engine = RuleEngine::new()
//!     .with_rule(rules::CategoryRank)
//!     .with_rule(rules::LeastLoaded);
//! // let ranked = engine.sort(&candidates);
//! ```
//!
//! # Rank Table
//!
//! | Category | Rank | Meaning |
//! |----------|------|---------|
//! | A | 1 | Tenured |
//! | P, N, F | 2 | Stable / permanent-function |
//! | O | 3 | Fixed-term contracted |
//! | V | 4 | Occasional |
//! | unrecognized code | 5 | Never expected in valid input |

mod engine;
pub mod rules;

pub use engine::RuleEngine;

use crate::models::{ContractCategory, TeacherCandidate};
use std::fmt::Debug;

/// Score returned by a priority rule.
///
/// Lower scores = higher priority (assigned first).
pub type RuleScore = i64;

/// Rank given to a raw category code outside the closed enumeration.
pub const UNRECOGNIZED_RANK: u8 = 5;

/// Category → rank table, in declaration order of [`ContractCategory`].
pub const RANK_TABLE: [(ContractCategory, u8); 6] = [
    (ContractCategory::A, 1),
    (ContractCategory::P, 2),
    (ContractCategory::N, 2),
    (ContractCategory::F, 2),
    (ContractCategory::O, 3),
    (ContractCategory::V, 4),
];

/// A rule that scores teacher priority.
///
/// # Score Convention
/// **Lower score = higher priority.**
pub trait PriorityRule: Send + Sync + Debug {
    /// Rule name (e.g., "CATEGORY").
    fn name(&self) -> &'static str;

    /// Scores one teacher.
    fn evaluate(&self, teacher: &TeacherCandidate) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// Statutory rank of a contract category (lower = higher priority).
pub fn category_rank(category: ContractCategory) -> u8 {
    match category {
        ContractCategory::A => 1,
        ContractCategory::P | ContractCategory::N | ContractCategory::F => 2,
        ContractCategory::O => 3,
        ContractCategory::V => 4,
    }
}

/// Rank of a raw category code as found in roster data.
///
/// Codes must match exactly; anything else ranks [`UNRECOGNIZED_RANK`].
pub fn rank_code(code: &str) -> u8 {
    RANK_TABLE
        .iter()
        .find(|(c, _)| c.code() == code)
        .map(|&(_, rank)| rank)
        .unwrap_or(UNRECOGNIZED_RANK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_table_matches_match_arms() {
        assert_eq!(RANK_TABLE.len(), ContractCategory::ALL.len());
        for (i, category) in ContractCategory::ALL.into_iter().enumerate() {
            assert_eq!(RANK_TABLE[i].0, category);
            assert_eq!(RANK_TABLE[i].1, category_rank(category));
        }
    }

    #[test]
    fn test_rank_values() {
        assert_eq!(category_rank(ContractCategory::A), 1);
        assert_eq!(category_rank(ContractCategory::P), 2);
        assert_eq!(category_rank(ContractCategory::N), 2);
        assert_eq!(category_rank(ContractCategory::F), 2);
        assert_eq!(category_rank(ContractCategory::O), 3);
        assert_eq!(category_rank(ContractCategory::V), 4);
    }

    #[test]
    fn test_rank_code() {
        assert_eq!(rank_code("A"), 1);
        assert_eq!(rank_code("F"), 2);
        assert_eq!(rank_code("V"), 4);
        assert_eq!(rank_code("X"), UNRECOGNIZED_RANK);
        assert_eq!(rank_code(""), UNRECOGNIZED_RANK);
        assert_eq!(rank_code("a"), UNRECOGNIZED_RANK);
    }

    #[test]
    fn test_unrecognized_ranks_below_every_category() {
        for category in ContractCategory::ALL {
            assert!(category_rank(category) < UNRECOGNIZED_RANK);
        }
    }
}
