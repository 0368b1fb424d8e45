//! Built-in priority rules.
//!
//! - **CATEGORY**: statutory contract-category rank
//! - **LEAST_LOADED**: fewer lessons already assigned first
//!
//! # Score Convention
//! All rules return lower scores for higher priority teachers.

use super::{category_rank, PriorityRule, RuleScore};
use crate::models::TeacherCandidate;

/// Contract-category rank.
///
/// A before P/N/F before O before V.
#[derive(Debug, Clone, Copy)]
pub struct CategoryRank;

impl PriorityRule for CategoryRank {
    fn name(&self) -> &'static str {
        "CATEGORY"
    }

    fn evaluate(&self, teacher: &TeacherCandidate) -> RuleScore {
        RuleScore::from(category_rank(teacher.category))
    }

    fn description(&self) -> &'static str {
        "Statutory contract-category rank"
    }
}

/// Least lessons already assigned.
///
/// Spreads regular workload evenly among equally-ranked teachers.
#[derive(Debug, Clone, Copy)]
pub struct LeastLoaded;

impl PriorityRule for LeastLoaded {
    fn name(&self) -> &'static str {
        "LEAST_LOADED"
    }

    fn evaluate(&self, teacher: &TeacherCandidate) -> RuleScore {
        RuleScore::from(teacher.assigned_lessons)
    }

    fn description(&self) -> &'static str {
        "Fewest lessons already assigned"
    }
}
