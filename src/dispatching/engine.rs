//! Rule engine for multi-criteria teacher ranking.
//!
//! Rules are applied in sequence; a later rule only decides when every
//! earlier rule tied. Teachers still tied after the last rule keep their
//! input order (the sort is stable), which keeps runs reproducible.

use std::cmp::Ordering;
use std::sync::Arc;

use super::{rules, PriorityRule};
use crate::models::TeacherCandidate;

/// A composable, sequential rule engine.
///
/// # Example
/// ```
/// use u_allocate::dispatching::RuleEngine;
/// use u_allocate::models::{ContractCategory, TeacherCandidate};
///
/// let a = TeacherCandidate::new("a", ContractCategory::A, 32).with_assigned(3);
/// let p = TeacherCandidate::new("p", ContractCategory::P, 32);
///
/// let ranked = RuleEngine::statutory().sort(vec![&p, &a]);
/// assert_eq!(ranked[0].id, "a");
/// ```
#[derive(Clone)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn PriorityRule>>,
}

impl RuleEngine {
    /// Creates an empty rule engine (every teacher ties).
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// The statutory ordering: category rank, then least loaded.
    pub fn statutory() -> Self {
        Self::new()
            .with_rule(rules::CategoryRank)
            .with_rule(rules::LeastLoaded)
    }

    /// Appends a rule; it decides only when all earlier rules tie.
    pub fn with_rule<R: PriorityRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Sorts teachers by priority (highest priority first).
    ///
    /// Returns indices into the original slice.
    pub fn sort_indices(&self, teachers: &[&TeacherCandidate]) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..teachers.len()).collect();
        indices.sort_by(|&a, &b| self.compare(teachers[a], teachers[b]));
        indices
    }

    /// Sorts teachers by priority (highest priority first).
    pub fn sort<'a>(&self, mut teachers: Vec<&'a TeacherCandidate>) -> Vec<&'a TeacherCandidate> {
        teachers.sort_by(|a, b| self.compare(a, b));
        teachers
    }

    /// Sequential comparison; `Equal` only when every rule ties.
    pub fn compare(&self, a: &TeacherCandidate, b: &TeacherCandidate) -> Ordering {
        for rule in &self.rules {
            match rule.evaluate(a).cmp(&rule.evaluate(b)) {
                Ordering::Equal => continue,
                decided => return decided,
            }
        }
        Ordering::Equal
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::statutory()
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field(
                "rules",
                &self.rules.iter().map(|r| r.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
