//! Candidate selection for a single slot.
//!
//! Filters the roster through the [`ConstraintEvaluator`] and ranks the
//! survivors with the priority [`RuleEngine`]. The roster is only read.

use super::constraints::{BookingIndex, ConstraintEvaluator};
use crate::dispatching::RuleEngine;
use crate::models::{RejectionSummary, ScheduleSlot, TeacherCandidate};

/// Ranked eligible teachers for one slot, as roster indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ranking {
    /// Roster indices of eligible teachers, best first.
    pub indices: Vec<usize>,
    /// Rejection counts for the teachers that were filtered out.
    pub rejections: RejectionSummary,
}

impl Ranking {
    /// Roster index of the best candidate.
    pub fn best(&self) -> Option<usize> {
        self.indices.first().copied()
    }

    /// Whether no teacher qualified.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Filters and ranks teachers for a slot.
#[derive(Debug, Clone, Default)]
pub struct CandidateSelector {
    evaluator: ConstraintEvaluator,
    ranking: RuleEngine,
}

impl CandidateSelector {
    /// Creates a selector with the statutory ranking.
    pub fn new(evaluator: ConstraintEvaluator) -> Self {
        Self {
            evaluator,
            ranking: RuleEngine::statutory(),
        }
    }

    /// Replaces the ranking rules.
    pub fn with_rule_engine(mut self, ranking: RuleEngine) -> Self {
        self.ranking = ranking;
        self
    }

    /// The evaluator used for filtering.
    pub fn evaluator(&self) -> &ConstraintEvaluator {
        &self.evaluator
    }

    /// Ranks eligible roster entries for a slot.
    pub fn rank(
        &self,
        slot: &ScheduleSlot,
        roster: &[TeacherCandidate],
        bookings: &BookingIndex,
    ) -> Ranking {
        let mut rejections = RejectionSummary::new();
        let mut eligible = Vec::new();

        for (i, teacher) in roster.iter().enumerate() {
            match self.evaluator.check(teacher, slot, bookings) {
                Ok(()) => eligible.push(i),
                Err(reason) => rejections.record(reason),
            }
        }

        let refs: Vec<&TeacherCandidate> = eligible.iter().map(|&i| &roster[i]).collect();
        let indices = self
            .ranking
            .sort_indices(&refs)
            .into_iter()
            .map(|k| eligible[k])
            .collect();

        Ranking {
            indices,
            rejections,
        }
    }

    /// Eligible teachers for a slot, best first. Empty when none qualify.
    pub fn select<'a>(
        &self,
        slot: &ScheduleSlot,
        roster: &'a [TeacherCandidate],
        bookings: &BookingIndex,
    ) -> Vec<&'a TeacherCandidate> {
        self.select_with_rejections(slot, roster, bookings).0
    }

    /// Like [`select`](Self::select), also returning why the others were
    /// filtered out.
    pub fn select_with_rejections<'a>(
        &self,
        slot: &ScheduleSlot,
        roster: &'a [TeacherCandidate],
        bookings: &BookingIndex,
    ) -> (Vec<&'a TeacherCandidate>, RejectionSummary) {
        let ranking = self.rank(slot, roster, bookings);
        let teachers = ranking.indices.iter().map(|&i| &roster[i]).collect();
        (teachers, ranking.rejections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContractCategory, Ineligibility, LessonKind, Shift, Weekday};

    fn make_teacher(id: &str, category: ContractCategory, assigned: u32) -> TeacherCandidate {
        TeacherCandidate::new(id, category, 20)
            .with_assigned(assigned)
            .with_subject("MAT")
            .with_school("S1")
    }

    fn slot() -> ScheduleSlot {
        ScheduleSlot::new("SL1", "7A", "MAT", "S1").at(Weekday::Monday, Shift::Morning, 1)
    }

    fn ids(teachers: &[&TeacherCandidate]) -> Vec<String> {
        teachers.iter().map(|t| t.id.clone()).collect()
    }

    #[test]
    fn test_filters_then_ranks() {
        let roster = vec![
            make_teacher("o", ContractCategory::O, 0),
            make_teacher("p_busy", ContractCategory::P, 8),
            TeacherCandidate::new("his", ContractCategory::A, 20)
                .with_subject("HIS")
                .with_school("S1"),
            make_teacher("p_idle", ContractCategory::P, 1),
            make_teacher("a", ContractCategory::A, 15),
        ];
        let selector = CandidateSelector::new(ConstraintEvaluator::new(LessonKind::Regular));

        let selected = selector.select(&slot(), &roster, &BookingIndex::new());
        assert_eq!(ids(&selected), vec!["a", "p_idle", "p_busy", "o"]);
    }

    #[test]
    fn test_empty_when_none_qualify() {
        let roster = vec![
            make_teacher("full", ContractCategory::A, 20),
            make_teacher("v", ContractCategory::V, 0),
        ];
        let selector = CandidateSelector::new(ConstraintEvaluator::new(LessonKind::Regular));

        let (selected, rejections) =
            selector.select_with_rejections(&slot(), &roster, &BookingIndex::new());
        assert!(selected.is_empty());
        assert_eq!(rejections.total(), 2);
        assert_eq!(rejections.count(Ineligibility::WorkloadExhausted), 1);
        assert_eq!(rejections.count(Ineligibility::CategoryNotAllowed), 1);
    }

    #[test]
    fn test_rank_returns_roster_indices() {
        let roster = vec![
            make_teacher("o", ContractCategory::O, 0),
            make_teacher("a", ContractCategory::A, 0),
        ];
        let selector = CandidateSelector::new(ConstraintEvaluator::new(LessonKind::Regular));

        let ranking = selector.rank(&slot(), &roster, &BookingIndex::new());
        assert_eq!(ranking.indices, vec![1, 0]);
        assert_eq!(ranking.best(), Some(1));
        assert!(!ranking.is_empty());
        assert_eq!(ranking.rejections.total(), 0);
    }

    #[test]
    fn test_roster_not_mutated() {
        let roster = vec![make_teacher("a", ContractCategory::A, 3)];
        let before = roster.clone();
        let selector = CandidateSelector::new(ConstraintEvaluator::new(LessonKind::Regular));
        let _ = selector.select(&slot(), &roster, &BookingIndex::new());
        assert_eq!(roster, before);
    }

    #[test]
    fn test_custom_rule_engine() {
        let roster = vec![
            make_teacher("o", ContractCategory::O, 0),
            make_teacher("a", ContractCategory::A, 0),
        ];
        let selector = CandidateSelector::new(ConstraintEvaluator::new(LessonKind::Regular))
            .with_rule_engine(RuleEngine::new());

        let selected = selector.select(&slot(), &roster, &BookingIndex::new());
        assert_eq!(ids(&selected), vec!["o", "a"]);
    }
}
