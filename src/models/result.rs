//! Allocation result model.
//!
//! A generation result is the sole output of a run: the assignments made,
//! the slots that stayed empty, and aggregate counts.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::AllocationError;

/// Kind of lesson a run allocates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LessonKind {
    /// Recurring timetable lessons.
    #[default]
    Regular,
    /// Substitute or occasional cover.
    Occasional,
}

/// A slot filled by a teacher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Filled slot.
    pub slot_id: String,
    /// Assigned teacher.
    pub teacher_id: String,
    /// Lesson kind of the run that made the assignment.
    pub lesson_kind: LessonKind,
}

/// Why a teacher was rejected for a slot.
///
/// Variants are ordered the way the checks run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ineligibility {
    /// Not qualified for the slot's subject.
    SubjectMismatch,
    /// Not affiliated with the slot's school.
    NotAffiliated,
    /// Marked unavailable for the slot's (day, shift).
    Unavailable,
    /// One more lesson would exceed the workload ceiling.
    WorkloadExhausted,
    /// Already teaching at the same (day, period).
    DoubleBooked,
    /// Category V offered a regular lesson.
    CategoryNotAllowed,
}

/// Per-rule rejection counts for one slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RejectionSummary(BTreeMap<Ineligibility, usize>);

/// Reason a slot stayed unfilled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConflictReason {
    /// No teacher in the roster passed every constraint.
    NoEligibleTeacher,
}

/// A slot that could not be filled in this run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    /// Unfilled slot.
    pub slot_id: String,
    /// Reason code.
    pub reason: ConflictReason,
    /// How many teachers each rule turned away.
    #[serde(default)]
    pub rejections: RejectionSummary,
}

/// Aggregate counts of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Slots in the demand.
    pub total_slots: usize,
    /// Slots with an assignment.
    pub filled: usize,
    /// Conflict records produced.
    pub conflicted: usize,
    /// Slots left without a teacher.
    pub unfilled: usize,
}

/// Complete output of one allocation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    /// Assignments in slot-processing order.
    pub assignments: Vec<Assignment>,
    /// Unfilled slots in slot-processing order.
    pub conflicts: Vec<Conflict>,
    /// Aggregate counts.
    pub stats: GenerationStats,
}

impl LessonKind {
    /// Upper-case name as used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            LessonKind::Regular => "REGULAR",
            LessonKind::Occasional => "OCCASIONAL",
        }
    }
}

impl fmt::Display for LessonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LessonKind {
    type Err = AllocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "REGULAR" => Ok(LessonKind::Regular),
            "OCCASIONAL" | "SUBSTITUTE" => Ok(LessonKind::Occasional),
            _ => Err(AllocationError::UnknownLessonKind(s.to_string())),
        }
    }
}

impl Assignment {
    /// Creates an assignment.
    pub fn new(
        slot_id: impl Into<String>,
        teacher_id: impl Into<String>,
        lesson_kind: LessonKind,
    ) -> Self {
        Self {
            slot_id: slot_id.into(),
            teacher_id: teacher_id.into(),
            lesson_kind,
        }
    }
}

impl Ineligibility {
    /// Short operator-facing description.
    pub fn describe(&self) -> &'static str {
        match self {
            Ineligibility::SubjectMismatch => "does not teach the subject",
            Ineligibility::NotAffiliated => "not affiliated with the school",
            Ineligibility::Unavailable => "unavailable on this day and shift",
            Ineligibility::WorkloadExhausted => "workload ceiling reached",
            Ineligibility::DoubleBooked => "already teaching at this period",
            Ineligibility::CategoryNotAllowed => "category restricted to occasional lessons",
        }
    }
}

impl RejectionSummary {
    /// Creates an empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one rejection.
    pub fn record(&mut self, reason: Ineligibility) {
        *self.0.entry(reason).or_insert(0) += 1;
    }

    /// Rejections attributed to a rule.
    pub fn count(&self, reason: Ineligibility) -> usize {
        self.0.get(&reason).copied().unwrap_or(0)
    }

    /// Total rejections.
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    /// The rule that rejected the most teachers, if any.
    pub fn dominant(&self) -> Option<Ineligibility> {
        // Ties resolve to the earliest check.
        self.0
            .iter()
            .fold(None, |best: Option<(Ineligibility, usize)>, (&r, &n)| match best {
                Some((_, m)) if m >= n => best,
                _ => Some((r, n)),
            })
            .map(|(r, _)| r)
    }

    /// Iterates (rule, count) pairs in check order.
    pub fn iter(&self) -> impl Iterator<Item = (Ineligibility, usize)> + '_ {
        self.0.iter().map(|(&r, &n)| (r, n))
    }
}

impl ConflictReason {
    /// Stable reason code.
    pub fn code(&self) -> &'static str {
        match self {
            ConflictReason::NoEligibleTeacher => "NO_ELIGIBLE_TEACHER",
        }
    }

    /// Operator-facing message.
    pub fn message(&self) -> &'static str {
        match self {
            ConflictReason::NoEligibleTeacher => "no eligible teacher for this subject/slot",
        }
    }
}

impl Conflict {
    /// Creates a no-eligible-teacher conflict.
    pub fn no_eligible_teacher(slot_id: impl Into<String>, rejections: RejectionSummary) -> Self {
        Self {
            slot_id: slot_id.into(),
            reason: ConflictReason::NoEligibleTeacher,
            rejections,
        }
    }
}

impl GenerationStats {
    /// Fraction of slots filled (1.0 for empty demand).
    pub fn fill_rate(&self) -> f64 {
        if self.total_slots == 0 {
            1.0
        } else {
            self.filled as f64 / self.total_slots as f64
        }
    }
}

impl GenerationResult {
    /// Creates an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an assignment.
    pub fn add_assignment(&mut self, assignment: Assignment) {
        self.assignments.push(assignment);
    }

    /// Appends a conflict.
    pub fn add_conflict(&mut self, conflict: Conflict) {
        self.conflicts.push(conflict);
    }

    /// Recomputes the aggregate counts for a demand of `total_slots`.
    pub fn finalize(&mut self, total_slots: usize) {
        let filled = self.assignments.len();
        self.stats = GenerationStats {
            total_slots,
            filled,
            conflicted: self.conflicts.len(),
            unfilled: total_slots.saturating_sub(filled),
        };
    }

    /// Whether every slot was filled.
    pub fn is_complete(&self) -> bool {
        self.stats.unfilled == 0
    }

    /// Finds the assignment for a slot.
    pub fn assignment_for_slot(&self, slot_id: &str) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.slot_id == slot_id)
    }

    /// All assignments of a teacher, in processing order.
    pub fn assignments_for_teacher(&self, teacher_id: &str) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.teacher_id == teacher_id)
            .collect()
    }

    /// Finds the conflict recorded for a slot.
    pub fn conflict_for_slot(&self, slot_id: &str) -> Option<&Conflict> {
        self.conflicts.iter().find(|c| c.slot_id == slot_id)
    }
}
