//! Per-slot eligibility constraints.
//!
//! A teacher may take a slot only when all six rules hold:
//!
//! 1. qualified for the slot's subject
//! 2. affiliated with the slot's school
//! 3. available on the slot's (day, shift); no record means available
//! 4. one more lesson stays within the workload ceiling
//! 5. not already booked at the slot's (day, period)
//! 6. category admits the run's lesson kind (V is occasional-only)
//!
//! The rules are independent. A rejection names the first rule that failed,
//! so a category V teacher at full load is reported as exhausted rather
//! than restricted.

use std::collections::{HashMap, HashSet};

use crate::models::{
    Assignment, Ineligibility, LessonKind, ScheduleSlot, TeacherCandidate, Weekday,
};

/// Committed (teacher, day, period) bookings of a run.
///
/// Keyed on day and period only: a teacher holding period 2 on Monday
/// morning is also blocked from period 2 on Monday evening.
#[derive(Debug, Clone, Default)]
pub struct BookingIndex {
    by_teacher: HashMap<String, HashSet<(Weekday, u8)>>,
}

impl BookingIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the index from committed assignments.
    ///
    /// Assignments referencing a slot missing from `slots` are ignored.
    pub fn from_assignments(assignments: &[Assignment], slots: &[ScheduleSlot]) -> Self {
        let slot_by_id: HashMap<&str, &ScheduleSlot> =
            slots.iter().map(|s| (s.id.as_str(), s)).collect();

        let mut index = Self::new();
        for a in assignments {
            if let Some(slot) = slot_by_id.get(a.slot_id.as_str()) {
                index.book(&a.teacher_id, slot);
            }
        }
        index
    }

    /// Records that a teacher holds a slot's (day, period).
    ///
    /// Returns `false` if the teacher was already booked there.
    pub fn book(&mut self, teacher_id: &str, slot: &ScheduleSlot) -> bool {
        self.by_teacher
            .entry(teacher_id.to_string())
            .or_default()
            .insert(slot.time_key())
    }

    /// Whether a teacher already holds the slot's (day, period).
    pub fn is_booked(&self, teacher_id: &str, slot: &ScheduleSlot) -> bool {
        self.by_teacher
            .get(teacher_id)
            .is_some_and(|keys| keys.contains(&slot.time_key()))
    }

    /// Number of bookings held by a teacher.
    pub fn bookings_for(&self, teacher_id: &str) -> usize {
        self.by_teacher.get(teacher_id).map_or(0, HashSet::len)
    }

    /// Total bookings.
    pub fn len(&self) -> usize {
        self.by_teacher.values().map(HashSet::len).sum()
    }

    /// Whether no booking is recorded.
    pub fn is_empty(&self) -> bool {
        self.by_teacher.values().all(HashSet::is_empty)
    }
}

/// Decides whether a teacher may take a slot in a run of a given kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstraintEvaluator {
    lesson_kind: LessonKind,
}

impl ConstraintEvaluator {
    /// Creates an evaluator for a run of the given lesson kind.
    pub fn new(lesson_kind: LessonKind) -> Self {
        Self { lesson_kind }
    }

    /// Lesson kind this evaluator checks against.
    pub fn lesson_kind(&self) -> LessonKind {
        self.lesson_kind
    }

    /// Checks every rule, returning the first one that fails.
    pub fn check(
        &self,
        teacher: &TeacherCandidate,
        slot: &ScheduleSlot,
        bookings: &BookingIndex,
    ) -> Result<(), Ineligibility> {
        if !teacher.teaches(&slot.subject_id) {
            return Err(Ineligibility::SubjectMismatch);
        }
        if !teacher.belongs_to(&slot.school_id) {
            return Err(Ineligibility::NotAffiliated);
        }
        if !teacher.is_available(slot.day, slot.shift) {
            return Err(Ineligibility::Unavailable);
        }
        if teacher.assigned_lessons.saturating_add(1) > teacher.workload_ceiling {
            return Err(Ineligibility::WorkloadExhausted);
        }
        if bookings.is_booked(&teacher.id, slot) {
            return Err(Ineligibility::DoubleBooked);
        }
        if !self.category_allowed(teacher) {
            return Err(Ineligibility::CategoryNotAllowed);
        }
        Ok(())
    }

    /// Whether the teacher passes every rule.
    pub fn is_eligible(
        &self,
        teacher: &TeacherCandidate,
        slot: &ScheduleSlot,
        bookings: &BookingIndex,
    ) -> bool {
        self.check(teacher, slot, bookings).is_ok()
    }

    /// Whether the teacher's category may take this run's lessons.
    pub fn category_allowed(&self, teacher: &TeacherCandidate) -> bool {
        match self.lesson_kind {
            LessonKind::Regular => teacher.category.allows_regular(),
            LessonKind::Occasional => true,
        }
    }
}
