//! Input validation for allocation runs.
//!
//! Two layers:
//!
//! - [`check_preconditions`] gates a run: is there any demand, any roster,
//!   and any teacher below their workload ceiling. It returns a report and
//!   never fails.
//! - [`validate_input`] checks structural integrity of the roster and the
//!   demand. Detects:
//!   - Duplicate teacher or slot IDs
//!   - Two slots of one class in the same (day, shift, period)
//!   - Period numbers outside 1..=10
//!   - Teachers already assigned beyond their ceiling
//!   - Workload ceilings not permitted by the teacher's career track

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::models::{ScheduleSlot, TeacherCandidate};

/// Highest lesson period number a shift may hold.
pub const MAX_PERIOD: u8 = 10;

/// A reason a run must not start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PreconditionViolation {
    /// The slot demand is empty; no work to do.
    NoSlots,
    /// The roster is empty; nothing to allocate with.
    NoTeachers,
    /// Every teacher has reached their workload ceiling.
    NoTeacherCapacity,
}

/// Outcome of the precondition gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreconditionReport {
    /// Whether the run may start.
    pub is_valid: bool,
    /// Violations found, in check order.
    pub violations: Vec<PreconditionViolation>,
}

impl PreconditionViolation {
    /// Stable code for operators and logs.
    pub fn code(&self) -> &'static str {
        match self {
            PreconditionViolation::NoSlots => "ERR_NO_SLOTS",
            PreconditionViolation::NoTeachers => "ERR_NO_TEACHERS",
            PreconditionViolation::NoTeacherCapacity => "ERR_NO_TEACHER_CAPACITY",
        }
    }

    /// Operator-facing message.
    pub fn message(&self) -> &'static str {
        match self {
            PreconditionViolation::NoSlots => "no schedule slots to process",
            PreconditionViolation::NoTeachers => "no teachers in the roster",
            PreconditionViolation::NoTeacherCapacity => "every teacher is at full workload",
        }
    }
}

impl fmt::Display for PreconditionViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl PreconditionReport {
    /// Builds a report; valid iff `violations` is empty.
    pub fn from_violations(violations: Vec<PreconditionViolation>) -> Self {
        Self {
            is_valid: violations.is_empty(),
            violations,
        }
    }

    /// Violation codes in check order.
    pub fn codes(&self) -> Vec<&'static str> {
        self.violations.iter().map(|v| v.code()).collect()
    }

    /// Whether a given violation was reported.
    pub fn has(&self, violation: PreconditionViolation) -> bool {
        self.violations.contains(&violation)
    }
}

/// Checks whether an allocation run can start.
///
/// Never fails: the caller decides whether to proceed, abort, or show the
/// violations to an operator. Any teacher below their workload ceiling
/// counts as capacity, category V included. An empty roster reports both
/// [`NoTeachers`](PreconditionViolation::NoTeachers) and
/// [`NoTeacherCapacity`](PreconditionViolation::NoTeacherCapacity).
pub fn check_preconditions(
    slots: &[ScheduleSlot],
    teachers: &[TeacherCandidate],
) -> PreconditionReport {
    let mut violations = Vec::new();

    if slots.is_empty() {
        violations.push(PreconditionViolation::NoSlots);
    }

    if teachers.is_empty() {
        violations.push(PreconditionViolation::NoTeachers);
    }

    if !teachers.iter().any(TeacherCandidate::has_headroom) {
        violations.push(PreconditionViolation::NoTeacherCapacity);
    }

    PreconditionReport::from_violations(violations)
}

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two teachers or two slots share the same ID.
    DuplicateId,
    /// Two slots of one class occupy the same (day, shift, period).
    SlotCollision,
    /// A slot's period number is outside 1..=[`MAX_PERIOD`].
    InvalidPeriod,
    /// A teacher is already assigned more lessons than the ceiling.
    OverAssigned,
    /// A workload ceiling not allowed for the teacher's career.
    InvalidWorkloadCeiling,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates roster and demand integrity.
///
/// Checks:
/// 1. No duplicate teacher IDs
/// 2. No assigned count above the ceiling
/// 3. Ceiling permitted by the career track (when one is set)
/// 4. No duplicate slot IDs
/// 5. Period numbers within 1..=10
/// 6. No two slots of one class in the same (day, shift, period)
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(slots: &[ScheduleSlot], teachers: &[TeacherCandidate]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut teacher_ids = HashSet::new();
    for t in teachers {
        if !teacher_ids.insert(t.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate teacher ID: {}", t.id),
            ));
        }

        if t.assigned_lessons > t.workload_ceiling {
            errors.push(ValidationError::new(
                ValidationErrorKind::OverAssigned,
                format!(
                    "Teacher '{}' has {} lessons assigned over a ceiling of {}",
                    t.id, t.assigned_lessons, t.workload_ceiling
                ),
            ));
        }

        if let Some(career) = t.career {
            if !career.allowed_ceilings().contains(&t.workload_ceiling) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidWorkloadCeiling,
                    format!(
                        "Teacher '{}' has ceiling {} not allowed for career {:?} (allowed: {:?})",
                        t.id,
                        t.workload_ceiling,
                        career,
                        career.allowed_ceilings()
                    ),
                ));
            }
        }
    }

    let mut slot_ids = HashSet::new();
    let mut class_cells = HashSet::new();
    for s in slots {
        if !slot_ids.insert(s.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate slot ID: {}", s.id),
            ));
        }

        if s.period == 0 || s.period > MAX_PERIOD {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidPeriod,
                format!(
                    "Slot '{}' has period {} outside 1..={MAX_PERIOD}",
                    s.id, s.period
                ),
            ));
        }

        if !class_cells.insert((s.class_id.as_str(), s.day, s.shift, s.period)) {
            errors.push(ValidationError::new(
                ValidationErrorKind::SlotCollision,
                format!(
                    "Slot '{}' collides with another slot of class '{}' at {} {} period {}",
                    s.id, s.class_id, s.day, s.shift, s.period
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
