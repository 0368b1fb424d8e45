//! Greedy, priority-driven allocation engine.
//!
//! # Algorithm
//!
//! 1. Gate the run with the precondition check (optional).
//! 2. Copy the roster into a run-scoped workspace.
//! 3. For each slot, in the order given by the caller:
//!    rank eligible teachers, commit the best one and bump its load, or
//!    record a conflict. A conflicted slot is never revisited.
//! 4. Compute aggregate counts.
//!
//! Slot order is part of the contract: earlier slots consume workload
//! and periods first, so reordering the demand can change the outcome.
//! The engine never sorts slots.
//!
//! # Complexity
//! O(s · t · log t) where s = slots, t = teachers. Double-booking checks
//! are O(1) through the booking index.

use tracing::{debug, info, instrument, warn};

use super::config::AllocationConfig;
use super::constraints::{BookingIndex, ConstraintEvaluator};
use super::selector::CandidateSelector;
use crate::dispatching::RuleEngine;
use crate::error::{AllocationError, Result};
use crate::models::{Assignment, Conflict, GenerationResult, ScheduleSlot, TeacherCandidate};
use crate::validation::check_preconditions;

/// Lifecycle of an engine. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// No run started yet.
    Idle,
    /// Iterating slots.
    Running,
    /// Result available; the engine cannot run again.
    Completed,
}

/// Mutable state owned by a single run.
///
/// Holds the engine's private copy of the roster (whose
/// `assigned_lessons` it increments) and the booking index.
#[derive(Debug)]
struct RunWorkspace {
    roster: Vec<TeacherCandidate>,
    bookings: BookingIndex,
}

impl RunWorkspace {
    fn new(teachers: &[TeacherCandidate]) -> Self {
        Self {
            roster: teachers.to_vec(),
            bookings: BookingIndex::new(),
        }
    }

    /// Commits a roster entry to a slot and returns its teacher ID.
    fn commit(&mut self, index: usize, slot: &ScheduleSlot) -> &str {
        let teacher = &mut self.roster[index];
        teacher.assigned_lessons += 1;
        self.bookings.book(&teacher.id, slot);
        &teacher.id
    }
}

/// One-shot allocation engine.
///
/// # Example
///
/// ```
/// use u_allocate::allocation::{AllocationConfig, AllocationEngine};
/// use u_allocate::models::{ContractCategory, ScheduleSlot, TeacherCandidate};
///
/// let teachers = vec![
///     TeacherCandidate::new("T1", ContractCategory::A, 32)
///         .with_subject("MAT")
///         .with_school("S1"),
/// ];
/// let slots = vec![ScheduleSlot::new("SL1", "7A", "MAT", "S1")];
///
/// let mut engine = AllocationEngine::new(AllocationConfig::default());
/// let result = engine.run(&teachers, &slots).unwrap();
/// assert_eq!(result.stats.filled, 1);
/// assert_eq!(result.assignments[0].teacher_id, "T1");
/// ```
#[derive(Debug, Clone)]
pub struct AllocationEngine {
    config: AllocationConfig,
    rule_engine: RuleEngine,
    state: EngineState,
    result: Option<GenerationResult>,
}

impl AllocationEngine {
    /// Creates an idle engine with the statutory ranking.
    pub fn new(config: AllocationConfig) -> Self {
        Self {
            config,
            rule_engine: RuleEngine::statutory(),
            state: EngineState::Idle,
            result: None,
        }
    }

    /// Replaces the ranking rules.
    pub fn with_rule_engine(mut self, rule_engine: RuleEngine) -> Self {
        self.rule_engine = rule_engine;
        self
    }

    /// Run configuration.
    pub fn config(&self) -> &AllocationConfig {
        &self.config
    }

    /// Current lifecycle state.
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Result of the completed run, if any.
    pub fn result(&self) -> Option<&GenerationResult> {
        self.result.as_ref()
    }

    /// Consumes the engine, yielding the result of the completed run.
    pub fn into_result(self) -> Option<GenerationResult> {
        self.result
    }

    /// Allocates teachers to slots.
    ///
    /// `teachers` is read only; the run works on its own copy. Slots are
    /// visited in the given order.
    ///
    /// # Errors
    /// - [`AllocationError::PreconditionsFailed`] when the precondition
    ///   gate is enabled and reports violations. The engine stays idle.
    /// - [`AllocationError::AlreadyCompleted`] on a second call.
    #[instrument(
        name = "allocation_run",
        skip_all,
        fields(
            slots = slots.len(),
            teachers = teachers.len(),
            lesson_kind = %self.config.lesson_kind,
        )
    )]
    pub fn run(
        &mut self,
        teachers: &[TeacherCandidate],
        slots: &[ScheduleSlot],
    ) -> Result<&GenerationResult> {
        if self.state != EngineState::Idle {
            return Err(AllocationError::AlreadyCompleted);
        }

        if self.config.check_preconditions {
            let report = check_preconditions(slots, teachers);
            if !report.is_valid {
                for violation in &report.violations {
                    warn!(code = violation.code(), "{}", violation.message());
                }
                return Err(AllocationError::PreconditionsFailed(report));
            }
        }

        self.state = EngineState::Running;
        info!("allocation run started");

        let selector = CandidateSelector::new(ConstraintEvaluator::new(self.config.lesson_kind))
            .with_rule_engine(self.rule_engine.clone());
        let mut workspace = RunWorkspace::new(teachers);
        let mut result = GenerationResult::new();

        for slot in slots {
            let ranking = selector.rank(slot, &workspace.roster, &workspace.bookings);

            match ranking.best() {
                Some(index) => {
                    let teacher_id = workspace.commit(index, slot);
                    debug!(
                        slot = %slot.id,
                        teacher = %teacher_id,
                        candidates = ranking.indices.len(),
                        "slot filled"
                    );
                    result.add_assignment(Assignment::new(
                        &slot.id,
                        teacher_id,
                        self.config.lesson_kind,
                    ));
                }
                None => {
                    warn!(
                        slot = %slot.id,
                        subject = %slot.subject_id,
                        school = %slot.school_id,
                        dominant = ?ranking.rejections.dominant(),
                        "no eligible teacher"
                    );
                    result.add_conflict(Conflict::no_eligible_teacher(
                        &slot.id,
                        ranking.rejections,
                    ));
                }
            }
        }

        result.finalize(slots.len());
        info!(
            filled = result.stats.filled,
            conflicted = result.stats.conflicted,
            unfilled = result.stats.unfilled,
            "allocation run completed"
        );

        self.state = EngineState::Completed;
        let result: &GenerationResult = self.result.insert(result);
        Ok(result)
    }
}

/// Runs a fresh engine once and returns its result.
pub fn allocate(
    config: AllocationConfig,
    teachers: &[TeacherCandidate],
    slots: &[ScheduleSlot],
) -> Result<GenerationResult> {
    let mut engine = AllocationEngine::new(config);
    let result = engine.run(teachers, slots)?.clone();
    Ok(result)
}
