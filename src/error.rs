//! Error types.
//!
//! Per-slot conflicts are not errors: they are recorded in the
//! [`GenerationResult`](crate::models::GenerationResult). This enum covers
//! configuration mistakes (unknown codes in roster data) and engine misuse.

use thiserror::Error;

use crate::validation::PreconditionReport;

/// Errors surfaced by parsing and by the allocation engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AllocationError {
    /// A contract-category code outside `A, P, N, F, O, V`.
    #[error("unknown contract category: {0:?}")]
    UnknownCategory(String),

    /// A weekday name that does not map to Monday..Saturday.
    #[error("unknown weekday: {0:?}")]
    UnknownWeekday(String),

    /// A shift name other than morning, afternoon or evening.
    #[error("unknown shift: {0:?}")]
    UnknownShift(String),

    /// A lesson kind other than regular or occasional.
    #[error("unknown lesson kind: {0:?}")]
    UnknownLessonKind(String),

    /// The input failed precondition checks; no slot was visited.
    #[error("preconditions failed: {}", .0.codes().join(", "))]
    PreconditionsFailed(PreconditionReport),

    /// The engine already completed its single run.
    #[error("allocation engine already completed a run")]
    AlreadyCompleted,
}

/// Convenience alias for results carrying an [`AllocationError`].
pub type Result<T> = std::result::Result<T, AllocationError>;
