//! Greedy teacher allocation and run statistics.
//!
//! Provides the per-slot constraint evaluator, the candidate selector,
//! the one-shot allocation engine, and reporting metrics.
//!
//! # Algorithm
//!
//! `AllocationEngine` is a single-pass greedy heuristic: slots are visited
//! in caller order and each goes to the best-ranked eligible teacher.
//! There is no backtracking and no global optimization.
//!
//! # Statistics
//!
//! `AllocationKpi` reports fill rate, per-category counts and per-teacher
//! utilization of a finished run.

mod config;
mod constraints;
mod engine;
mod selector;
mod stats;

pub use config::AllocationConfig;
pub use constraints::{BookingIndex, ConstraintEvaluator};
pub use engine::{allocate, AllocationEngine, EngineState};
pub use selector::{CandidateSelector, Ranking};
pub use stats::{assignments_by_category, AllocationKpi, TeacherLoad};
