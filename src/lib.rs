//! Teacher allocation for the U-Engine ecosystem.
//!
//! Assigns teachers to weekly timetable slots across a network of schools,
//! honoring statutory contract-category priority, subject qualification,
//! school affiliation, availability, workload ceilings and double-booking.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `TeacherCandidate`, `ScheduleSlot`,
//!   `Assignment`, `Conflict`, `GenerationResult`
//! - **`dispatching`**: Priority model — category rank table, `RuleEngine`
//! - **`allocation`**: Constraint evaluation, candidate selection, the
//!   greedy `AllocationEngine`, and run statistics
//! - **`validation`**: Precondition gate and input integrity checks
//!
//! # Quick Start
//!
//! ```
//! use u_allocate::allocation::{allocate, AllocationConfig};
//! use u_allocate::models::{ContractCategory, ScheduleSlot, Shift, TeacherCandidate, Weekday};
//!
//! let teachers = vec![
//!     TeacherCandidate::new("ana", ContractCategory::A, 32)
//!         .with_subject("MAT")
//!         .with_school("E1"),
//! ];
//! let slots = vec![
//!     ScheduleSlot::new("7A-mon-1", "7A", "MAT", "E1").at(Weekday::Monday, Shift::Morning, 1),
//!     ScheduleSlot::new("7A-mon-2", "7A", "HIS", "E1").at(Weekday::Monday, Shift::Morning, 2),
//! ];
//!
//! let result = allocate(AllocationConfig::default(), &teachers, &slots).unwrap();
//! assert_eq!(result.stats.filled, 1);
//! assert_eq!(result.stats.unfilled, 1);
//! ```
//!
//! # Logging
//!
//! Runs emit `tracing` events (span `allocation_run`). The crate never
//! installs a subscriber.

pub mod allocation;
pub mod dispatching;
pub mod error;
pub mod models;
pub mod validation;

pub use error::{AllocationError, Result};
