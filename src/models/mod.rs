//! Allocation domain models.
//!
//! Plain value types exchanged with the surrounding application: the
//! teacher roster and slot demand going in, the generation result coming
//! out. Everything derives `serde` so collaborators can pass it as JSON.
//!
//! # Domain Mappings
//!
//! | u-allocate | Scheduling term | Education network |
//! |------------|-----------------|-------------------|
//! | TeacherCandidate | Resource | Teacher (QM roster entry) |
//! | ScheduleSlot | Activity | Class lesson period |
//! | Assignment | Assignment | Timetable entry |
//! | Conflict | Violation | Empty lesson |

mod calendar;
mod result;
mod slot;
mod teacher;

pub use calendar::{Availability, Shift, Weekday};
pub use result::{
    Assignment, Conflict, ConflictReason, GenerationResult, GenerationStats, Ineligibility,
    LessonKind, RejectionSummary,
};
pub use slot::ScheduleSlot;
pub use teacher::{Career, ContractCategory, TeacherCandidate};
