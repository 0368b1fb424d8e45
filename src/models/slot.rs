//! Schedule slot model.
//!
//! A slot is one lesson period of one class: a subject to be taught at a
//! school on a given day, shift and period number. The ordered list of
//! slots for a run is the demand the engine must satisfy.

use serde::{Deserialize, Serialize};

use super::{Shift, Weekday};

/// One lesson period requiring one teacher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSlot {
    /// Unique slot identifier.
    pub id: String,
    /// Owning class.
    pub class_id: String,
    /// Required subject.
    pub subject_id: String,
    /// Owning school.
    pub school_id: String,
    /// Day of the week.
    pub day: Weekday,
    /// Shift within the day.
    pub shift: Shift,
    /// Lesson period number, unique within (day, shift) for the class.
    pub period: u8,
}

impl ScheduleSlot {
    /// Creates a slot on Monday morning, first period.
    pub fn new(
        id: impl Into<String>,
        class_id: impl Into<String>,
        subject_id: impl Into<String>,
        school_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            class_id: class_id.into(),
            subject_id: subject_id.into(),
            school_id: school_id.into(),
            day: Weekday::Monday,
            shift: Shift::Morning,
            period: 1,
        }
    }

    /// Sets day, shift and period.
    pub fn at(mut self, day: Weekday, shift: Shift, period: u8) -> Self {
        self.day = day;
        self.shift = shift;
        self.period = period;
        self
    }

    /// The (day, period) pair a teacher cannot hold twice.
    #[inline]
    pub fn time_key(&self) -> (Weekday, u8) {
        (self.day, self.period)
    }
}
