//! Weekly timetable calendar.
//!
//! The school week is a grid of weekdays × shifts. Each shift holds a
//! sequence of numbered lesson periods; a period number is only unique
//! within its (day, shift) for a given class.
//!
//! Teacher availability is recorded per (day, shift). A cell with no
//! record is treated as available.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AllocationError;

/// Teaching day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

/// Teaching shift within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Shift {
    Morning,
    Afternoon,
    Evening,
}

/// Availability flag for one (day, shift) cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    /// Day of the week.
    pub day: Weekday,
    /// Shift within the day.
    pub shift: Shift,
    /// Whether the teacher can take lessons in this cell.
    pub available: bool,
}

impl Weekday {
    /// All teaching days, Monday first.
    pub const ALL: [Weekday; 6] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// Upper-case name as used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Monday => "MONDAY",
            Weekday::Tuesday => "TUESDAY",
            Weekday::Wednesday => "WEDNESDAY",
            Weekday::Thursday => "THURSDAY",
            Weekday::Friday => "FRIDAY",
            Weekday::Saturday => "SATURDAY",
        }
    }
}

impl Shift {
    /// All shifts in daily order.
    pub const ALL: [Shift; 3] = [Shift::Morning, Shift::Afternoon, Shift::Evening];

    /// Upper-case name as used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Shift::Morning => "MORNING",
            Shift::Afternoon => "AFTERNOON",
            Shift::Evening => "EVENING",
        }
    }
}

impl Availability {
    /// Creates an availability record.
    pub fn new(day: Weekday, shift: Shift, available: bool) -> Self {
        Self {
            day,
            shift,
            available,
        }
    }

    /// Whether this record covers the given cell.
    #[inline]
    pub fn covers(&self, day: Weekday, shift: Shift) -> bool {
        self.day == day && self.shift == shift
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weekday {
    type Err = AllocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Weekday::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AllocationError::UnknownWeekday(s.to_string()))
    }
}

impl FromStr for Shift {
    type Err = AllocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Shift::ALL
            .into_iter()
            .find(|sh| sh.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AllocationError::UnknownShift(s.to_string()))
    }
}
