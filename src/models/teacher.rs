//! Teacher model.
//!
//! A teacher candidate is the resource the engine allocates: a contract
//! category fixing statutory priority, a weekly workload ceiling
//! ("journey"), the subjects they may teach, the schools they belong to,
//! and a per (day, shift) availability table.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use super::{Availability, Shift, Weekday};
use crate::error::AllocationError;

/// A teacher that can be assigned to schedule slots.
///
/// Only `assigned_lessons` changes during a run, and only inside the
/// engine's own copy of the roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeacherCandidate {
    /// Unique teacher identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Contract category.
    pub category: ContractCategory,
    /// Career track, when known.
    #[serde(default)]
    pub career: Option<Career>,
    /// Maximum weekly lessons ("journey").
    pub workload_ceiling: u32,
    /// Lessons already assigned.
    #[serde(default)]
    pub assigned_lessons: u32,
    /// Subject identifiers the teacher is qualified for.
    #[serde(default)]
    pub subjects: BTreeSet<String>,
    /// School identifiers the teacher is affiliated with.
    #[serde(default)]
    pub schools: BTreeSet<String>,
    /// Explicit availability records. Missing cells are available.
    #[serde(default)]
    pub availability: Vec<Availability>,
}

/// Legal employment classification.
///
/// Determines statutory assignment priority; see
/// [`category_rank`](crate::dispatching::category_rank).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ContractCategory {
    /// Tenured.
    A,
    /// Stable under the constitutional transition rule.
    P,
    /// Permanent, private-law regime.
    N,
    /// Permanent function-activity.
    F,
    /// Fixed-term contracted.
    O,
    /// Occasional; substitute lessons only.
    V,
}

/// Career track. Restricts which workload ceilings are legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Career {
    /// Career plan preceding the reform.
    Anterior,
    /// Current career plan.
    Nova,
}

impl ContractCategory {
    /// Every category, in declaration order.
    pub const ALL: [ContractCategory; 6] = [
        ContractCategory::A,
        ContractCategory::P,
        ContractCategory::N,
        ContractCategory::F,
        ContractCategory::O,
        ContractCategory::V,
    ];

    /// Single-letter code.
    pub fn code(&self) -> &'static str {
        match self {
            ContractCategory::A => "A",
            ContractCategory::P => "P",
            ContractCategory::N => "N",
            ContractCategory::F => "F",
            ContractCategory::O => "O",
            ContractCategory::V => "V",
        }
    }

    /// Whether teachers of this category may take regular lessons.
    #[inline]
    pub fn allows_regular(&self) -> bool {
        *self != ContractCategory::V
    }
}

impl Career {
    /// Workload ceilings permitted on this career track.
    pub fn allowed_ceilings(&self) -> &'static [u32] {
        match self {
            Career::Anterior => &[9, 19, 24, 32],
            Career::Nova => &[20, 32],
        }
    }
}

impl fmt::Display for ContractCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ContractCategory {
    type Err = AllocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContractCategory::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AllocationError::UnknownCategory(s.to_string()))
    }
}

impl TeacherCandidate {
    /// Creates a teacher with no subjects, schools or assigned lessons.
    pub fn new(id: impl Into<String>, category: ContractCategory, workload_ceiling: u32) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            category,
            career: None,
            workload_ceiling,
            assigned_lessons: 0,
            subjects: BTreeSet::new(),
            schools: BTreeSet::new(),
            availability: Vec::new(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the career track.
    pub fn with_career(mut self, career: Career) -> Self {
        self.career = Some(career);
        self
    }

    /// Sets the number of lessons already assigned.
    pub fn with_assigned(mut self, assigned_lessons: u32) -> Self {
        self.assigned_lessons = assigned_lessons;
        self
    }

    /// Adds a qualified subject.
    pub fn with_subject(mut self, subject_id: impl Into<String>) -> Self {
        self.subjects.insert(subject_id.into());
        self
    }

    /// Adds an affiliated school.
    pub fn with_school(mut self, school_id: impl Into<String>) -> Self {
        self.schools.insert(school_id.into());
        self
    }

    /// Records availability for a (day, shift) cell, replacing any
    /// earlier record for the same cell.
    pub fn with_availability(mut self, day: Weekday, shift: Shift, available: bool) -> Self {
        self.availability.retain(|a| !a.covers(day, shift));
        self.availability
            .push(Availability::new(day, shift, available));
        self
    }

    /// Whether the teacher is qualified for a subject.
    pub fn teaches(&self, subject_id: &str) -> bool {
        self.subjects.contains(subject_id)
    }

    /// Whether the teacher is affiliated with a school.
    pub fn belongs_to(&self, school_id: &str) -> bool {
        self.schools.contains(school_id)
    }

    /// Availability for a (day, shift) cell.
    ///
    /// Returns `true` when no record exists for the cell.
    pub fn is_available(&self, day: Weekday, shift: Shift) -> bool {
        self.availability
            .iter()
            .find(|a| a.covers(day, shift))
            .map(|a| a.available)
            .unwrap_or(true)
    }

    /// Whether one more lesson fits under the workload ceiling.
    #[inline]
    pub fn has_headroom(&self) -> bool {
        self.assigned_lessons < self.workload_ceiling
    }

    /// Lessons still assignable before reaching the ceiling.
    pub fn remaining_capacity(&self) -> u32 {
        self.workload_ceiling.saturating_sub(self.assigned_lessons)
    }
}
