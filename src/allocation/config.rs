//! Allocation run configuration.

use serde::{Deserialize, Serialize};

use crate::models::LessonKind;

/// Configuration for one allocation run.
///
/// # Examples
///
/// ```
/// use u_allocate::allocation::AllocationConfig;
/// use u_allocate::models::LessonKind;
///
/// let config = AllocationConfig::default()
///     .with_lesson_kind(LessonKind::Occasional)
///     .with_precondition_check(false);
/// assert_eq!(config.lesson_kind, LessonKind::Occasional);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationConfig {
    /// Lesson kind allocated by the run.
    pub lesson_kind: LessonKind,

    /// Run the precondition validator before visiting any slot and
    /// refuse to start when it reports violations.
    pub check_preconditions: bool,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            lesson_kind: LessonKind::Regular,
            check_preconditions: true,
        }
    }
}

impl AllocationConfig {
    /// Sets the lesson kind.
    pub fn with_lesson_kind(mut self, lesson_kind: LessonKind) -> Self {
        self.lesson_kind = lesson_kind;
        self
    }

    /// Enables or disables the precondition gate.
    pub fn with_precondition_check(mut self, enabled: bool) -> Self {
        self.check_preconditions = enabled;
        self
    }
}
