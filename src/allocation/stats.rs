//! Allocation statistics for reporting.
//!
//! Read-only summaries of a finished run. Nothing here feeds back into
//! allocation decisions.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | By category | Assignments per contract category |
//! | Fill rate | filled / total slots |
//! | Final load | starting load + lessons assigned in the run |
//! | Utilization | final load / workload ceiling |
//! | Avg utilization | Mean utilization over teachers with a ceiling |

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::models::{Assignment, ContractCategory, GenerationResult, TeacherCandidate};

/// Counts assignments per contract category.
///
/// Every category appears in the map, zero when unused. Assignments to
/// teachers missing from the roster are skipped.
pub fn assignments_by_category(
    assignments: &[Assignment],
    teachers: &[TeacherCandidate],
) -> BTreeMap<ContractCategory, usize> {
    let category_of: HashMap<&str, ContractCategory> = teachers
        .iter()
        .map(|t| (t.id.as_str(), t.category))
        .collect();

    let mut counts: BTreeMap<ContractCategory, usize> =
        ContractCategory::ALL.into_iter().map(|c| (c, 0)).collect();

    for a in assignments {
        if let Some(&category) = category_of.get(a.teacher_id.as_str()) {
            *counts.entry(category).or_insert(0) += 1;
        }
    }

    counts
}

/// Workload picture of one teacher after a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeacherLoad {
    /// Contract category.
    pub category: ContractCategory,
    /// Lessons assigned in this run.
    pub assigned_in_run: u32,
    /// Starting load plus lessons assigned in this run.
    pub final_load: u32,
    /// Workload ceiling.
    pub workload_ceiling: u32,
    /// `final_load / workload_ceiling` (0.0 for a zero ceiling).
    pub utilization: f64,
}

/// Allocation performance indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationKpi {
    /// Fraction of slots filled (0.0..=1.0).
    pub fill_rate: f64,
    /// Assignments per category.
    pub by_category: BTreeMap<ContractCategory, usize>,
    /// Per-teacher load, keyed by teacher ID.
    pub loads: BTreeMap<String, TeacherLoad>,
    /// Mean utilization over teachers with a non-zero ceiling.
    pub avg_utilization: f64,
    /// Teachers that received at least one lesson.
    pub teachers_used: usize,
}

impl AllocationKpi {
    /// Computes KPIs from a result and the roster it was run against.
    ///
    /// # Arguments
    /// * `result` - The finished run.
    /// * `teachers` - The roster as passed to the engine (starting loads).
    pub fn calculate(result: &GenerationResult, teachers: &[TeacherCandidate]) -> Self {
        let mut assigned: HashMap<&str, u32> = HashMap::new();
        for a in &result.assignments {
            *assigned.entry(a.teacher_id.as_str()).or_insert(0) += 1;
        }

        let mut loads = BTreeMap::new();
        let mut utilization_sum = 0.0;
        let mut counted = 0usize;

        for t in teachers {
            let in_run = assigned.get(t.id.as_str()).copied().unwrap_or(0);
            let final_load = t.assigned_lessons + in_run;
            let utilization = if t.workload_ceiling == 0 {
                0.0
            } else {
                final_load as f64 / t.workload_ceiling as f64
            };

            if t.workload_ceiling > 0 {
                utilization_sum += utilization;
                counted += 1;
            }

            loads.insert(
                t.id.clone(),
                TeacherLoad {
                    category: t.category,
                    assigned_in_run: in_run,
                    final_load,
                    workload_ceiling: t.workload_ceiling,
                    utilization,
                },
            );
        }

        let avg_utilization = if counted == 0 {
            0.0
        } else {
            utilization_sum / counted as f64
        };

        let teachers_used = loads.values().filter(|l| l.assigned_in_run > 0).count();

        Self {
            fill_rate: result.stats.fill_rate(),
            by_category: assignments_by_category(&result.assignments, teachers),
            loads,
            avg_utilization,
            teachers_used,
        }
    }

    /// Whether the run meets the given quality thresholds.
    pub fn meets_thresholds(&self, min_fill_rate: f64, min_utilization: f64) -> bool {
        self.fill_rate >= min_fill_rate && self.avg_utilization >= min_utilization
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Conflict, LessonKind, RejectionSummary};

    fn sample_roster() -> Vec<TeacherCandidate> {
        vec![
            TeacherCandidate::new("A1", ContractCategory::A, 10).with_assigned(4),
            TeacherCandidate::new("P1", ContractCategory::P, 20),
            TeacherCandidate::new("V1", ContractCategory::V, 10),
        ]
    }

    fn sample_result() -> GenerationResult {
        let mut r = GenerationResult::new();
        r.add_assignment(Assignment::new("S1", "A1", LessonKind::Regular));
        r.add_assignment(Assignment::new("S2", "A1", LessonKind::Regular));
        r.add_assignment(Assignment::new("S3", "P1", LessonKind::Regular));
        r.add_conflict(Conflict::no_eligible_teacher("S4", RejectionSummary::new()));
        r.finalize(4);
        r
    }

    #[test]
    fn test_by_category() {
        let counts = assignments_by_category(&sample_result().assignments, &sample_roster());
        assert_eq!(counts.len(), 6);
        assert_eq!(counts[&ContractCategory::A], 2);
        assert_eq!(counts[&ContractCategory::P], 1);
        assert_eq!(counts[&ContractCategory::V], 0);
        assert_eq!(counts[&ContractCategory::O], 0);
    }

    #[test]
    fn test_by_category_skips_unknown_teacher() {
        let assignments = vec![
            Assignment::new("S1", "GHOST", LessonKind::Regular),
            Assignment::new("S2", "V1", LessonKind::Occasional),
        ];
        let counts = assignments_by_category(&assignments, &sample_roster());
        assert_eq!(counts.values().sum::<usize>(), 1);
        assert_eq!(counts[&ContractCategory::V], 1);
    }

    #[test]
    fn test_by_category_empty() {
        let counts = assignments_by_category(&[], &[]);
        assert!(counts.values().all(|&n| n == 0));
        assert_eq!(counts.len(), ContractCategory::ALL.len());
    }

    #[test]
    fn test_kpi() {
        let kpi = AllocationKpi::calculate(&sample_result(), &sample_roster());
        assert!((kpi.fill_rate - 0.75).abs() < 1e-10);
        assert_eq!(kpi.teachers_used, 2);

        let a1 = &kpi.loads["A1"];
        assert_eq!(a1.assigned_in_run, 2);
        assert_eq!(a1.final_load, 6);
        assert!((a1.utilization - 0.6).abs() < 1e-10);

        let p1 = &kpi.loads["P1"];
        assert!((p1.utilization - 0.05).abs() < 1e-10);

        // (0.6 + 0.05 + 0.0) / 3
        assert!((kpi.avg_utilization - 0.65 / 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_kpi_zero_ceiling_excluded_from_average() {
        let roster = vec![
            TeacherCandidate::new("Z", ContractCategory::O, 0),
            TeacherCandidate::new("A1", ContractCategory::A, 10).with_assigned(5),
        ];
        let mut r = GenerationResult::new();
        r.finalize(0);

        let kpi = AllocationKpi::calculate(&r, &roster);
        assert!((kpi.loads["Z"].utilization - 0.0).abs() < 1e-10);
        assert!((kpi.avg_utilization - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_kpi_empty() {
        let mut r = GenerationResult::new();
        r.finalize(0);
        let kpi = AllocationKpi::calculate(&r, &[]);
        assert!((kpi.fill_rate - 1.0).abs() < 1e-10);
        assert!((kpi.avg_utilization - 0.0).abs() < 1e-10);
        assert!(kpi.loads.is_empty());
    }

    #[test]
    fn test_meets_thresholds() {
        let kpi = AllocationKpi::calculate(&sample_result(), &sample_roster());
        assert!(kpi.meets_thresholds(0.75, 0.2));
        assert!(!kpi.meets_thresholds(0.8, 0.0));
        assert!(!kpi.meets_thresholds(0.0, 0.5));
    }
}
