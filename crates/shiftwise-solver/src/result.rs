//! What a solving run hands back to the caller.

use std::fmt;

use shiftwise_core::{Assignment, Result, ShiftwiseError};

use crate::metrics::ScheduleMetrics;

/// Quality tier of a solving run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum SolveStatus {
    /// Every seat filled at the objective lower bound.
    Optimal,
    /// A valid schedule, possibly with disclosed gaps.
    Feasible,
    /// No valid schedule covers the demand; diagnostics say why.
    Infeasible,
    /// The deadline passed before any schedule was found.
    TimeoutNoSolution,
}

impl SolveStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SolveStatus::Optimal => "OPTIMAL",
            SolveStatus::Feasible => "FEASIBLE",
            SolveStatus::Infeasible => "INFEASIBLE",
            SolveStatus::TimeoutNoSolution => "TIMEOUT_NO_SOLUTION",
        }
    }

    /// True for the tiers that carry a schedule.
    pub fn is_solved(self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::Feasible)
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A schedule with its metrics, or the diagnostics explaining its absence.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum ScheduleResult {
    Solved {
        status: SolveStatus,
        assignments: Vec<Assignment>,
        metrics: Box<ScheduleMetrics>,
    },
    /// Never built with an empty diagnostic list.
    Unsolved {
        status: SolveStatus,
        diagnostics: Vec<String>,
    },
}

impl ScheduleResult {
    pub fn status(&self) -> SolveStatus {
        match self {
            ScheduleResult::Solved { status, .. } | ScheduleResult::Unsolved { status, .. } => {
                *status
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ScheduleResult::Solved { .. })
    }

    /// Assigned shifts; empty when unsolved.
    pub fn assignments(&self) -> &[Assignment] {
        match self {
            ScheduleResult::Solved { assignments, .. } => assignments,
            ScheduleResult::Unsolved { .. } => &[],
        }
    }

    pub fn metrics(&self) -> Option<&ScheduleMetrics> {
        match self {
            ScheduleResult::Solved { metrics, .. } => Some(metrics),
            ScheduleResult::Unsolved { .. } => None,
        }
    }

    /// Diagnostics; empty when solved.
    pub fn diagnostics(&self) -> &[String] {
        match self {
            ScheduleResult::Solved { .. } => &[],
            ScheduleResult::Unsolved { diagnostics, .. } => diagnostics,
        }
    }

    /// Maps unsolved outcomes onto the matching error variants.
    pub fn into_result(self) -> Result<(Vec<Assignment>, ScheduleMetrics)> {
        match self {
            ScheduleResult::Solved {
                assignments,
                metrics,
                ..
            } => Ok((assignments, *metrics)),
            ScheduleResult::Unsolved {
                status: SolveStatus::TimeoutNoSolution,
                diagnostics,
            } => Err(ShiftwiseError::TimeoutNoSolution { diagnostics }),
            ScheduleResult::Unsolved { diagnostics, .. } => {
                Err(ShiftwiseError::Infeasible { diagnostics })
            }
        }
    }
}
