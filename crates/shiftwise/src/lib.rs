//! shiftwise - shift assignment under budget and fairness constraints
//!
//! Give it workers, shifts and constraint parameters; get back a schedule
//! with metrics, or diagnostics explaining why none exists.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use shiftwise::prelude::*;
//!
//! let workers = vec![Worker::new("alice", Money::from_dollars(15.0), 40.0)
//!     .with_skill("Server")
//!     .available_days([0])];
//! let shifts = vec![Shift::parse("mon-lunch", 0, "11:00", "17:00")
//!     .unwrap()
//!     .require("Server", 1)];
//!
//! let result = solve(
//!     &workers,
//!     &shifts,
//!     &ConstraintParameters::default(),
//!     Duration::from_secs(5),
//! )
//! .unwrap();
//! assert!(result.status().is_solved());
//! assert_eq!(result.metrics().unwrap().total_cost, Money::from_dollars(90.0));
//! ```

pub use shiftwise_config::{
    AcceptorConfig, ConfigError, EnvironmentMode, SolverConfig, WorkerPriorityType,
};
pub use shiftwise_core::{
    day_index, Assignment, AvailabilityWindow, BudgetParameters, ConstraintParameters,
    FairnessParameters, Money, Result, RoleRequirement, ScheduleScore, Shift, ShiftCategory,
    ShiftwiseError, TimeOfDay, ValidationError, Worker,
};
pub use shiftwise_solver::{
    fairness_score, BudgetReport, CoverageGap, CoverageSummary, GapReason, HoursSummary,
    ScheduleMetrics, ScheduleResult, SolveStatus, WorkerLoad,
};

mod solver;
pub use solver::{solve, solve_with_config, CONFIG_FILE};

#[cfg(feature = "console")]
pub mod console;

pub mod prelude {
    pub use super::{solve, solve_with_config};
    pub use super::{
        Assignment, AvailabilityWindow, BudgetParameters, ConstraintParameters,
        FairnessParameters, Money, RoleRequirement, Shift, ShiftCategory, TimeOfDay, Worker,
    };
    pub use super::{ScheduleMetrics, ScheduleResult, SolveStatus, SolverConfig};
}

#[cfg(test)]
mod tests;
