//! Solver entry points that hide the phase wiring.

use std::time::Duration;

use shiftwise_config::SolverConfig;
use shiftwise_core::{ConstraintParameters, Result, Shift, Worker};
use shiftwise_solver::{solve_problem, ScheduleResult};

/// Config file picked up from the working directory when present.
pub const CONFIG_FILE: &str = "solver.toml";

/// Schedules `shifts` from `workers` within `time_limit`.
///
/// Solver settings come from `solver.toml` when it exists, defaults
/// otherwise; `time_limit` always wins over the file's termination limits.
/// `Err` only for invalid input or repeated resource exhaustion.
pub fn solve(
    workers: &[Worker],
    shifts: &[Shift],
    params: &ConstraintParameters,
    time_limit: Duration,
) -> Result<ScheduleResult> {
    let config = SolverConfig::load(CONFIG_FILE)
        .unwrap_or_default()
        .with_time_limit(time_limit);
    solve_with_config(workers, shifts, params, &config)
}

/// Like [`solve`], with every solver setting taken from `config`.
pub fn solve_with_config(
    workers: &[Worker],
    shifts: &[Shift],
    params: &ConstraintParameters,
    config: &SolverConfig,
) -> Result<ScheduleResult> {
    #[cfg(feature = "console")]
    crate::console::init();

    solve_problem(workers, shifts, params, config)
}
