//! The solving pipeline as a chain of typed phase results.
//!
//! ```text
//! ValidationResult ──seed──▶ SeedResult ──encode──▶ ModelResult ──solve──▶ SolveResult ──report──▶ ScheduleResult
//! ```
//!
//! Each phase consumes or borrows the previous one, so a phase cannot run
//! out of order and its failure modes are part of its return type.

#[cfg(test)]
mod tests;

use std::time::Instant;

use shiftwise_config::{SolverConfig, WorkerPriorityType};
use shiftwise_core::{
    ConstraintParameters, Problem, Result, ScheduleScore, Shift, ValidationError, Worker,
    WorkerIdx,
};
use tracing::info;

use crate::construction::{ConstructionHeuristic, Seed};
use crate::diagnose::{render, InfeasibilityDiagnoser};
use crate::metrics::MetricsReporter;
use crate::model::{ModelBuilder, ScheduleModel, SlotIdx};
use crate::orchestrator::{SearchOutcome, SolverOrchestrator};
use crate::ranking::{rank_workers, CheapestFirst, DifficultyFirst, LeastLoaded, WorkerPriority};
use crate::result::{ScheduleResult, SolveStatus};
use crate::state::ScheduleState;

/// Validated, normalized input.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    problem: Problem,
}

impl ValidationResult {
    pub fn validate(
        workers: &[Worker],
        shifts: &[Shift],
        params: &ConstraintParameters,
    ) -> std::result::Result<Self, ValidationError> {
        Problem::new(workers, shifts, params).map(|problem| Self { problem })
    }

    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    /// Encodes the problem and runs the greedy construction over it.
    pub fn seed(&self, config: &SolverConfig) -> SeedResult<'_> {
        let model = ModelBuilder::from_config(&self.problem, config).build();
        let seed = match config.construction.worker_priority {
            WorkerPriorityType::DifficultyFirst => {
                let ranking = rank_workers(&self.problem, &config.difficulty);
                construct(&model, DifficultyFirst::new(ranking))
            }
            WorkerPriorityType::CheapestFirst => construct(&model, CheapestFirst),
            WorkerPriorityType::LeastLoaded => construct(&model, LeastLoaded),
        };
        SeedResult { model, seed }
    }
}

fn construct<P: WorkerPriority>(model: &ScheduleModel<'_>, priority: P) -> Seed {
    ConstructionHeuristic::new(model, priority).run()
}

/// The encoded model and the greedy schedule built over it.
#[derive(Debug)]
pub struct SeedResult<'p> {
    model: ScheduleModel<'p>,
    seed: Seed,
}

impl<'p> SeedResult<'p> {
    pub fn seed(&self) -> &Seed {
        &self.seed
    }

    pub fn model(&self) -> &ScheduleModel<'p> {
        &self.model
    }

    /// Installs the seed as the search hint.
    pub fn encode(self) -> ModelResult<'p> {
        let SeedResult { model, seed } = self;
        ModelResult {
            model: model.with_hint(seed.assignments),
        }
    }
}

/// A model ready for search, carrying its construction hint.
#[derive(Debug)]
pub struct ModelResult<'p> {
    model: ScheduleModel<'p>,
}

impl<'p> ModelResult<'p> {
    pub fn model(&self) -> &ScheduleModel<'p> {
        &self.model
    }

    /// Searches until `deadline`.
    ///
    /// Fails only when the single-worker retry also runs out of resources.
    pub fn solve(&self, config: &SolverConfig, deadline: Instant) -> Result<SolveResult<'_, 'p>> {
        let outcome = SolverOrchestrator::new(&self.model, config).solve(deadline)?;
        outcome.log_summary();
        Ok(SolveResult {
            model: &self.model,
            outcome,
        })
    }
}

/// Search output, not yet classified.
#[derive(Debug)]
pub struct SolveResult<'a, 'p> {
    model: &'a ScheduleModel<'p>,
    outcome: SearchOutcome,
}

impl SolveResult<'_, '_> {
    pub fn outcome(&self) -> &SearchOutcome {
        &self.outcome
    }

    /// Applies the status rule and builds the caller-facing result.
    ///
    /// When no search worker published, the construction hint stands in
    /// for the best schedule. Only an empty hint against open seats is a
    /// timeout without a solution.
    pub fn report(&self) -> ScheduleResult {
        let model = self.model;
        if let Some(best) = &self.outcome.best {
            return classify(model, best.score, &best.assignments);
        }

        let state = ScheduleState::from_assignments(model, model.hint());
        if state.filled() == 0 && state.unfilled() > 0 {
            return ScheduleResult::Unsolved {
                status: SolveStatus::TimeoutNoSolution,
                diagnostics: InfeasibilityDiagnoser::new(model).diagnose(),
            };
        }
        info!(
            event = "construction_kept",
            score = %state.score(),
            assignments = state.filled(),
        );
        classify(model, state.score(), &state.assignments())
    }
}

fn classify(
    model: &ScheduleModel<'_>,
    score: ScheduleScore,
    assignments: &[(SlotIdx, WorkerIdx)],
) -> ScheduleResult {
    let status = if score.unfilled() == 0 {
        if score.objective() == model.lower_bound() {
            SolveStatus::Optimal
        } else {
            SolveStatus::Feasible
        }
    } else if let Some(cause) = InfeasibilityDiagnoser::new(model).find_cause() {
        info!(event = "diagnosis", cause = %cause, unfilled = score.unfilled());
        return ScheduleResult::Unsolved {
            status: SolveStatus::Infeasible,
            diagnostics: render(&cause),
        };
    } else {
        SolveStatus::Feasible
    };

    let reporter = MetricsReporter::new(model);
    ScheduleResult::Solved {
        status,
        assignments: reporter.assignments(assignments),
        metrics: Box::new(reporter.report(assignments, score)),
    }
}

/// Runs every phase within the configured time limit.
///
/// `Err` only for invalid input or repeated resource exhaustion; infeasible
/// and timed-out runs come back as [`ScheduleResult::Unsolved`].
pub fn solve_problem(
    workers: &[Worker],
    shifts: &[Shift],
    params: &ConstraintParameters,
    config: &SolverConfig,
) -> Result<ScheduleResult> {
    let started = Instant::now();
    let deadline = started + config.time_limit();
    info!(
        event = "solve_start",
        workers = workers.len(),
        shifts = shifts.len(),
        time_limit_ms = config.time_limit().as_millis() as u64,
    );

    let validated = ValidationResult::validate(workers, shifts, params)?;
    let seeded = validated.seed(config);
    let modeled = seeded.encode();
    let solved = modeled.solve(config, deadline)?;
    let result = solved.report();

    info!(
        event = "solve_end",
        status = %result.status(),
        assignments = result.assignments().len(),
        diagnostics = result.diagnostics().len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
    );
    Ok(result)
}
