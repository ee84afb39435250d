//! Time-boxed multi-start search.
//!
//! Independent search workers start from the construction hint with
//! different seeds and share nothing but the read-only model and, outside
//! reproducible mode, a stop flag raised when one of them reaches the
//! objective lower bound with every seat filled. The best result wins,
//! ties going to the lowest worker index.
//!
//! If the multi-worker run cannot start or a worker dies, the run is
//! retried once with a single worker inside the remaining time.


use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Instant;

use shiftwise_config::{EnvironmentMode, SolverConfig};
use shiftwise_core::{ScheduleScore, ShiftwiseError, WorkerIdx};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::localsearch::{ConfiguredAcceptor, LocalSearchPhase};
use crate::model::{ScheduleModel, SlotIdx};
use crate::scope::SearchScope;
use crate::state::ScheduleState;
use crate::stats::SearchStats;
use crate::termination::{
    BestScoreTermination, DeadlineTermination, ExternalTermination, OrTermination,
    StepCountTermination, UnimprovedStepCountTermination,
};

/// Stagnation limit applied when the configuration sets none.
const BASE_UNIMPROVED_STEPS: u64 = 1_000;
const UNIMPROVED_STEPS_PER_VARIABLE: u64 = 20;
const MAX_DEFAULT_UNIMPROVED_STEPS: u64 = 1_000_000;

/// The best schedule one search worker found.
#[derive(Debug, Clone)]
pub struct WorkerResult {
    pub worker: usize,
    pub score: ScheduleScore,
    pub assignments: Vec<(SlotIdx, WorkerIdx)>,
    pub stats: SearchStats,
}

/// What the orchestrator hands back.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// `None` when no worker published a schedule before the deadline.
    pub best: Option<WorkerResult>,
    /// Statistics of every worker that published.
    pub workers: Vec<SearchStats>,
    /// True when the single-worker retry produced this outcome.
    pub fallback: bool,
}

/// Why a multi-worker run could not complete.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct Exhausted(pub String);

/// Drives the search over one encoded model.
#[derive(Debug)]
pub struct SolverOrchestrator<'a, 'p> {
    model: &'a ScheduleModel<'p>,
    config: &'a SolverConfig,
}

impl<'a, 'p> SolverOrchestrator<'a, 'p> {
    pub fn new(model: &'a ScheduleModel<'p>, config: &'a SolverConfig) -> Self {
        Self { model, config }
    }

    /// Runs until `deadline`, retrying once with one worker on resource exhaustion.
    pub fn solve(&self, deadline: Instant) -> Result<SearchOutcome, ShiftwiseError> {
        let base_seed = self.config.random_seed.unwrap_or_else(rand::random::<u64>);
        let workers = self.config.search_worker_count();

        match self.run(workers, base_seed, deadline) {
            Ok(outcome) => Ok(outcome),
            Err(first) => {
                warn!(
                    event = "fallback_single_worker",
                    workers,
                    reason = %first,
                );
                let mut outcome = self.run(1, base_seed, deadline).map_err(|second| {
                    ShiftwiseError::ResourceExhausted {
                        reason: format!("{first}; single-worker retry: {second}"),
                    }
                })?;
                outcome.fallback = true;
                Ok(outcome)
            }
        }
    }

    /// Bytes a run with `workers` search workers is expected to hold.
    pub fn estimated_bytes(&self, workers: usize) -> u64 {
        (self.model.estimated_bytes() + workers * self.model.estimated_worker_bytes()) as u64
    }

    fn run(&self, workers: usize, base_seed: u64, deadline: Instant) -> Result<SearchOutcome, Exhausted> {
        if let Some(limit) = self.config.memory_limit_bytes {
            let required = self.estimated_bytes(workers);
            if required > limit {
                return Err(Exhausted(format!(
                    "{workers} search workers need about {required} bytes, limit is {limit}"
                )));
            }
        }

        let stop = AtomicBool::new(false);
        let results: Vec<Result<Option<WorkerResult>, Exhausted>> = thread::scope(|scope| {
            let mut handles = Vec::with_capacity(workers);
            let mut spawn_error = None;
            for index in 0..workers {
                let stop = &stop;
                let spawned = thread::Builder::new()
                    .name(format!("shiftwise-search-{index}"))
                    .spawn_scoped(scope, move || {
                        self.search(index, base_seed.wrapping_add(index as u64), deadline, stop)
                    });
                match spawned {
                    Ok(handle) => handles.push(handle),
                    Err(e) => {
                        stop.store(true, Ordering::Relaxed);
                        spawn_error = Some(Exhausted(format!("could not spawn search worker {index}: {e}")));
                        break;
                    }
                }
            }

            let mut results: Vec<_> = handles
                .into_iter()
                .enumerate()
                .map(|(index, handle)| {
                    handle
                        .join()
                        .map_err(|_| Exhausted(format!("search worker {index} panicked")))
                })
                .collect();
            if let Some(e) = spawn_error {
                results.push(Err(e));
            }
            results
        });

        let mut best: Option<WorkerResult> = None;
        let mut stats = Vec::new();
        for result in results {
            let Some(result) = result? else {
                continue;
            };
            stats.push(result.stats.clone());
            if best.as_ref().map_or(true, |b| result.score > b.score) {
                best = Some(result);
            }
        }
        Ok(SearchOutcome {
            best,
            workers: stats,
            fallback: false,
        })
    }

    fn search(&self, index: usize, seed: u64, deadline: Instant, stop: &AtomicBool) -> Option<WorkerResult> {
        let deadline_term = DeadlineTermination::new(deadline);
        if deadline_term.has_passed() {
            debug!(event = "worker_skipped", worker = index);
            return None;
        }

        let model = self.model;
        let config = self.config;
        debug!(event = "worker_start", worker = index, seed);

        let mut state = ScheduleState::from_assignments(model, model.hint());
        let mut scope = SearchScope::new(index, seed, &state);
        let target = ScheduleScore::penalized(0, 0, model.lower_bound());

        let reproducible = config.environment_mode == EnvironmentMode::Reproducible;
        let termination = OrTermination((
            deadline_term,
            BestScoreTermination::new(target),
            config.termination.step_count_limit.map(StepCountTermination::new),
            UnimprovedStepCountTermination::new(self.unimproved_limit()),
            (!reproducible).then(|| ExternalTermination::new(stop)),
        ));

        let acceptor = ConfiguredAcceptor::from_config(&config.local_search.acceptor, seed);
        let mut phase = LocalSearchPhase::new(acceptor, config.local_search.moves_per_step);
        phase.solve(&mut state, &mut scope, &termination);

        if !reproducible && scope.best_score() >= target {
            stop.store(true, Ordering::Relaxed);
        }

        let (score, assignments, stats) = scope.finish();
        debug!(
            event = "worker_end",
            worker = index,
            score = %score,
            steps = stats.step_count,
            moves = stats.moves_evaluated,
            accepted = stats.moves_accepted,
            moves_per_sec = stats.moves_per_second() as u64,
            acceptance_rate = %format!("{:.1}%", stats.acceptance_rate() * 100.0),
            elapsed_ms = stats.elapsed.as_millis() as u64,
        );
        Some(WorkerResult {
            worker: index,
            score,
            assignments,
            stats,
        })
    }

    fn unimproved_limit(&self) -> u64 {
        self.config
            .termination
            .unimproved_step_count_limit
            .unwrap_or_else(|| {
                (BASE_UNIMPROVED_STEPS
                    + UNIMPROVED_STEPS_PER_VARIABLE * self.model.variable_count() as u64)
                    .min(MAX_DEFAULT_UNIMPROVED_STEPS)
            })
    }
}

impl SearchOutcome {
    pub fn log_summary(&self) {
        if let Some(best) = &self.best {
            info!(
                event = "search_end",
                best_worker = best.worker,
                score = %best.score,
                workers = self.workers.len(),
                fallback = self.fallback,
            );
        } else {
            info!(event = "search_end", workers = 0, fallback = self.fallback);
        }
    }
}
