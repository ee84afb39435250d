//! Swappable greedy priority rules.

use std::fmt::Debug;

use shiftwise_core::WorkerIdx;

use super::WorkerRanking;
use crate::state::ScheduleState;

/// Maps a worker and the current partial schedule to a comparable value.
/// Higher is tried first.
pub trait WorkerPriority: Send + Sync + Debug {
    fn priority(&self, worker: WorkerIdx, state: &ScheduleState<'_, '_>) -> i64;

    fn name(&self) -> &'static str;
}

/// Hardest-to-place workers first, by difficulty ranking.
#[derive(Debug, Clone)]
pub struct DifficultyFirst {
    ranking: WorkerRanking,
}

impl DifficultyFirst {
    pub fn new(ranking: WorkerRanking) -> Self {
        Self { ranking }
    }
}

impl WorkerPriority for DifficultyFirst {
    fn priority(&self, worker: WorkerIdx, _state: &ScheduleState<'_, '_>) -> i64 {
        -(self.ranking.position(worker) as i64)
    }

    fn name(&self) -> &'static str {
        "difficulty_first"
    }
}

/// Lowest hourly rate first.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheapestFirst;

impl WorkerPriority for CheapestFirst {
    fn priority(&self, worker: WorkerIdx, state: &ScheduleState<'_, '_>) -> i64 {
        -state.model().problem().worker(worker).rate.cents()
    }

    fn name(&self) -> &'static str {
        "cheapest_first"
    }
}

/// Fewest minutes already assigned first.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeastLoaded;

impl WorkerPriority for LeastLoaded {
    fn priority(&self, worker: WorkerIdx, state: &ScheduleState<'_, '_>) -> i64 {
        -state.worker_minutes(worker)
    }

    fn name(&self) -> &'static str {
        "least_loaded"
    }
}
