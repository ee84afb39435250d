//! Per-worker search scope.

use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use shiftwise_core::{ScheduleScore, WorkerIdx};

use crate::model::SlotIdx;
use crate::state::ScheduleState;
use crate::stats::SearchStats;

/// What one search worker owns: its RNG, step counters and the best
/// schedule it has seen.
#[derive(Debug)]
pub struct SearchScope {
    rng: ChaCha8Rng,
    start: Instant,
    last_improvement_step: u64,
    best_score: ScheduleScore,
    best_assignments: Vec<(SlotIdx, WorkerIdx)>,
    stats: SearchStats,
}

impl SearchScope {
    /// Starts a scope whose best schedule is `initial`.
    pub fn new(worker: usize, seed: u64, initial: &ScheduleState<'_, '_>) -> Self {
        let best_score = initial.score();
        let mut stats = SearchStats::new(worker);
        stats.best_score = best_score;
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            start: Instant::now(),
            last_improvement_step: 0,
            best_score,
            best_assignments: initial.assignments(),
            stats,
        }
    }

    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    pub fn step_count(&self) -> u64 {
        self.stats.step_count
    }

    /// Steps since the last new best.
    pub fn unimproved_step_count(&self) -> u64 {
        self.stats.step_count - self.last_improvement_step
    }

    pub fn best_score(&self) -> ScheduleScore {
        self.best_score
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut SearchStats {
        &mut self.stats
    }

    /// Stores the state as the new best when it strictly improves on it.
    pub fn update_best(&mut self, state: &ScheduleState<'_, '_>, score: ScheduleScore) -> bool {
        if score <= self.best_score {
            return false;
        }
        self.best_score = score;
        self.best_assignments = state.assignments();
        self.last_improvement_step = self.stats.step_count;
        self.stats.record_improvement(score);
        true
    }

    /// Closes the scope, returning the best schedule and the final counters.
    pub fn finish(mut self) -> (ScheduleScore, Vec<(SlotIdx, WorkerIdx)>, SearchStats) {
        self.stats.elapsed = self.start.elapsed();
        (self.best_score, self.best_assignments, self.stats)
    }
}
