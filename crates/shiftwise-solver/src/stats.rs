//! Search statistics.

use std::time::Duration;

use shiftwise_core::ScheduleScore;

/// Counters for one search worker.
///
/// # Example
///
/// ```
/// use shiftwise_solver::stats::SearchStats;
///
/// let mut stats = SearchStats::new(0);
/// stats.record_step();
/// stats.record_move(true);
/// stats.record_move(false);
///
/// assert_eq!(stats.step_count, 1);
/// assert_eq!(stats.moves_evaluated, 2);
/// assert_eq!(stats.moves_accepted, 1);
/// assert_eq!(stats.acceptance_rate(), 0.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SearchStats {
    /// Index of the search worker.
    pub worker: usize,
    pub step_count: u64,
    pub moves_evaluated: u64,
    pub moves_accepted: u64,
    /// Steps that produced a new best schedule.
    pub improvements: u64,
    pub best_score: ScheduleScore,
    pub elapsed: Duration,
}

impl SearchStats {
    pub fn new(worker: usize) -> Self {
        Self {
            worker,
            step_count: 0,
            moves_evaluated: 0,
            moves_accepted: 0,
            improvements: 0,
            best_score: ScheduleScore::ZERO,
            elapsed: Duration::ZERO,
        }
    }

    /// Records a move evaluation and whether it was accepted.
    pub fn record_move(&mut self, accepted: bool) {
        self.moves_evaluated += 1;
        if accepted {
            self.moves_accepted += 1;
        }
    }

    pub fn record_step(&mut self) {
        self.step_count += 1;
    }

    pub fn record_improvement(&mut self, score: ScheduleScore) {
        self.improvements += 1;
        self.best_score = score;
    }

    pub fn moves_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.moves_evaluated as f64 / secs
        } else {
            0.0
        }
    }

    /// Accepted over evaluated moves.
    pub fn acceptance_rate(&self) -> f64 {
        if self.moves_evaluated == 0 {
            0.0
        } else {
            self.moves_accepted as f64 / self.moves_evaluated as f64
        }
    }
}
