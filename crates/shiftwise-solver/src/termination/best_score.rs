//! Best score termination.

use shiftwise_core::ScheduleScore;

use super::Termination;
use crate::scope::SearchScope;

/// Terminates once the best score reaches a target, typically the
/// objective lower bound with every seat filled.
#[derive(Debug, Clone, Copy)]
pub struct BestScoreTermination {
    target: ScheduleScore,
}

impl BestScoreTermination {
    pub fn new(target: ScheduleScore) -> Self {
        Self { target }
    }
}

impl Termination for BestScoreTermination {
    fn is_terminated(&self, scope: &SearchScope) -> bool {
        scope.best_score() >= self.target
    }
}
