//! Late acceptance acceptor.

use shiftwise_core::ScheduleScore;

use super::Acceptor;

/// Accepts moves that improve on the last step or on the score from
/// `late_acceptance_size` steps ago.
#[derive(Debug, Clone)]
pub struct LateAcceptanceAcceptor {
    late_acceptance_size: usize,
    /// Circular buffer of historical step scores.
    score_history: Vec<ScheduleScore>,
    current_index: usize,
}

impl LateAcceptanceAcceptor {
    pub fn new(late_acceptance_size: usize) -> Self {
        let late_acceptance_size = late_acceptance_size.max(1);
        Self {
            late_acceptance_size,
            score_history: vec![ScheduleScore::ZERO; late_acceptance_size],
            current_index: 0,
        }
    }

    pub fn late_acceptance_size(&self) -> usize {
        self.late_acceptance_size
    }
}

impl Default for LateAcceptanceAcceptor {
    fn default() -> Self {
        Self::new(400)
    }
}

impl Acceptor for LateAcceptanceAcceptor {
    fn is_accepted(&mut self, last_step_score: &ScheduleScore, move_score: &ScheduleScore) -> bool {
        move_score >= last_step_score || *move_score >= self.score_history[self.current_index]
    }

    fn phase_started(&mut self, initial_score: &ScheduleScore) {
        self.score_history.fill(*initial_score);
        self.current_index = 0;
    }

    fn step_ended(&mut self, step_score: &ScheduleScore) {
        self.score_history[self.current_index] = *step_score;
        self.current_index = (self.current_index + 1) % self.late_acceptance_size;
    }
}
