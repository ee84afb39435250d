//! Hill climbing acceptor.

use shiftwise_core::ScheduleScore;

use super::Acceptor;

/// Accepts only moves that do not make the score worse.
///
/// ```
/// use shiftwise_core::ScheduleScore;
/// use shiftwise_solver::localsearch::{Acceptor, HillClimbingAcceptor};
///
/// let mut acceptor = HillClimbingAcceptor;
/// let last = ScheduleScore::of(0, 0, -100);
/// assert!(acceptor.is_accepted(&last, &ScheduleScore::of(0, 0, -100)));
/// assert!(!acceptor.is_accepted(&last, &ScheduleScore::of(0, -1, 0)));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct HillClimbingAcceptor;

impl Acceptor for HillClimbingAcceptor {
    fn is_accepted(&mut self, last_step_score: &ScheduleScore, move_score: &ScheduleScore) -> bool {
        move_score >= last_step_score
    }
}
