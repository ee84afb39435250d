//! Local search phase.

use shiftwise_core::ScheduleScore;
use tracing::{debug, trace};

use super::acceptor::Acceptor;
use super::moves::ScheduleMove;
use super::selector::MoveSelector;
use crate::scope::SearchScope;
use crate::state::ScheduleState;
use crate::termination::Termination;

/// Samples `moves_per_step` moves per step and applies the best accepted
/// one. The acceptor decides how far the step score may fall behind.
#[derive(Debug)]
pub struct LocalSearchPhase<A: Acceptor> {
    acceptor: A,
    selector: MoveSelector,
    moves_per_step: usize,
}

impl<A: Acceptor> LocalSearchPhase<A> {
    pub fn new(acceptor: A, moves_per_step: usize) -> Self {
        Self {
            acceptor,
            selector: MoveSelector,
            moves_per_step: moves_per_step.max(1),
        }
    }

    pub fn solve<T: Termination>(
        &mut self,
        state: &mut ScheduleState<'_, '_>,
        scope: &mut SearchScope,
        termination: &T,
    ) {
        if state.model().slots().is_empty() {
            return;
        }
        let mut last_step_score = state.score();
        self.acceptor.phase_started(&last_step_score);

        while !termination.is_terminated(scope) {
            let mut winner: Option<(ScheduleMove, ScheduleScore)> = None;

            for _ in 0..self.moves_per_step {
                let Some(mv) = self.selector.sample(state, scope.rng()) else {
                    continue;
                };
                if !mv.try_apply(state) {
                    scope.stats_mut().record_move(false);
                    continue;
                }
                let move_score = state.score();
                mv.undo(state);

                let accepted = self.acceptor.is_accepted(&last_step_score, &move_score);
                scope.stats_mut().record_move(accepted);
                if accepted && winner.map_or(true, |(_, best)| move_score > best) {
                    winner = Some((mv, move_score));
                }
            }

            scope.stats_mut().record_step();
            let Some((mv, step_score)) = winner else {
                continue;
            };
            if !mv.try_apply(state) {
                continue;
            }
            last_step_score = step_score;
            self.acceptor.step_ended(&step_score);
            if scope.update_best(state, step_score) {
                debug!(
                    event = "new_best",
                    worker = scope.stats().worker,
                    step = scope.step_count(),
                    score = %step_score,
                );
            } else {
                trace!(event = "step", step = scope.step_count(), score = %step_score);
            }
        }
    }
}
